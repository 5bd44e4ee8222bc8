//! Section controllers.
//!
//! Every controller catches failures at its own boundary: the affected region
//! is left cleared, the error is logged and a danger alert is raised. The
//! error is still returned so the bootstrap can aggregate startup failures.

use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::ui::notifier::Notifier;
use crate::ui::region::{Region, RenderTicket};
use crate::ui::table::TableView;
use crate::utils::error::ClientError;

pub mod dropdowns;
pub mod overview;
pub mod reports;
pub mod tickets;

/// What every controller needs: the backend and the alert stack.
#[derive(Clone)]
pub struct Context {
    pub api: ApiClient,
    pub notifier: Notifier,
}

impl Context {
    pub fn new(api: ApiClient, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    /// Log `err` and raise `{prefix}: {message}` as a danger alert.
    pub fn report_failure(&self, prefix: &str, err: &ClientError) {
        err.log();
        self.notifier.danger(format!("{}: {}", prefix, err));
    }

    /// Raise a warning for a missing input and return the matching error.
    pub fn reject(&self, message: &str) -> ClientError {
        let err = ClientError::Validation(message.to_string());
        err.log();
        self.notifier.warning(message);
        err
    }
}

/// Fixed texts of one listing table.
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    pub empty: &'static str,
    pub failure: &'static str,
}

/// Clear `region`, fetch `path` and render one row per record, or the
/// listing's placeholder when the result is empty.
pub async fn refresh_listing<T, F>(
    ctx: &Context,
    region: &Region<TableView>,
    path: &str,
    listing: Listing,
    row: F,
) -> Result<usize, ClientError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Vec<String>,
{
    let ticket = region.begin();
    render_listing(ctx, region, ticket, path, listing, row).await
}

/// Like [`refresh_listing`] for a cycle the caller already began.
pub async fn render_listing<T, F>(
    ctx: &Context,
    region: &Region<TableView>,
    ticket: RenderTicket,
    path: &str,
    listing: Listing,
    row: F,
) -> Result<usize, ClientError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Vec<String>,
{
    match ctx.api.get::<Vec<T>>(path).await {
        Ok(records) => {
            region.commit(ticket, |view| fill_table(view, &records, listing.empty, &row));
            Ok(records.len())
        }
        Err(err) => {
            region.fail(ticket);
            ctx.report_failure(listing.failure, &err);
            Err(err)
        }
    }
}

pub(crate) fn fill_table<T>(
    view: &mut TableView,
    records: &[T],
    empty: &str,
    row: impl Fn(&T) -> Vec<String>,
) {
    if records.is_empty() {
        view.push_placeholder(empty);
        return;
    }
    for record in records {
        view.push_row(row(record));
    }
}
