//! Populate selection controls from reference collections.
//!
//! The control is cleared back to its placeholder before the fetch starts,
//! so a failed attempt never leaves options from an earlier one behind.
//! Options keep the backend's order.

use std::collections::HashMap;
use std::future::Future;

use crate::api::routes;
use crate::models::{Customer, Movie, Showtime};
use crate::ui::region::Region;
use crate::ui::select::SelectView;
use crate::utils::error::ClientError;

use super::Context;

pub fn customer_select(name: &'static str) -> Region<SelectView> {
    Region::new(name, SelectView::new("Select a customer..."))
}

pub fn showtime_select(name: &'static str) -> Region<SelectView> {
    Region::new(name, SelectView::new("Select a showtime..."))
}

pub fn movie_select(name: &'static str) -> Region<SelectView> {
    Region::new(name, SelectView::new("Select a movie..."))
}

pub async fn populate_customers(
    ctx: &Context,
    region: &Region<SelectView>,
) -> Result<usize, ClientError> {
    populate(ctx, region, "Failed to load customers", async {
        let customers: Vec<Customer> = ctx.api.get(routes::CUSTOMERS).await?;
        Ok::<_, ClientError>(customers
            .iter()
            .map(|c| (c.customer_id, c.option_label()))
            .collect::<Vec<_>>())
    })
    .await
}

/// Showtime labels are joined against the movie collection for titles.
pub async fn populate_showtimes(
    ctx: &Context,
    region: &Region<SelectView>,
) -> Result<usize, ClientError> {
    populate(ctx, region, "Failed to load showtimes", async {
        let (showtimes, movies) = tokio::try_join!(
            ctx.api.get::<Vec<Showtime>>(routes::SHOWTIMES),
            ctx.api.get::<Vec<Movie>>(routes::MOVIES),
        )?;
        let titles: HashMap<i64, String> = movies
            .into_iter()
            .map(|m| (m.movie_id, m.title))
            .collect();
        Ok::<_, ClientError>(showtimes
            .iter()
            .map(|s| (s.showtime_id, s.option_label(&titles)))
            .collect::<Vec<_>>())
    })
    .await
}

pub async fn populate_movies(
    ctx: &Context,
    region: &Region<SelectView>,
) -> Result<usize, ClientError> {
    populate(ctx, region, "Failed to load movies for dropdown", async {
        let movies: Vec<Movie> = ctx.api.get(routes::MOVIES).await?;
        Ok::<_, ClientError>(movies
            .iter()
            .map(|m| (m.movie_id, m.option_label()))
            .collect::<Vec<_>>())
    })
    .await
}

async fn populate<Fut>(
    ctx: &Context,
    region: &Region<SelectView>,
    failure: &str,
    fetch: Fut,
) -> Result<usize, ClientError>
where
    Fut: Future<Output = Result<Vec<(i64, String)>, ClientError>>,
{
    let ticket = region.begin();
    match fetch.await {
        Ok(options) => {
            region.commit(ticket, |view| {
                for (value, label) in &options {
                    view.push_option(value, label.clone());
                }
            });
            Ok(options.len())
        }
        Err(err) => {
            region.fail(ticket);
            ctx.report_failure(failure, &err);
            Err(err)
        }
    }
}
