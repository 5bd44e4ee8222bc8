use std::sync::Arc;

use crate::api::routes;
use crate::models::{
    format_money, format_timestamp, CustomerTicketHistoryEntry, MessageResponse, PurchaseRequest,
    TicketSale,
};
use crate::ui::panel::{Panel, PanelView, Tone};
use crate::ui::region::Region;
use crate::ui::select::SelectView;
use crate::ui::table::TableView;
use crate::utils::error::ClientError;

use super::dropdowns::{customer_select, showtime_select};
use super::{refresh_listing, render_listing, Context, Listing};

const TODAY: Listing = Listing {
    empty: "No tickets sold today.",
    failure: "Failed to load today's tickets",
};

const ALL_TICKETS: Listing = Listing {
    empty: "No tickets found.",
    failure: "Failed to load all tickets",
};

const HISTORY: Listing = Listing {
    empty: "No tickets for this customer.",
    failure: "Failed to load customer ticket history",
};

const MISSING_SELECTION: &str = "Please select both customer and showtime.";

/// Ticket purchase form plus the three ticket tables.
#[derive(Clone)]
pub struct TicketsController {
    ctx: Context,
    pub customer: Arc<Region<SelectView>>,
    pub showtime: Arc<Region<SelectView>>,
    pub purchase_result: Arc<Region<PanelView>>,
    pub today: Arc<Region<TableView>>,
    pub all: Arc<Region<TableView>>,
    pub history_customer: Arc<Region<SelectView>>,
    pub history: Arc<Region<TableView>>,
}

impl TicketsController {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            customer: Arc::new(customer_select("select-customer")),
            showtime: Arc::new(showtime_select("select-showtime")),
            purchase_result: Arc::new(Region::new("purchase-ticket-result", PanelView::default())),
            today: Arc::new(Region::new(
                "table-tickets-today",
                TableView::new(&["ID", "Customer", "Showtime", "Price"]),
            )),
            all: Arc::new(Region::new(
                "table-all-tickets",
                TableView::new(&["ID", "Customer", "Showtime", "Price", "Sold At"]),
            )),
            history_customer: Arc::new(customer_select("select-history-customer")),
            history: Arc::new(Region::new(
                "table-customer-history",
                TableView::new(&["ID", "Movie", "Showtime", "Price"]),
            )),
        }
    }

    pub async fn load_today(&self) -> Result<(), ClientError> {
        refresh_listing(
            &self.ctx,
            &self.today,
            routes::TICKETS_TODAY,
            TODAY,
            |t: &TicketSale| {
                vec![
                    t.ticket_sale_id.to_string(),
                    t.customer_id.to_string(),
                    t.showtime_id.to_string(),
                    format_money(&t.ticket_price),
                ]
            },
        )
        .await
        .map(|_| ())
    }

    pub async fn load_all(&self) -> Result<(), ClientError> {
        refresh_listing(
            &self.ctx,
            &self.all,
            routes::TICKETS,
            ALL_TICKETS,
            |t: &TicketSale| {
                vec![
                    t.ticket_sale_id.to_string(),
                    t.customer_id.to_string(),
                    t.showtime_id.to_string(),
                    format_money(&t.ticket_price),
                    format_timestamp(&t.time_ticket_sold),
                ]
            },
        )
        .await
        .map(|_| ())
    }

    /// Reload the history of the customer chosen in the history select.
    /// With the placeholder chosen the table is just cleared.
    pub async fn load_history(&self) -> Result<(), ClientError> {
        let ticket = self.history.begin();
        let selected = self.history_customer.snapshot().selected_value().map(str::to_owned);
        let Some(customer_id) = selected else {
            self.history.commit(ticket, |_| {});
            return Ok(());
        };

        render_listing(
            &self.ctx,
            &self.history,
            ticket,
            &routes::customer_tickets(&customer_id),
            HISTORY,
            |row: &CustomerTicketHistoryEntry| {
                vec![
                    row.ticket_sale_id.to_string(),
                    row.movie_title.clone(),
                    row.showtime_id.to_string(),
                    format_money(&row.ticket_price),
                ]
            },
        )
        .await
        .map(|_| ())
    }

    /// Whether both purchase selects hold a real choice.
    pub fn purchase_ready(&self) -> bool {
        self.purchase_request().is_some()
    }

    pub async fn purchase(&self) -> Result<MessageResponse, ClientError> {
        let ticket = self.purchase_result.begin();
        let Some(request) = self.purchase_request() else {
            self.purchase_result.fail(ticket);
            return Err(self.ctx.reject(MISSING_SELECTION));
        };

        match self
            .ctx
            .api
            .post::<_, MessageResponse>(routes::TICKETS_PURCHASE, &request)
            .await
        {
            Ok(response) => {
                self.purchase_result.commit(ticket, |view| {
                    view.show(Panel::message(Tone::Success, response.message.clone()))
                });
                self.ctx.notifier.success("Ticket purchase succeeded.");
                Ok(response)
            }
            Err(err) => {
                err.log();
                self.purchase_result.fail_with(ticket, |view| {
                    view.show(Panel::message(Tone::Danger, err.to_string()))
                });
                self.ctx
                    .notifier
                    .danger(format!("Ticket purchase failed: {}", err));
                Err(err)
            }
        }
    }

    fn purchase_request(&self) -> Option<PurchaseRequest> {
        let customer_id = parse_id(self.customer.snapshot().selected_value())?;
        let showtime_id = parse_id(self.showtime.snapshot().selected_value())?;
        Some(PurchaseRequest {
            customer_id,
            showtime_id,
        })
    }
}

fn parse_id(value: Option<&str>) -> Option<i64> {
    value?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::controllers::dropdowns::{populate_customers, populate_showtimes};
    use crate::test_support::{seed_reference_data, ticket_json, MockBackend};
    use crate::ui::notifier::{Notifier, Severity};
    use crate::ui::region::Phase;
    use crate::ui::table::TableRow;
    use serde_json::json;
    use std::time::Duration;

    async fn setup() -> (MockBackend, TicketsController, Notifier) {
        let backend = MockBackend::start().await;
        seed_reference_data(&backend);
        let notifier = Notifier::new(Duration::from_secs(30), Duration::from_millis(150));
        let ctx = Context::new(ApiClient::new(backend.base_url()), notifier.clone());
        let tickets = TicketsController::new(ctx.clone());
        populate_customers(&ctx, &tickets.customer).await.unwrap();
        populate_showtimes(&ctx, &tickets.showtime).await.unwrap();
        populate_customers(&ctx, &tickets.history_customer).await.unwrap();
        (backend, tickets, notifier)
    }

    #[tokio::test]
    async fn test_purchase_success_renders_backend_message() {
        let (backend, tickets, notifier) = setup().await;
        backend.respond(
            "POST",
            "/tickets/purchase",
            200,
            json!({"status": "success", "message": "Ticket purchased successfully"}),
        );
        tickets.customer.update(|v| v.select("1"));
        tickets.showtime.update(|v| v.select("5"));
        assert!(tickets.purchase_ready());

        let response = tickets.purchase().await.unwrap();

        assert_eq!(response.status, "success");
        let panel = tickets.purchase_result.snapshot().panel.unwrap();
        assert_eq!(panel.tone, Tone::Success);
        assert_eq!(panel.text(), "Ticket purchased successfully");
        assert_eq!(notifier.count(Severity::Success), 1);
        assert_eq!(notifier.alerts().len(), 1);

        let body = backend.last_body("POST /tickets/purchase").unwrap();
        let sent: PurchaseRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(
            sent,
            PurchaseRequest {
                customer_id: 1,
                showtime_id: 5
            }
        );
    }

    #[tokio::test]
    async fn test_purchase_without_showtime_issues_no_request() {
        let (backend, tickets, notifier) = setup().await;
        tickets.customer.update(|v| v.select("1"));
        // Selecting the placeholder keeps the form blocked.
        tickets.showtime.update(|v| v.select(""));
        assert!(!tickets.purchase_ready());

        let err = tickets.purchase().await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(backend.hit_count("POST /tickets/purchase"), 0);
        assert_eq!(notifier.count(Severity::Warning), 1);
        assert_eq!(notifier.alerts().len(), 1);
        assert_eq!(notifier.alerts()[0].message, MISSING_SELECTION);
        assert_eq!(tickets.purchase_result.snapshot().panel, None);
    }

    #[tokio::test]
    async fn test_purchase_failure_renders_inline_panel_and_alert() {
        let (backend, tickets, notifier) = setup().await;
        backend.respond(
            "POST",
            "/tickets/purchase",
            400,
            json!({"detail": "Showtime 5 is sold out."}),
        );
        tickets.customer.update(|v| v.select("2"));
        tickets.showtime.update(|v| v.select("5"));

        tickets.purchase().await.unwrap_err();

        let panel = tickets.purchase_result.snapshot().panel.unwrap();
        assert_eq!(panel.tone, Tone::Danger);
        assert_eq!(panel.text(), "Showtime 5 is sold out.");
        assert_eq!(tickets.purchase_result.phase(), Phase::Failed);
        assert_eq!(
            notifier.alerts()[0].message,
            "Ticket purchase failed: Showtime 5 is sold out."
        );
        assert_eq!(notifier.count(Severity::Danger), 1);
    }

    #[tokio::test]
    async fn test_ticket_tables_format_prices() {
        let (backend, tickets, _) = setup().await;
        backend.respond("GET", "/tickets", 200, json!([ticket_json(10, 1, 5, 12.5)]));

        tickets.load_today().await.unwrap();
        tickets.load_all().await.unwrap();

        assert_eq!(
            tickets.today.snapshot().rows,
            vec![TableRow::Cells(vec!["10".into(), "1".into(), "5".into(), "$15.00".into()])]
        );
        assert_eq!(
            tickets.all.snapshot().rows,
            vec![TableRow::Cells(vec![
                "10".into(),
                "1".into(),
                "5".into(),
                "$12.50".into(),
                "2025-11-04T10:15:00".into(),
            ])]
        );
    }

    #[tokio::test]
    async fn test_history_follows_customer_selection() {
        let (backend, tickets, notifier) = setup().await;
        backend.respond("GET", "/tickets/customers/2/tickets", 200, json!([]));
        backend.respond(
            "GET",
            "/tickets/customers/1/tickets",
            200,
            json!([{
                "ticket_sale_id": 10,
                "movie_title": "Minecraft",
                "showtime_id": 5,
                "theater_id": 3,
                "start_time": "2025-11-05T18:00:00",
                "ticket_price": 15.0,
                "time_ticket_sold": "2025-11-04T10:15:00",
            }]),
        );

        tickets.history_customer.update(|v| v.select("1"));
        tickets.load_history().await.unwrap();
        assert_eq!(
            tickets.history.snapshot().rows,
            vec![TableRow::Cells(vec!["10".into(), "Minecraft".into(), "5".into(), "$15.00".into()])]
        );

        tickets.history_customer.update(|v| v.select("2"));
        tickets.load_history().await.unwrap();
        assert_eq!(
            tickets.history.snapshot().rows,
            vec![TableRow::Placeholder {
                message: "No tickets for this customer.".into(),
                colspan: 4,
            }]
        );

        tickets.history_customer.update(|v| v.select(""));
        tickets.load_history().await.unwrap();
        assert!(tickets.history.snapshot().rows.is_empty());
        assert_eq!(backend.hit_count("GET /tickets/customers/1/tickets"), 1);
        assert!(notifier.alerts().is_empty());
    }
}
