use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSale {
    pub ticket_sale_id: i64,
    pub customer_id: i64,
    pub showtime_id: i64,
    pub ticket_price: Decimal,
    pub time_ticket_sold: NaiveDateTime,
}

/// A ticket sale annotated with the movie it was for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerTicketHistoryEntry {
    pub ticket_sale_id: i64,
    pub movie_title: String,
    pub showtime_id: i64,
    pub theater_id: i64,
    pub start_time: NaiveDateTime,
    pub ticket_price: Decimal,
    pub time_ticket_sold: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub customer_id: i64,
    pub showtime_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}
