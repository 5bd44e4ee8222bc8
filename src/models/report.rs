//! One-shot report rows. None of these are cached or persisted.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieShowtime {
    pub title: String,
    pub showtime_id: i64,
    pub theater_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowtimeAvailability {
    pub showtime_id: i64,
    pub seat_capacity: i64,
    pub tickets_sold: i64,
    pub seats_remaining: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcessionCategoryRevenue {
    pub category: String,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieLifetimeSales {
    pub movie_id: i64,
    pub title: String,
    pub lifetime_ticket_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingShowtime {
    pub showtime_id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub theater_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_sold_out: bool,
    /// Scheduled, In Progress, Completed, Sold Out.
    pub dynamic_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTicketSales {
    pub report_date: NaiveDate,
    pub tickets_sold: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieProfit {
    pub movie_id: i64,
    pub title: String,
    pub net_profit: Decimal,
}
