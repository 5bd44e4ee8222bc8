use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

pub mod customer;
pub mod movie;
pub mod report;
pub mod showtime;
pub mod ticket;

pub use customer::Customer;
pub use movie::Movie;
pub use report::{
    ConcessionCategoryRevenue, DailyTicketSales, MovieLifetimeSales, MovieProfit, MovieShowtime,
    ShowtimeAvailability, UpcomingShowtime,
};
pub use showtime::Showtime;
pub use ticket::{CustomerTicketHistoryEntry, MessageResponse, PurchaseRequest, TicketSale};

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn format_money(value: &Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_money_always_has_two_decimals() {
        assert_eq!(format_money(&Decimal::from(15)), "$15.00");
        assert_eq!(format_money(&Decimal::from_str("1234.5").unwrap()), "$1234.50");
    }

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        assert_eq!(format_money(&Decimal::from_str("1.999").unwrap()), "$2.00");
        assert_eq!(format_money(&Decimal::from_str("0.005").unwrap()), "$0.01");
        assert_eq!(format_money(&Decimal::from_str("2.344").unwrap()), "$2.34");

        let parsed: Decimal = serde_json::from_str("14.999").unwrap();
        assert_eq!(format_money(&parsed), "$15.00");
    }

    #[test]
    fn test_timestamp_keeps_fractional_seconds() {
        let ts = NaiveDateTime::from_str("2025-11-05T18:00:00.250").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-11-05T18:00:00.250");
    }

    #[test]
    fn test_timestamp_keeps_iso_separator() {
        let ts = NaiveDateTime::from_str("2025-11-05T18:00:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-11-05T18:00:00");
    }
}
