//! Backend paths, relative to the configured API base.

use url::form_urlencoded;

pub const MOVIES: &str = "/movies";
pub const MOVIES_NOW_PLAYING: &str = "/movies/now-playing";
pub const MOVIES_UPCOMING: &str = "/movies/upcoming";
pub const CUSTOMERS: &str = "/customers";
pub const SHOWTIMES: &str = "/showtimes";
pub const TICKETS: &str = "/tickets";
pub const TICKETS_TODAY: &str = "/tickets/today";
pub const TICKETS_PURCHASE: &str = "/tickets/purchase";

pub fn customer_tickets(customer_id: &str) -> String {
    format!("/tickets/customers/{}/tickets", segment(customer_id))
}

pub fn movie_showtimes(title: &str, date: &str) -> String {
    with_query("/reports/movie-showtimes", &[("title", title), ("date", date)])
}

pub fn showtime_availability(showtime_id: &str) -> String {
    with_query(
        "/reports/showtime-availability",
        &[("showtime_id", showtime_id)],
    )
}

/// `limit` is omitted when empty.
pub fn concession_top_categories(limit: &str) -> String {
    with_optional_query("/reports/concessions/top-categories", "limit", limit)
}

pub fn movie_lifetime_sales(movie_id: &str) -> String {
    with_query("/reports/movie-lifetime-sales", &[("movie_id", movie_id)])
}

/// `days_ahead` is omitted when empty.
pub fn upcoming_showtimes(days_ahead: &str) -> String {
    with_optional_query("/reports/upcoming-showtimes", "days_ahead", days_ahead)
}

pub fn daily_ticket_sales(date: &str) -> String {
    with_query("/reports/daily-ticket-sales", &[("date", date)])
}

pub fn movie_profit(movie_id: &str) -> String {
    format!("/reports/movies/{}/profit", segment(movie_id))
}

fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{}?{}", path, query)
}

fn with_optional_query(path: &str, key: &str, value: &str) -> String {
    if value.is_empty() {
        path.to_string()
    } else {
        with_query(path, &[(key, value)])
    }
}

fn segment(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
