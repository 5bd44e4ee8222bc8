use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    pub genre: String,
    /// Minutes.
    pub runtime: i32,
    pub release_date: NaiveDate,
    /// Cost to the theater per showing. Not every listing sends it.
    #[serde(default)]
    pub price: Option<Decimal>,
    pub is_active: bool,
}

impl Movie {
    pub fn option_label(&self) -> String {
        format!("{} — {}", self.movie_id, self.title)
    }
}
