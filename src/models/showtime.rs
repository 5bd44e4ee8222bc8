use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::format_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Showtime {
    pub showtime_id: i64,
    pub movie_id: i64,
    pub theater_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl Showtime {
    /// Label joined against a movie id → title lookup. Unknown movies get a
    /// synthetic `Movie {id}` title.
    pub fn option_label(&self, titles: &HashMap<i64, String>) -> String {
        let title = titles
            .get(&self.movie_id)
            .cloned()
            .unwrap_or_else(|| format!("Movie {}", self.movie_id));
        format!(
            "{} — {} @ {} (Aud {})",
            self.showtime_id,
            title,
            format_timestamp(&self.start_time),
            self.theater_id
        )
    }
}
