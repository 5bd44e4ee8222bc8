use std::sync::Arc;

use crate::api::routes;
use crate::models::{format_date, Movie};
use crate::ui::region::Region;
use crate::ui::table::TableView;
use crate::utils::error::ClientError;

use super::{refresh_listing, Context, Listing};

const NOW_PLAYING: Listing = Listing {
    empty: "No active movies.",
    failure: "Failed to load now playing movies",
};

const UPCOMING: Listing = Listing {
    empty: "No upcoming movies.",
    failure: "Failed to load upcoming movies",
};

const ALL_MOVIES: Listing = Listing {
    empty: "No movies found.",
    failure: "Failed to load all movies",
};

/// The three movie tables.
#[derive(Clone)]
pub struct OverviewController {
    ctx: Context,
    pub now_playing: Arc<Region<TableView>>,
    pub upcoming: Arc<Region<TableView>>,
    pub all_movies: Arc<Region<TableView>>,
}

impl OverviewController {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            now_playing: Arc::new(Region::new(
                "table-now-playing",
                TableView::new(&["Title", "Genre", "Runtime"]),
            )),
            upcoming: Arc::new(Region::new(
                "table-upcoming",
                TableView::new(&["Title", "Genre", "Release Date"]),
            )),
            all_movies: Arc::new(Region::new(
                "table-all-movies",
                TableView::new(&["Title", "Genre", "Active"]),
            )),
        }
    }

    pub async fn load_now_playing(&self) -> Result<(), ClientError> {
        refresh_listing(
            &self.ctx,
            &self.now_playing,
            routes::MOVIES_NOW_PLAYING,
            NOW_PLAYING,
            |m: &Movie| vec![m.title.clone(), m.genre.clone(), format!("{} min", m.runtime)],
        )
        .await
        .map(|_| ())
    }

    pub async fn load_upcoming(&self) -> Result<(), ClientError> {
        refresh_listing(
            &self.ctx,
            &self.upcoming,
            routes::MOVIES_UPCOMING,
            UPCOMING,
            |m: &Movie| vec![m.title.clone(), m.genre.clone(), format_date(&m.release_date)],
        )
        .await
        .map(|_| ())
    }

    pub async fn load_all_movies(&self) -> Result<(), ClientError> {
        refresh_listing(
            &self.ctx,
            &self.all_movies,
            routes::MOVIES,
            ALL_MOVIES,
            |m: &Movie| {
                let active = if m.is_active { "Yes" } else { "No" };
                vec![m.title.clone(), m.genre.clone(), active.to_string()]
            },
        )
        .await
        .map(|_| ())
    }
}
