//! Report forms.
//!
//! Each form owns a result panel; table reports also own a table. A submit
//! clears both, checks required inputs, then renders the result or an inline
//! failure and raises a global alert either way.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::api::routes;
use crate::models::{
    format_date, format_money, format_timestamp, ConcessionCategoryRevenue, DailyTicketSales,
    MovieLifetimeSales, MovieProfit, MovieShowtime, ShowtimeAvailability, UpcomingShowtime,
};
use crate::ui::events::ReportRequest;
use crate::ui::panel::{Panel, PanelView, Tone};
use crate::ui::region::{Region, RenderTicket};
use crate::ui::select::SelectView;
use crate::ui::table::TableView;
use crate::utils::error::ClientError;

use super::dropdowns::{movie_select, showtime_select};
use super::{fill_table, Context};

pub struct ReportForm {
    pub label: &'static str,
    pub panel: Region<PanelView>,
    pub table: Option<Region<TableView>>,
}

struct Submission {
    panel: RenderTicket,
    table: Option<RenderTicket>,
}

impl ReportForm {
    fn panel_only(label: &'static str, name: &'static str) -> Self {
        Self {
            label,
            panel: Region::new(name, PanelView::default()),
            table: None,
        }
    }

    fn with_table(
        label: &'static str,
        panel: &'static str,
        table: &'static str,
        columns: &[&'static str],
    ) -> Self {
        Self {
            label,
            panel: Region::new(panel, PanelView::default()),
            table: Some(Region::new(table, TableView::new(columns))),
        }
    }

    fn begin(&self) -> Submission {
        Submission {
            panel: self.panel.begin(),
            table: self.table.as_ref().map(Region::begin),
        }
    }

    fn abandon(&self, submission: &Submission) {
        self.panel.fail(submission.panel);
        if let (Some(table), Some(ticket)) = (&self.table, submission.table) {
            table.fail(ticket);
        }
    }

    fn fail(&self, ctx: &Context, submission: &Submission, err: &ClientError) {
        err.log();
        self.panel.fail_with(submission.panel, |view| {
            view.show(Panel::message(Tone::Danger, err.to_string()))
        });
        if let (Some(table), Some(ticket)) = (&self.table, submission.table) {
            table.fail(ticket);
        }
        ctx.notifier.danger(format!("{} failed: {}", self.label, err));
    }
}

#[derive(Clone)]
pub struct ReportsController {
    ctx: Context,
    pub availability_showtime: Arc<Region<SelectView>>,
    pub lifetime_sales_movie: Arc<Region<SelectView>>,
    pub profit_movie: Arc<Region<SelectView>>,
    pub movie_showtimes: Arc<ReportForm>,
    pub availability: Arc<ReportForm>,
    pub concessions: Arc<ReportForm>,
    pub lifetime_sales: Arc<ReportForm>,
    pub upcoming: Arc<ReportForm>,
    pub daily_sales: Arc<ReportForm>,
    pub profit: Arc<ReportForm>,
}

impl ReportsController {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            availability_showtime: Arc::new(showtime_select("report-q2-showtime-id")),
            lifetime_sales_movie: Arc::new(movie_select("report-q4-movie-id")),
            profit_movie: Arc::new(movie_select("report-profit-movie-id")),
            movie_showtimes: Arc::new(ReportForm::with_table(
                "Query 1",
                "report-q1-result",
                "table-report-q1",
                &["Title", "Showtime", "Theater", "Start", "End"],
            )),
            availability: Arc::new(ReportForm::panel_only("Query 2", "report-q2-result")),
            concessions: Arc::new(ReportForm::with_table(
                "Query 3",
                "report-q3-result",
                "table-report-q3",
                &["Category", "Revenue"],
            )),
            lifetime_sales: Arc::new(ReportForm::panel_only("Query 4", "report-q4-result")),
            upcoming: Arc::new(ReportForm::with_table(
                "Query 5",
                "report-q5-result",
                "table-report-q5",
                &["Showtime", "Movie", "Theater", "Start", "Status"],
            )),
            daily_sales: Arc::new(ReportForm::panel_only(
                "Daily ticket sales query",
                "report-daily-result",
            )),
            profit: Arc::new(ReportForm::panel_only(
                "Movie profit query",
                "report-profit-result",
            )),
        }
    }

    pub async fn submit(&self, request: &ReportRequest) -> Result<(), ClientError> {
        match request {
            ReportRequest::MovieShowtimes { title, date } => self.movie_showtimes(title, date).await,
            ReportRequest::ShowtimeAvailability => self.showtime_availability().await,
            ReportRequest::ConcessionRevenue { limit } => self.concession_revenue(limit).await,
            ReportRequest::MovieLifetimeSales => self.movie_lifetime_sales().await,
            ReportRequest::UpcomingShowtimes { days_ahead } => {
                self.upcoming_showtimes(days_ahead).await
            }
            ReportRequest::DailyTicketSales { date } => self.daily_ticket_sales(date).await,
            ReportRequest::MovieProfit => self.movie_profit().await,
        }
    }

    pub async fn movie_showtimes(&self, title: &str, date: &str) -> Result<(), ClientError> {
        let form = &self.movie_showtimes;
        let submission = form.begin();
        let (title, date) = (title.trim(), date.trim());
        if title.is_empty() || date.is_empty() {
            form.abandon(&submission);
            return Err(self.ctx.reject("Please enter a movie title and date."));
        }

        self.table_report(
            form,
            submission,
            &routes::movie_showtimes(title, date),
            "No showtimes found.",
            |row: &MovieShowtime| {
                vec![
                    row.title.clone(),
                    row.showtime_id.to_string(),
                    row.theater_id.to_string(),
                    format_timestamp(&row.start_time),
                    format_timestamp(&row.end_time),
                ]
            },
        )
        .await
    }

    pub async fn showtime_availability(&self) -> Result<(), ClientError> {
        let form = &self.availability;
        let submission = form.begin();
        let Some(showtime_id) = selected(&self.availability_showtime) else {
            form.abandon(&submission);
            return Err(self.ctx.reject("Please select a showtime."));
        };

        self.panel_report(
            form,
            submission,
            &routes::showtime_availability(&showtime_id),
            |data: &ShowtimeAvailability| {
                Panel::fields(
                    Tone::Success,
                    vec![
                        ("Showtime", data.showtime_id.to_string()),
                        ("Capacity", data.seat_capacity.to_string()),
                        ("Tickets Sold", data.tickets_sold.to_string()),
                        ("Seats Remaining", data.seats_remaining.to_string()),
                    ],
                )
            },
        )
        .await
    }

    /// `limit` is optional.
    pub async fn concession_revenue(&self, limit: &str) -> Result<(), ClientError> {
        let form = &self.concessions;
        let submission = form.begin();
        self.table_report(
            form,
            submission,
            &routes::concession_top_categories(limit.trim()),
            "No concession sales found.",
            |row: &ConcessionCategoryRevenue| {
                vec![row.category.clone(), format_money(&row.total_revenue)]
            },
        )
        .await
    }

    pub async fn movie_lifetime_sales(&self) -> Result<(), ClientError> {
        let form = &self.lifetime_sales;
        let submission = form.begin();
        let Some(movie_id) = selected(&self.lifetime_sales_movie) else {
            form.abandon(&submission);
            return Err(self.ctx.reject("Please select a movie."));
        };

        self.panel_report(
            form,
            submission,
            &routes::movie_lifetime_sales(&movie_id),
            |data: &MovieLifetimeSales| {
                Panel::fields(
                    Tone::Info,
                    vec![
                        ("Movie", format!("{} (ID {})", data.title, data.movie_id)),
                        ("Lifetime Ticket Sales", data.lifetime_ticket_sales.to_string()),
                    ],
                )
            },
        )
        .await
    }

    /// `days_ahead` is optional.
    pub async fn upcoming_showtimes(&self, days_ahead: &str) -> Result<(), ClientError> {
        let form = &self.upcoming;
        let submission = form.begin();
        self.table_report(
            form,
            submission,
            &routes::upcoming_showtimes(days_ahead.trim()),
            "No upcoming showtimes found.",
            |row: &UpcomingShowtime| {
                vec![
                    row.showtime_id.to_string(),
                    row.movie_title.clone(),
                    row.theater_id.to_string(),
                    format_timestamp(&row.start_time),
                    row.dynamic_status.clone(),
                ]
            },
        )
        .await
    }

    pub async fn daily_ticket_sales(&self, date: &str) -> Result<(), ClientError> {
        let form = &self.daily_sales;
        let submission = form.begin();
        let date = date.trim();
        if date.is_empty() {
            form.abandon(&submission);
            return Err(self.ctx.reject("Please choose a date."));
        }

        self.panel_report(
            form,
            submission,
            &routes::daily_ticket_sales(date),
            |data: &DailyTicketSales| {
                Panel::fields(
                    Tone::Dark,
                    vec![
                        ("Date", format_date(&data.report_date)),
                        ("Ticket Sales", data.tickets_sold.to_string()),
                    ],
                )
            },
        )
        .await
    }

    pub async fn movie_profit(&self) -> Result<(), ClientError> {
        let form = &self.profit;
        let submission = form.begin();
        let Some(movie_id) = selected(&self.profit_movie) else {
            form.abandon(&submission);
            return Err(self.ctx.reject("Please select a movie."));
        };

        self.panel_report(
            form,
            submission,
            &routes::movie_profit(&movie_id),
            |data: &MovieProfit| {
                Panel::fields(
                    Tone::Dark,
                    vec![
                        ("Movie", format!("{} (ID {})", data.title, data.movie_id)),
                        ("Net Profit", format_money(&data.net_profit)),
                    ],
                )
            },
        )
        .await
    }

    async fn table_report<T, F>(
        &self,
        form: &ReportForm,
        submission: Submission,
        path: &str,
        empty: &str,
        row: F,
    ) -> Result<(), ClientError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> Vec<String>,
    {
        match self.ctx.api.get::<Vec<T>>(path).await {
            Ok(records) => {
                form.panel.commit(submission.panel, |_| {});
                if let (Some(table), Some(ticket)) = (&form.table, submission.table) {
                    table.commit(ticket, |view| fill_table(view, &records, empty, &row));
                }
                self.ctx.notifier.success(format!("{} completed.", form.label));
                Ok(())
            }
            Err(err) => {
                form.fail(&self.ctx, &submission, &err);
                Err(err)
            }
        }
    }

    async fn panel_report<T, F>(
        &self,
        form: &ReportForm,
        submission: Submission,
        path: &str,
        render: F,
    ) -> Result<(), ClientError>
    where
        T: DeserializeOwned,
        F: FnOnce(&T) -> Panel,
    {
        match self.ctx.api.get::<T>(path).await {
            Ok(data) => {
                form.panel
                    .commit(submission.panel, |view| view.show(render(&data)));
                self.ctx.notifier.success(format!("{} completed.", form.label));
                Ok(())
            }
            Err(err) => {
                form.fail(&self.ctx, &submission, &err);
                Err(err)
            }
        }
    }
}

fn selected(region: &Region<SelectView>) -> Option<String> {
    region.snapshot().selected_value().map(str::to_owned)
}
