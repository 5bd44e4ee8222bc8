//! Top-level wiring and startup.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::controllers::dropdowns::{populate_customers, populate_movies, populate_showtimes};
use crate::controllers::overview::OverviewController;
use crate::controllers::reports::ReportsController;
use crate::controllers::tickets::TicketsController;
use crate::controllers::Context;
use crate::ui::events::{EventBus, EventKind, Refresh, ReportKind, SelectControl, Subscription, UiEvent};
use crate::ui::navigation::{Navigation, Section};
use crate::ui::notifier::{Notifier, Severity};
use crate::ui::region::Region;
use crate::ui::select::SelectView;
use crate::utils::error::ClientError;

#[derive(Clone)]
pub struct App {
    ctx: Context,
    bus: EventBus,
    navigation: Arc<Mutex<Navigation>>,
    wired: Arc<AtomicBool>,
    pub overview: OverviewController,
    pub tickets: TicketsController,
    pub reports: ReportsController,
}

/// Live handler registrations. Dropping it unregisters every handler and
/// allows the app to be wired again.
pub struct Wiring {
    subscriptions: Vec<Subscription>,
    wired: Arc<AtomicBool>,
}

impl Wiring {
    pub fn handler_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Drop for Wiring {
    fn drop(&mut self) {
        self.subscriptions.clear();
        self.wired.store(false, Ordering::SeqCst);
        debug!("Event handlers torn down");
    }
}

impl App {
    pub fn new(config: &ClientConfig) -> Self {
        let api = ApiClient::new(config.api_base.clone());
        Self::with_context(Context::new(api, Notifier::from_config(config)))
    }

    pub fn with_context(ctx: Context) -> Self {
        Self {
            overview: OverviewController::new(ctx.clone()),
            tickets: TicketsController::new(ctx.clone()),
            reports: ReportsController::new(ctx.clone()),
            ctx,
            bus: EventBus::default(),
            navigation: Arc::new(Mutex::new(Navigation::default())),
            wired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.ctx.notifier
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn navigation(&self) -> Navigation {
        self.nav().clone()
    }

    pub fn navigate(&self, section: Section) {
        self.nav().select(section);
        info!(%section, "Section shown");
    }

    pub fn select_region(&self, control: SelectControl) -> &Region<SelectView> {
        match control {
            SelectControl::PurchaseCustomer => &self.tickets.customer,
            SelectControl::PurchaseShowtime => &self.tickets.showtime,
            SelectControl::HistoryCustomer => &self.tickets.history_customer,
            SelectControl::AvailabilityShowtime => &self.reports.availability_showtime,
            SelectControl::LifetimeSalesMovie => &self.reports.lifetime_sales_movie,
            SelectControl::ProfitMovie => &self.reports.profit_movie,
        }
    }

    /// Change a select. An empty `value` picks the placeholder. Changing the
    /// history customer reloads the history table.
    pub async fn select(&self, control: SelectControl, value: &str) -> Result<bool, ClientError> {
        let changed = self.select_region(control).update(|view| view.select(value));
        if !changed {
            warn!(control = control.name(), value, "Unknown option");
            self.ctx
                .notifier
                .warning(format!("No option '{}' in {}.", value, control.name()));
            return Ok(false);
        }
        if control == SelectControl::HistoryCustomer {
            self.tickets.load_history().await?;
        }
        Ok(true)
    }

    /// Register one handler per trigger. Returns `None` while an earlier
    /// [`Wiring`] is still alive.
    pub fn wire(&self) -> Option<Wiring> {
        if self.wired.swap(true, Ordering::SeqCst) {
            warn!("Event handlers already wired");
            return None;
        }

        let kinds = [EventKind::Navigate, EventKind::SubmitPurchase]
            .into_iter()
            .chain(Refresh::ALL.into_iter().map(EventKind::Refresh))
            .chain(SelectControl::ALL.into_iter().map(EventKind::SelectChanged))
            .chain(ReportKind::ALL.into_iter().map(EventKind::SubmitReport));

        let subscriptions: Vec<Subscription> = kinds
            .map(|kind| {
                let app = self.clone();
                self.bus.subscribe(kind, move |event| {
                    let app = app.clone();
                    async move { app.handle(event).await }
                })
            })
            .collect();

        info!(handlers = subscriptions.len(), "Event handlers wired");
        Some(Wiring {
            subscriptions,
            wired: self.wired.clone(),
        })
    }

    pub async fn dispatch(&self, event: UiEvent) -> usize {
        self.bus.dispatch(event).await
    }

    /// Run the nine startup loads concurrently, then spawn the today's
    /// tickets preload. Loads that succeed keep their output even when
    /// others fail.
    pub async fn bootstrap(&self) -> Result<(), ClientError> {
        info!(api = self.ctx.api.base_url(), "Starting initial load");
        let ctx = &self.ctx;
        let (now_playing, upcoming, all_movies, customers, history, showtimes, availability, lifetime, profit) = tokio::join!(
            self.overview.load_now_playing(),
            self.overview.load_upcoming(),
            self.overview.load_all_movies(),
            populate_customers(ctx, &self.tickets.customer),
            populate_customers(ctx, &self.tickets.history_customer),
            populate_showtimes(ctx, &self.tickets.showtime),
            populate_showtimes(ctx, &self.reports.availability_showtime),
            populate_movies(ctx, &self.reports.lifetime_sales_movie),
            populate_movies(ctx, &self.reports.profit_movie),
        );

        let errors: Vec<ClientError> = [
            now_playing,
            upcoming,
            all_movies,
            customers.map(drop),
            history.map(drop),
            showtimes.map(drop),
            availability.map(drop),
            lifetime.map(drop),
            profit.map(drop),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        let tickets = self.tickets.clone();
        tokio::spawn(async move {
            if let Err(err) = tickets.load_today().await {
                debug!(code = err.code(), "Today's tickets preload failed");
            }
        });

        let Some(first) = errors.first() else {
            info!("Initial load complete");
            return Ok(());
        };

        let message = format!("Failed to initialize app: {}", first);
        self.ctx.notifier.persistent(message.clone(), Severity::Danger);
        let err = ClientError::Startup {
            failed: errors.len(),
            message,
        };
        err.log();
        Err(err)
    }

    async fn handle(&self, event: UiEvent) {
        let result = match event {
            UiEvent::Navigate(section) => {
                self.navigate(section);
                Ok(())
            }
            UiEvent::Refresh(refresh) => self.refresh(refresh).await,
            UiEvent::SelectChanged { control, value } => {
                self.select(control, &value).await.map(drop)
            }
            UiEvent::SubmitPurchase => self.tickets.purchase().await.map(drop),
            UiEvent::SubmitReport(request) => self.reports.submit(&request).await,
        };
        // Failures were already surfaced by the controller.
        if let Err(err) = result {
            debug!(code = err.code(), "Handler finished with error");
        }
    }

    async fn refresh(&self, refresh: Refresh) -> Result<(), ClientError> {
        match refresh {
            Refresh::NowPlaying => self.overview.load_now_playing().await,
            Refresh::Upcoming => self.overview.load_upcoming().await,
            Refresh::AllMovies => self.overview.load_all_movies().await,
            Refresh::TicketsToday => self.tickets.load_today().await,
            Refresh::AllTickets => self.tickets.load_all().await,
        }
    }

    fn nav(&self) -> MutexGuard<'_, Navigation> {
        self.navigation.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{eventually, movie_json, seed_reference_data, MockBackend};
    use crate::ui::events::ReportRequest;
    use crate::ui::table::TableRow;
    use serde_json::json;
    use std::time::Duration;

    async fn setup() -> (MockBackend, App) {
        let backend = MockBackend::start().await;
        let notifier = Notifier::new(Duration::from_secs(30), Duration::from_millis(150));
        let ctx = Context::new(ApiClient::new(backend.base_url()), notifier);
        (backend, App::with_context(ctx))
    }

    #[tokio::test]
    async fn test_bootstrap_fills_every_region() {
        let (backend, app) = setup().await;
        seed_reference_data(&backend);

        app.bootstrap().await.unwrap();

        assert_eq!(app.overview.now_playing.snapshot().data_rows(), 1);
        assert_eq!(app.overview.all_movies.snapshot().data_rows(), 2);
        assert_eq!(
            app.overview.upcoming.snapshot().rows,
            vec![TableRow::Placeholder {
                message: "No upcoming movies.".into(),
                colspan: 3,
            }]
        );
        for control in SelectControl::ALL {
            assert_eq!(app.select_region(control).snapshot().choices().len(), 2);
        }
        assert!(app.notifier().alerts().is_empty());

        let today = app.tickets.today.clone();
        assert!(eventually(|| today.snapshot().data_rows() == 1).await);
        assert_eq!(backend.hit_count("GET /tickets/today"), 1);
    }

    #[tokio::test]
    async fn test_one_failed_load_fails_startup_but_keeps_the_rest() {
        let (backend, app) = setup().await;
        seed_reference_data(&backend);
        backend.respond_text("GET", "/customers", 500, "boom");

        let err = app.bootstrap().await.unwrap_err();

        match &err {
            ClientError::Startup { failed, message } => {
                assert_eq!(*failed, 2);
                assert_eq!(message, "Failed to initialize app: GET /customers failed: 500 boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(app.overview.now_playing.snapshot().data_rows(), 1);
        assert_eq!(app.tickets.showtime.snapshot().choices().len(), 2);
        assert!(app.tickets.customer.snapshot().choices().is_empty());

        let alerts = app.notifier().alerts();
        let startup: Vec<_> = alerts.iter().filter(|a| !a.expires).collect();
        assert_eq!(startup.len(), 1);
        assert_eq!(startup[0].severity, Severity::Danger);
        assert_eq!(startup[0].message, err.to_string());
        // One alert per failed customer select plus the startup alert.
        assert_eq!(app.notifier().count(Severity::Danger), 3);

        let today = app.tickets.today.clone();
        assert!(eventually(|| today.snapshot().data_rows() == 1).await);
    }

    #[tokio::test]
    async fn test_wire_is_exclusive_until_dropped() {
        let (_backend, app) = setup().await;

        let wiring = app.wire().unwrap();
        assert_eq!(wiring.handler_count(), 20);
        assert_eq!(app.bus().handler_count(), 20);
        assert!(app.wire().is_none());

        drop(wiring);
        assert_eq!(app.bus().handler_count(), 0);

        let again = app.wire();
        assert!(again.is_some());
        assert_eq!(app.bus().handler_count(), 20);
    }

    #[tokio::test]
    async fn test_unwired_app_ignores_events() {
        let (_backend, app) = setup().await;

        assert_eq!(app.dispatch(UiEvent::Navigate(Section::Reports)).await, 0);
        assert_eq!(app.navigation().active(), Section::Overview);
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_controllers() {
        let (backend, app) = setup().await;
        seed_reference_data(&backend);
        backend.respond("GET", "/tickets/customers/1/tickets", 200, json!([]));
        app.bootstrap().await.unwrap();
        let _wiring = app.wire().unwrap();

        assert_eq!(app.dispatch(UiEvent::Navigate(Section::Tickets)).await, 1);
        assert!(app.navigation().is_visible(Section::Tickets));

        app.dispatch(UiEvent::SelectChanged {
            control: SelectControl::HistoryCustomer,
            value: "1".into(),
        })
        .await;
        assert_eq!(backend.hit_count("GET /tickets/customers/1/tickets"), 1);
        assert_eq!(app.tickets.history.snapshot().rows.len(), 1);

        backend.respond("GET", "/movies/upcoming", 200, json!([movie_json(3, "Dune", false)]));
        app.dispatch(UiEvent::Refresh(Refresh::Upcoming)).await;
        assert_eq!(app.overview.upcoming.snapshot().data_rows(), 1);

        app.dispatch(UiEvent::SubmitPurchase).await;
        assert_eq!(backend.hit_count("POST /tickets/purchase"), 0);
        assert_eq!(app.notifier().count(Severity::Warning), 1);

        app.dispatch(UiEvent::SubmitReport(ReportRequest::DailyTicketSales {
            date: String::new(),
        }))
        .await;
        assert_eq!(app.notifier().count(Severity::Warning), 2);
    }

    #[tokio::test]
    async fn test_unknown_option_leaves_selection_alone() {
        let (backend, app) = setup().await;
        seed_reference_data(&backend);
        app.bootstrap().await.unwrap();

        assert!(app.select(SelectControl::ProfitMovie, "1").await.unwrap());
        assert!(!app.select(SelectControl::ProfitMovie, "42").await.unwrap());

        assert_eq!(app.reports.profit_movie.snapshot().selected_value(), Some("1"));
        assert_eq!(app.notifier().count(Severity::Warning), 1);
    }
}
