//! User triggers and handler registration.
//!
//! Handlers are registered per [`EventKind`] and stay registered for as long
//! as the returned [`Subscription`] is alive.

use std::future::Future;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::debug;
use uuid::Uuid;

use super::navigation::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Refresh {
    NowPlaying,
    Upcoming,
    AllMovies,
    TicketsToday,
    AllTickets,
}

impl Refresh {
    pub const ALL: [Refresh; 5] = [
        Refresh::NowPlaying,
        Refresh::Upcoming,
        Refresh::AllMovies,
        Refresh::TicketsToday,
        Refresh::AllTickets,
    ];
}

impl FromStr for Refresh {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "now-playing" => Ok(Refresh::NowPlaying),
            "upcoming" => Ok(Refresh::Upcoming),
            "movies" => Ok(Refresh::AllMovies),
            "today" => Ok(Refresh::TicketsToday),
            "tickets" => Ok(Refresh::AllTickets),
            other => Err(format!("Unknown table '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectControl {
    PurchaseCustomer,
    PurchaseShowtime,
    HistoryCustomer,
    AvailabilityShowtime,
    LifetimeSalesMovie,
    ProfitMovie,
}

impl SelectControl {
    pub const ALL: [SelectControl; 6] = [
        SelectControl::PurchaseCustomer,
        SelectControl::PurchaseShowtime,
        SelectControl::HistoryCustomer,
        SelectControl::AvailabilityShowtime,
        SelectControl::LifetimeSalesMovie,
        SelectControl::ProfitMovie,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SelectControl::PurchaseCustomer => "customer",
            SelectControl::PurchaseShowtime => "showtime",
            SelectControl::HistoryCustomer => "history-customer",
            SelectControl::AvailabilityShowtime => "q2-showtime",
            SelectControl::LifetimeSalesMovie => "q4-movie",
            SelectControl::ProfitMovie => "profit-movie",
        }
    }
}

impl FromStr for SelectControl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectControl::ALL
            .into_iter()
            .find(|control| control.name() == s)
            .ok_or_else(|| format!("Unknown select '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    MovieShowtimes { title: String, date: String },
    ShowtimeAvailability,
    ConcessionRevenue { limit: String },
    MovieLifetimeSales,
    UpcomingShowtimes { days_ahead: String },
    DailyTicketSales { date: String },
    MovieProfit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    MovieShowtimes,
    ShowtimeAvailability,
    ConcessionRevenue,
    MovieLifetimeSales,
    UpcomingShowtimes,
    DailyTicketSales,
    MovieProfit,
}

impl ReportKind {
    pub const ALL: [ReportKind; 7] = [
        ReportKind::MovieShowtimes,
        ReportKind::ShowtimeAvailability,
        ReportKind::ConcessionRevenue,
        ReportKind::MovieLifetimeSales,
        ReportKind::UpcomingShowtimes,
        ReportKind::DailyTicketSales,
        ReportKind::MovieProfit,
    ];
}

impl ReportRequest {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportRequest::MovieShowtimes { .. } => ReportKind::MovieShowtimes,
            ReportRequest::ShowtimeAvailability => ReportKind::ShowtimeAvailability,
            ReportRequest::ConcessionRevenue { .. } => ReportKind::ConcessionRevenue,
            ReportRequest::MovieLifetimeSales => ReportKind::MovieLifetimeSales,
            ReportRequest::UpcomingShowtimes { .. } => ReportKind::UpcomingShowtimes,
            ReportRequest::DailyTicketSales { .. } => ReportKind::DailyTicketSales,
            ReportRequest::MovieProfit => ReportKind::MovieProfit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Navigate(Section),
    Refresh(Refresh),
    SelectChanged { control: SelectControl, value: String },
    SubmitPurchase,
    SubmitReport(ReportRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Navigate,
    Refresh(Refresh),
    SelectChanged(SelectControl),
    SubmitPurchase,
    SubmitReport(ReportKind),
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Navigate(_) => EventKind::Navigate,
            UiEvent::Refresh(refresh) => EventKind::Refresh(*refresh),
            UiEvent::SelectChanged { control, .. } => EventKind::SelectChanged(*control),
            UiEvent::SubmitPurchase => EventKind::SubmitPurchase,
            UiEvent::SubmitReport(request) => EventKind::SubmitReport(request.kind()),
        }
    }
}

type Handler = Arc<dyn Fn(UiEvent) -> BoxFuture<'static, ()> + Send + Sync>;

struct Registration {
    id: Uuid,
    kind: EventKind,
    handler: Handler,
}

type Registry = Mutex<Vec<Registration>>;

#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Registry>,
}

impl EventBus {
    pub fn subscribe<F, Fut>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(UiEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let handler: Handler = Arc::new(move |event| handler(event).boxed());
        lock(&self.registry).push(Registration { id, kind, handler });
        debug!(%id, ?kind, "Handler registered");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Run every handler registered for the event's kind, in registration
    /// order. Returns how many ran.
    pub async fn dispatch(&self, event: UiEvent) -> usize {
        let kind = event.kind();
        let handlers: Vec<Handler> = lock(&self.registry)
            .iter()
            .filter(|registration| registration.kind == kind)
            .map(|registration| registration.handler.clone())
            .collect();

        if handlers.is_empty() {
            debug!(?kind, "No handler for event");
        }
        for handler in &handlers {
            handler(event.clone()).await;
        }
        handlers.len()
    }

    pub fn handler_count(&self) -> usize {
        lock(&self.registry).len()
    }
}

/// Keeps a handler registered. Dropping it unregisters the handler.
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    id: Uuid,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).retain(|registration| registration.id != self.id);
            debug!(id = %self.id, "Handler unregistered");
        }
    }
}

fn lock(registry: &Registry) -> MutexGuard<'_, Vec<Registration>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_dispatch_reaches_only_matching_handlers() {
        let bus = EventBus::default();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let _today = bus.subscribe(EventKind::Refresh(Refresh::TicketsToday), move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert_eq!(bus.dispatch(UiEvent::Refresh(Refresh::TicketsToday)).await, 1);
        assert_eq!(bus.dispatch(UiEvent::Refresh(Refresh::AllTickets)).await, 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropping_subscription_unregisters() {
        let bus = EventBus::default();
        let subscription = bus.subscribe(EventKind::SubmitPurchase, |_| async {});
        assert_eq!(bus.handler_count(), 1);

        subscription.dispose();
        assert_eq!(bus.handler_count(), 0);
        assert_eq!(bus.dispatch(UiEvent::SubmitPurchase).await, 0);
    }

    #[test]
    fn test_select_control_names_round_trip() {
        for control in SelectControl::ALL {
            assert_eq!(control.name().parse::<SelectControl>(), Ok(control));
        }
        assert!("popcorn".parse::<SelectControl>().is_err());
    }

    #[test]
    fn test_report_kind_is_independent_of_inputs() {
        let a = UiEvent::SubmitReport(ReportRequest::ConcessionRevenue {
            limit: String::new(),
        });
        let b = UiEvent::SubmitReport(ReportRequest::ConcessionRevenue {
            limit: "3".to_string(),
        });
        assert_eq!(a.kind(), b.kind());
    }
}
