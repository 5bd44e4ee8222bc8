//! Transient status messages.
//!
//! Alerts stack in insertion order. An alert with a non-zero duration starts
//! hiding when the duration elapses and is removed once the hide transition
//! finishes. Expiry and user dismissal share one retirement path keyed by
//! alert id, so whichever comes second is a no-op.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Shown,
    Hiding,
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub phase: AlertPhase,
    /// False for alerts that stay until dismissed.
    pub expires: bool,
}

struct NotifierInner {
    alerts: Mutex<Vec<Alert>>,
    default_duration: Duration,
    transition: Duration,
}

#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl Notifier {
    pub fn new(default_duration: Duration, transition: Duration) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                alerts: Mutex::new(Vec::new()),
                default_duration,
                transition,
            }),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.alert_timeout, config.alert_transition)
    }

    /// Show `message`. A zero `duration` keeps it until dismissed.
    pub fn notify(&self, message: impl Into<String>, severity: Severity, duration: Duration) -> Uuid {
        let message = message.into();
        let id = Uuid::new_v4();
        let mut expires = !duration.is_zero();

        match severity {
            Severity::Danger => error!(%id, %message, "Alert raised"),
            Severity::Warning => warn!(%id, %message, "Alert raised"),
            Severity::Info | Severity::Success => info!(%id, %severity, %message, "Alert raised"),
        }

        let runtime = if expires { Handle::try_current().ok() } else { None };
        if expires && runtime.is_none() {
            warn!(%id, "No runtime to expire alert; keeping it until dismissed");
            expires = false;
        }

        // The alert must be on the stack before its timer can fire.
        self.lock().push(Alert {
            id,
            message,
            severity,
            phase: AlertPhase::Shown,
            expires,
        });

        if let Some(handle) = runtime {
            let notifier = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(duration).await;
                if notifier.start_hiding(id) {
                    tokio::time::sleep(notifier.inner.transition).await;
                    notifier.remove(id);
                }
            });
        }
        id
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::Info, self.inner.default_duration)
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::Success, self.inner.default_duration)
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::Warning, self.inner.default_duration)
    }

    pub fn danger(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::Danger, self.inner.default_duration)
    }

    pub fn persistent(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        self.notify(message, severity, Duration::ZERO)
    }

    /// User-initiated dismissal. Returns false if the alert is already
    /// hiding or gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        if !self.start_hiding(id) {
            return false;
        }
        match Handle::try_current() {
            Ok(handle) => {
                let notifier = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(notifier.inner.transition).await;
                    notifier.remove(id);
                });
            }
            Err(_) => self.remove(id),
        }
        true
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|alert| alert.severity == severity)
            .count()
    }

    fn start_hiding(&self, id: Uuid) -> bool {
        let mut alerts = self.lock();
        match alerts
            .iter_mut()
            .find(|alert| alert.id == id && alert.phase == AlertPhase::Shown)
        {
            Some(alert) => {
                alert.phase = AlertPhase::Hiding;
                debug!(%id, "Alert hiding");
                true
            }
            None => false,
        }
    }

    fn remove(&self, id: Uuid) {
        self.lock().retain(|alert| alert.id != id);
        debug!(%id, "Alert removed");
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Alert>> {
        self.inner
            .alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
