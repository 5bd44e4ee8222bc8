use std::env;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
const DEFAULT_ALERT_TIMEOUT_MS: u64 = 4000;
const DEFAULT_ALERT_TRANSITION_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every backend path is appended to.
    pub api_base: String,
    /// How long an alert stays up before it starts hiding.
    pub alert_timeout: Duration,
    /// Length of the hide transition before an alert is removed.
    pub alert_transition: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            alert_timeout: Duration::from_millis(DEFAULT_ALERT_TIMEOUT_MS),
            alert_transition: Duration::from_millis(DEFAULT_ALERT_TRANSITION_MS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_base = env::var("BOXOFFICE_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        tracing::info!("Config: API base is {}", api_base);

        Self {
            api_base,
            alert_timeout: millis_from_env("BOXOFFICE_ALERT_TIMEOUT_MS", DEFAULT_ALERT_TIMEOUT_MS),
            alert_transition: millis_from_env(
                "BOXOFFICE_ALERT_TRANSITION_MS",
                DEFAULT_ALERT_TRANSITION_MS,
            ),
        }
    }
}

fn millis_from_env(key: &str, default: u64) -> Duration {
    let millis = match env::var(key) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Config: Invalid {} '{}': {}, using {}", key, raw, e, default);
                default
            }
        },
        Err(_) => default,
    };
    Duration::from_millis(millis)
}
