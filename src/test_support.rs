//! In-process mock backend and JSON fixtures for tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    content_type: &'static str,
    delay: Duration,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<String, Canned>>,
    hits: Mutex<Vec<(String, String)>>,
}

/// Serves canned responses keyed by `"{METHOD} {path_and_query}"` under `/api`.
/// Unknown routes answer 404 with a `detail` body.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let listener = TcpListener::bind(addr).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .fallback(handle)
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond_after(method, path, status, body, Duration::ZERO);
    }

    /// Like [`MockBackend::respond`], but each request waits `delay` first.
    /// The response is picked when the request arrives.
    pub fn respond_after(&self, method: &str, path: &str, status: u16, body: Value, delay: Duration) {
        self.insert(method, path, status, body.to_string(), "application/json", delay);
    }

    pub fn respond_text(&self, method: &str, path: &str, status: u16, body: &str) {
        self.insert(method, path, status, body.to_string(), "text/plain", Duration::ZERO);
    }

    /// Every request received so far, as `"{METHOD} {path_and_query}"`.
    pub fn hits(&self) -> Vec<String> {
        self.state
            .hits
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn hit_count(&self, key: &str) -> usize {
        self.hits().iter().filter(|hit| hit.as_str() == key).count()
    }

    pub fn last_body(&self, key: &str) -> Option<String> {
        self.state
            .hits
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(hit, _)| hit == key)
            .map(|(_, body)| body.clone())
    }

    fn insert(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: String,
        content_type: &'static str,
        delay: Duration,
    ) {
        self.state.routes.lock().unwrap().insert(
            format!("{} {}", method, path),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                body,
                content_type,
                delay,
            },
        );
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .trim_start_matches("/api")
        .to_string();
    let key = format!("{} {}", method, path);
    state.hits.lock().unwrap().push((key.clone(), body));

    let canned = state.routes.lock().unwrap().get(&key).cloned();
    match canned {
        Some(canned) => {
            tokio::time::sleep(canned.delay).await;
            (
                canned.status,
                [("content-type", canned.content_type)],
                canned.body,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            [("content-type", "application/json")],
            json!({"detail": "Not Found"}).to_string(),
        )
            .into_response(),
    }
}

/// Poll `check` until it holds or a second passes.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

pub fn movie_json(id: i64, title: &str, active: bool) -> Value {
    json!({
        "movie_id": id,
        "title": title,
        "genre": "Adventure",
        "runtime": 120,
        "release_date": "2025-10-28",
        "price": 250.0,
        "is_active": active,
    })
}

pub fn customer_json(id: i64, fname: &str, lname: Option<&str>) -> Value {
    json!({
        "customer_id": id,
        "fname": fname,
        "lname": lname,
        "membership_status": true,
    })
}

pub fn showtime_json(id: i64, movie_id: i64, theater_id: i64) -> Value {
    json!({
        "showtime_id": id,
        "movie_id": movie_id,
        "theater_id": theater_id,
        "start_time": "2025-11-05T18:00:00",
        "end_time": "2025-11-05T20:12:00",
    })
}

pub fn ticket_json(id: i64, customer_id: i64, showtime_id: i64, price: f64) -> Value {
    json!({
        "ticket_sale_id": id,
        "customer_id": customer_id,
        "showtime_id": showtime_id,
        "ticket_price": price,
        "time_ticket_sold": "2025-11-04T10:15:00",
    })
}

/// Canned responses for every load the bootstrap issues.
pub fn seed_reference_data(backend: &MockBackend) {
    backend.respond(
        "GET",
        "/movies",
        200,
        json!([movie_json(1, "Minecraft", true), movie_json(2, "Tron", false)]),
    );
    backend.respond("GET", "/movies/now-playing", 200, json!([movie_json(1, "Minecraft", true)]));
    backend.respond("GET", "/movies/upcoming", 200, json!([]));
    backend.respond(
        "GET",
        "/customers",
        200,
        json!([customer_json(1, "Carlo", Some("Velarde")), customer_json(2, "Ana", None)]),
    );
    backend.respond(
        "GET",
        "/showtimes",
        200,
        json!([showtime_json(5, 1, 3), showtime_json(6, 99, 2)]),
    );
    backend.respond("GET", "/tickets/today", 200, json!([ticket_json(10, 1, 5, 15.0)]));
}
