//! HTTP client for the box-office backend.
//!
//! Every network call goes through [`ApiClient::get`] or [`ApiClient::post`],
//! which turn transport failures, error statuses and malformed bodies into a
//! [`ClientError`] carrying one user-facing message.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::utils::error::ClientError;
use crate::utils::response::{extract_detail, write_failure_message};

pub mod routes;

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - e.g. `http://localhost:8000/api`; paths are appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (and its connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a read request and decode the JSON body.
    ///
    /// On a non-success status the error message is
    /// `GET {path} failed: {status} {body}`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport("GET", path, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport("GET", path, e))?;

        if !status.is_success() {
            let message = format!("GET {} failed: {} {}", path, status.as_u16(), text);
            return Err(match extract_detail(&text) {
                Some(_) => ClientError::Api { status, message },
                None => ClientError::Transport {
                    status: Some(status),
                    message,
                },
            });
        }

        decode("GET", path, &text)
    }

    /// Serialize `body` as JSON, issue a write request and decode the reply.
    ///
    /// On a non-success status the error message is the body's `detail`, or
    /// the raw body text when there is none.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| transport("POST", path, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport("POST", path, e))?;

        if !status.is_success() {
            return Err(match extract_detail(&text) {
                Some(message) => ClientError::Api { status, message },
                None => ClientError::Transport {
                    status: Some(status),
                    message: write_failure_message(&text),
                },
            });
        }

        decode("POST", path, &text)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(method: &'static str, path: &str, err: reqwest::Error) -> ClientError {
    ClientError::Transport {
        status: err.status(),
        message: format!("{} {} failed: {}", method, path, err),
    }
}

fn decode<T: DeserializeOwned>(
    method: &'static str,
    path: &str,
    text: &str,
) -> Result<T, ClientError> {
    serde_json::from_str(text).map_err(|e| ClientError::Schema {
        method,
        path: path.to_string(),
        reason: e.to_string(),
    })
}
