//! # Invoker
//!
//! The single network boundary. An [`Invoker`] takes a fully described [`RestCall`] and returns
//! the server's JSON response, or the error the server (or transport) reported. It owns
//! authentication, serialization and timeouts; entity clients own validation and unwrapping.
//!
//! [`HttpInvoker`] talks to a real platform over HTTP. See [`LocalInvoker`](crate::LocalInvoker)
//! for an in-process catalog and [`MockInvoker`](crate::mock::MockInvoker) for scripted tests.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::message::{FfdcResponse, RestCall, Verb};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Issues one remote call per invocation. Implementations must be safe to share across tasks.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, call: RestCall) -> Result<serde_json::Value>;
}

/// Invoker backed by `reqwest`.
pub struct HttpInvoker {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl HttpInvoker {
    /// Creates an HTTP invoker from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform URL is empty or the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        const METHOD: &str = "HttpInvoker::new";

        let base_url = config.platform_url_root.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::invalid(METHOD, "platformURLRoot", "must not be empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::invalid(METHOD, "httpClient", e.to_string()))?;

        let credentials = match (&config.user_id, &config.password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }
}

#[async_trait]
impl Invoker for HttpInvoker {
    #[instrument(skip(self, call), fields(method = %call.method_name, verb = %call.verb))]
    async fn invoke(&self, call: RestCall) -> Result<serde_json::Value> {
        let method = call.method_name.as_str();
        let url = format!("{}{}", self.base_url, call.resolve_path()?);
        debug!(%url, "Sending request");

        let mut request = match call.verb {
            Verb::Get => self.client.get(&url),
            Verb::Post => {
                let empty = serde_json::Value::Object(serde_json::Map::new());
                self.client.post(&url).json(call.body.as_ref().unwrap_or(&empty))
            }
        };
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::server_fault(method, None, format!("transport error: {e}")))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ClientError::server_fault(method, Some(status.as_u16()), format!("failed to read response: {e}"))
        })?;
        let body: serde_json::Value = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) if status.is_success() => {
                    return Err(ClientError::server_fault(
                        method,
                        Some(status.as_u16()),
                        format!("failed to parse response: {e}"),
                    ));
                }
                Err(_) => serde_json::Value::String(text),
            }
        };

        let ffdc: FfdcResponse = serde_json::from_value(body.clone()).unwrap_or_default();
        if let Some(err) = ffdc.to_error(method, call.caller_id()) {
            warn!(error = %err, "Server reported an exception");
            return Err(err);
        }
        if !status.is_success() {
            let err = status_error(method, call.caller_id(), status, &body);
            warn!(error = %err, "Request failed");
            return Err(err);
        }
        Ok(body)
    }
}

fn status_error(method: &str, user_id: &str, status: StatusCode, body: &serde_json::Value) -> ClientError {
    let message = match body {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => status.canonical_reason().unwrap_or("no response body").to_string(),
        other => other.to_string(),
    };
    match status {
        StatusCode::BAD_REQUEST => ClientError::invalid(method, "request", message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ClientError::not_authorized(method, user_id, message)
        }
        other => ClientError::server_fault(method, Some(other.as_u16()), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        let body = serde_json::Value::String("nope".into());
        assert!(status_error("findTopics", "bob", StatusCode::FORBIDDEN, &body).is_not_authorized());
        assert!(status_error("findTopics", "bob", StatusCode::BAD_REQUEST, &body).is_invalid_parameter());
        assert!(status_error("getTopicByGUID", "bob", StatusCode::NOT_FOUND, &body).is_not_found());
    }

    #[test]
    fn test_new_rejects_empty_platform_url() {
        let config = ClientConfig::new("srv", "");
        assert!(HttpInvoker::new(&config).is_err());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("srv", "http://localhost:9443/");
        let invoker = HttpInvoker::new(&config).unwrap();
        assert_eq!(invoker.base_url, "http://localhost:9443");
    }
}
