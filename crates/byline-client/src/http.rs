//! HttpGateway - reqwest implementation of the remote gateway traits.
//!
//! Maps every remote failure into a `BylineError` variant at this
//! boundary; nothing above the gateways ever sees a `reqwest` error.

use async_trait::async_trait;
use byline_core::error::{BylineError, Result};
use byline_core::health::{HealthGateway, ServiceHealth};
use byline_core::query::{QueryAnswer, QueryGateway, QueryRequest};
use byline_core::session::{AuthGateway, UserProfile};
use byline_core::timer::{TimerGateway, TimerKind, TimerSample, TimerStatus};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Gateway implementation that talks to the answering service over HTTP.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway for the service at `base_url` with the default
    /// request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a gateway with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| BylineError::config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credential: &str) -> Result<UserProfile> {
        let response = self
            .client
            .post(self.endpoint("/api/login"))
            .json(&LoginRequest { token: credential })
            .send()
            .await
            .map_err(|err| BylineError::auth_exchange(format!("login request failed: {err}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BylineError::auth_exchange(format!(
                "login exchange answered with status {status}"
            )));
        }

        let body: LoginResponse = response.json().await.map_err(|err| {
            BylineError::auth_exchange(format!("malformed login response: {err}"))
        })?;

        Ok(UserProfile {
            name: body.name,
            email: body.email,
        })
    }
}

#[async_trait]
impl QueryGateway for HttpGateway {
    async fn query(&self, request: &QueryRequest, token: &str) -> Result<QueryAnswer> {
        let response = self
            .client
            .get(self.endpoint("/api/query/"))
            .query(&[
                ("index", request.index.as_str()),
                ("query", request.text.as_str()),
                ("token", token),
            ])
            .send()
            .await
            .map_err(|err| BylineError::transient(format!("query request failed: {err}")))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(BylineError::Unauthorized),
            status => {
                return Err(BylineError::transient(format!(
                    "query answered with status {status}"
                )));
            }
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|err| BylineError::transient(format!("malformed query response: {err}")))?;

        Ok(QueryAnswer {
            answer: body.response,
            query_time: body.query_time,
            response_time: body.response_time,
        })
    }
}

#[async_trait]
impl HealthGateway for HttpGateway {
    async fn service_health(&self) -> Result<ServiceHealth> {
        let response = self
            .client
            .get(self.endpoint("/api/get_message/"))
            .send()
            .await
            .map_err(|err| BylineError::transient(format!("health request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BylineError::transient(format!(
                "health endpoint answered with status {status}"
            )));
        }

        let body: MessageResponse = response
            .json()
            .await
            .map_err(|err| BylineError::transient(format!("malformed health response: {err}")))?;

        Ok(ServiceHealth {
            message: body.message,
            model: body.model,
        })
    }
}

#[async_trait]
impl TimerGateway for HttpGateway {
    async fn timer_sample(&self, timer: TimerKind) -> Result<TimerSample> {
        let path = match timer {
            TimerKind::Query => "/get_timer",
            TimerKind::Response => "/get_timerR",
        };

        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|err| BylineError::transient(format!("timer request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BylineError::transient(format!(
                "timer endpoint answered with status {status}"
            )));
        }

        let body: TimerResponse = response
            .json()
            .await
            .map_err(|err| BylineError::transient(format!("malformed timer response: {err}")))?;

        Ok(parse_timer_sample(&body))
    }
}

/// Maps the wire representation onto a sample. Unknown or missing
/// statuses read as idle; the duration comes over the wire as a
/// number-in-a-string.
fn parse_timer_sample(body: &TimerResponse) -> TimerSample {
    let status = match body.status.as_str() {
        "running" => TimerStatus::Running,
        "stopped" => TimerStatus::Stopped,
        _ => return TimerSample::idle(),
    };

    let elapsed_secs = body.duration.trim().parse().unwrap_or_else(|_| {
        tracing::debug!(target: "status_poll", duration = %body.duration, "unparseable timer duration");
        0.0
    });

    TimerSample {
        status,
        elapsed_secs,
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    response: String,
    #[serde(default)]
    query_time: Option<f64>,
    #[serde(default)]
    response_time: Option<f64>,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
    model: String,
}

#[derive(Deserialize)]
struct TimerResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    duration: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_response_parses_with_and_without_times() {
        let body: QueryResponse =
            serde_json::from_str(r#"{"response":"world","query_time":1.2,"response_time":0.3}"#)
                .unwrap();
        assert_eq!(body.response, "world");
        assert_eq!(body.query_time, Some(1.2));
        assert_eq!(body.response_time, Some(0.3));

        let body: QueryResponse = serde_json::from_str(r#"{"response":"world"}"#).unwrap();
        assert_eq!(body.query_time, None);
        assert_eq!(body.response_time, None);
    }

    #[test]
    fn timer_sample_maps_wire_statuses() {
        let body: TimerResponse =
            serde_json::from_str(r#"{"status":"running","duration":"5.00"}"#).unwrap();
        assert_eq!(parse_timer_sample(&body), TimerSample::running(5.0));

        let body: TimerResponse =
            serde_json::from_str(r#"{"status":"stopped","duration":"2.50"}"#).unwrap();
        assert_eq!(parse_timer_sample(&body), TimerSample::stopped(2.5));

        let body: TimerResponse = serde_json::from_str(r#"{"status":"idle"}"#).unwrap();
        assert_eq!(parse_timer_sample(&body), TimerSample::idle());

        let body: TimerResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parse_timer_sample(&body), TimerSample::idle());
    }

    #[test]
    fn unparseable_duration_reads_as_zero() {
        let body: TimerResponse =
            serde_json::from_str(r#"{"status":"running","duration":"n/a"}"#).unwrap();
        assert_eq!(parse_timer_sample(&body), TimerSample::running(0.0));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let gateway = HttpGateway::new("http://localhost:5001/").unwrap();
        assert_eq!(
            gateway.endpoint("/api/query/"),
            "http://localhost:5001/api/query/"
        );
    }

    #[test]
    fn login_request_serializes_the_wire_field() {
        let body = serde_json::to_string(&LoginRequest { token: "abc" }).unwrap();
        assert_eq!(body, r#"{"token":"abc"}"#);
    }
}
