// reqwest-backed telemetry source
use crate::application::error::FetchError;
use crate::application::telemetry_source::TelemetrySource;
use crate::infrastructure::http_client::{read_json, transport_error};
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    client: Client,
    latest_url: String,
    series_url: String,
}

impl HttpTelemetrySource {
    pub fn new(client: Client, latest_url: String, series_url: String) -> Self {
        Self {
            client,
            latest_url,
            series_url,
        }
    }
}

#[async_trait]
impl TelemetrySource for HttpTelemetrySource {
    async fn fetch_latest(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.latest_url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn fetch_series(&self, limit: usize) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.series_url)
            .query(&[("limit", limit)])
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::{build_client, test_server};
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn source(base: &str, timeout_ms: u64) -> HttpTelemetrySource {
        HttpTelemetrySource::new(
            build_client(Duration::from_millis(timeout_ms)).unwrap(),
            format!("{}/get_attitude", base),
            format!("{}/get_telemetry", base),
        )
    }

    #[tokio::test]
    async fn test_fetch_latest_returns_payload() {
        let router = Router::new().route(
            "/get_attitude",
            get(|| async { Json(json!({ "pitch": 1.0, "altitude": 9.5 })) }),
        );
        let base = test_server::spawn(router).await;

        let payload = source(&base, 1_000).fetch_latest().await.unwrap();

        assert_eq!(payload["altitude"], json!(9.5));
    }

    #[tokio::test]
    async fn test_fetch_series_passes_limit() {
        let router = Router::new().route(
            "/get_telemetry",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
                Json(json!((0..limit).map(|i| json!({ "altitude": i })).collect::<Vec<_>>()))
            }),
        );
        let base = test_server::spawn(router).await;

        let payload = source(&base, 1_000).fetch_series(3).await.unwrap();

        assert_eq!(payload.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_non_success_status_is_protocol_failure() {
        let router = Router::new().route(
            "/get_attitude",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let base = test_server::spawn(router).await;

        let err = source(&base, 1_000).fetch_latest().await.unwrap_err();

        assert_eq!(err, FetchError::Protocol(503));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_failure() {
        let router = Router::new().route("/get_attitude", get(|| async { "{not json" }));
        let base = test_server::spawn(router).await;

        let err = source(&base, 1_000).fetch_latest().await.unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let router = Router::new().route(
            "/get_attitude",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({}))
            }),
        );
        let base = test_server::spawn(router).await;

        let err = source(&base, 50).fetch_latest().await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = source(&base, 1_000).fetch_latest().await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }
}
