//! HTTP client for the game backend.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, StatusCode};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;

use crate::protocol::{BackendState, StartRequest, StartResponse, StepRequest};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Base URL of the backend, from `PLAYGROUND_BACKEND_URL` if set.
pub fn resolve_backend_url<F>(mut get_env: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let url = get_env("PLAYGROUND_BACKEND_URL")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    url.trim_end_matches('/').to_string()
}

#[derive(Debug)]
pub enum BackendError {
    Request(hyper::http::Error),
    Transport(hyper_util::client::legacy::Error),
    Body(hyper::Error),
    Status(StatusCode),
    Json(serde_json::Error),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Request(e) => write!(f, "backend request build failed: {e}"),
            BackendError::Transport(e) => write!(f, "backend unreachable: {e}"),
            BackendError::Body(e) => write!(f, "backend response body failed: {e}"),
            BackendError::Status(code) => write!(f, "backend returned {code}"),
            BackendError::Json(e) => write!(f, "backend sent invalid JSON: {e}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Request(e) => Some(e),
            BackendError::Transport(e) => Some(e),
            BackendError::Body(e) => Some(e),
            BackendError::Status(_) => None,
            BackendError::Json(e) => Some(e),
        }
    }
}

impl From<hyper::http::Error> for BackendError {
    fn from(e: hyper::http::Error) -> Self {
        BackendError::Request(e)
    }
}

impl From<hyper_util::client::legacy::Error> for BackendError {
    fn from(e: hyper_util::client::legacy::Error) -> Self {
        BackendError::Transport(e)
    }
}

impl From<hyper::Error> for BackendError {
    fn from(e: hyper::Error) -> Self {
        BackendError::Body(e)
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::Json(e)
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`; any transport or status failure reads as "down".
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        let Ok(req) = Request::builder()
            .method(Method::GET)
            .uri(url)
            .body(Full::new(Bytes::new()))
        else {
            return false;
        };
        match self.client.request(req).await {
            Ok(res) => res.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn start(&self, request: &StartRequest) -> Result<StartResponse, BackendError> {
        let url = format!("{}/api/game/start", self.base_url);
        self.post_json(&url, request).await
    }

    pub async fn step(
        &self,
        session_id: &str,
        action: i32,
    ) -> Result<BackendState, BackendError> {
        let url = format!("{}/api/game/{session_id}/step", self.base_url);
        self.post_json(&url, &StepRequest { action }).await
    }

    async fn post_json<T, R>(&self, url: &str, payload: &T) -> Result<R, BackendError>
    where
        T: serde::Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(payload)?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;

        let res = self.client.request(req).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        let bytes = res.into_body().collect().await?.to_bytes();
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_defaults_to_local_port_8000() {
        assert_eq!(resolve_backend_url(|_| None), "http://127.0.0.1:8000");
    }

    #[test]
    fn backend_url_prefers_env_and_strips_trailing_slash() {
        let url = resolve_backend_url(|k| match k {
            "PLAYGROUND_BACKEND_URL" => Some("http://10.0.0.5:9001/".to_string()),
            _ => None,
        });
        assert_eq!(url, "http://10.0.0.5:9001");
    }

    #[test]
    fn blank_env_value_falls_back_to_default() {
        let url = resolve_backend_url(|_| Some("   ".to_string()));
        assert_eq!(url, "http://127.0.0.1:8000");
    }
}
