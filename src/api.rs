//! REST client for the record-system backend.
//!
//! One fixed base URL (origin + `/api`), JSON bodies, and a CSRF token on
//! every state-changing request. Panels talk to the [`Backend`] trait so
//! tests can substitute an in-memory fake for the real HTTP client.

use serde_json::Value;

/// CSRF header name expected by the backend on unsafe methods.
const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    Create,
    Replace,
    PartialUpdate,
}

impl WriteMethod {
    pub fn http_name(self) -> &'static str {
        match self {
            WriteMethod::Create => "POST",
            WriteMethod::Replace => "PUT",
            WriteMethod::PartialUpdate => "PATCH",
        }
    }
}

/// Errors from the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request itself failed (connect, DNS, TLS, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {detail}")]
    Status {
        status: u16,
        /// Error detail pulled from the response body.
        detail: String,
    },
}

/// The seam between the UI panels and the network.
///
/// Paths are relative to the API base and always end in a trailing slash
/// (`/students/`, `/students/5/`), mirroring the backend's router.
pub trait Backend {
    fn fetch_collection(&self, path: &str) -> Result<Vec<Value>, ApiError>;
    fn fetch_record(&self, path: &str) -> Result<Value, ApiError>;
    fn submit_record(
        &self,
        path: &str,
        method: WriteMethod,
        payload: &Value,
    ) -> Result<Value, ApiError>;
    fn delete_record(&self, path: &str) -> Result<(), ApiError>;
}

/// Blocking HTTP implementation of [`Backend`].
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    csrf_token: String,
}

impl ApiClient {
    pub fn new(base_url: String, csrf_token: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url,
            csrf_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to `ApiError::Status`, pulling the detail
    /// from the JSON error body the backend sends on read/write failures.
    fn ensure_success_json(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .map(|v| v.to_string())
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), %detail, "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(response)
    }
}

impl Backend for ApiClient {
    fn fetch_collection(&self, path: &str) -> Result<Vec<Value>, ApiError> {
        let response = self.http.get(self.url(path)).send()?;
        let response = Self::ensure_success_json(response)?;
        Ok(response.json::<Vec<Value>>()?)
    }

    fn fetch_record(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.http.get(self.url(path)).send()?;
        let response = Self::ensure_success_json(response)?;
        Ok(response.json::<Value>()?)
    }

    fn submit_record(
        &self,
        path: &str,
        method: WriteMethod,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        let request = match method {
            WriteMethod::Create => self.http.post(self.url(path)),
            WriteMethod::Replace => self.http.put(self.url(path)),
            WriteMethod::PartialUpdate => self.http.patch(self.url(path)),
        };
        let response = request
            .header(CSRF_HEADER, &self.csrf_token)
            .json(payload)
            .send()?;
        let response = Self::ensure_success_json(response)?;

        // 204 No Content and friends come back without a JSON body.
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Ok(Value::Null);
        }
        Ok(response.json::<Value>()?)
    }

    fn delete_record(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(path))
            .header(CSRF_HEADER, &self.csrf_token)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            // The delete path reports plain text, not JSON.
            let detail = response
                .text()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), %detail, "delete rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(())
    }
}
