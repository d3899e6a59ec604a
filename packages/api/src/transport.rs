//! # HTTP transport
//!
//! Every request the front end makes goes through [`HttpTransport`]. Pages and
//! controllers only ever see [`ApiRequest`] / [`ApiResponse`], so tests swap in
//! a scripted transport and the browser build uses [`ReqwestTransport`], which
//! compiles to `fetch` on wasm.
//!
//! Responses are returned for *every* status code; turning a non-2xx status
//! into an [`ApiError`] is the caller's decision via
//! [`ApiResponse::into_result`]. The login call needs this because the backend
//! sends a JSON `{success: false, message}` body along with its 401.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// The HTTP verbs the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request with an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            body: None,
        }
    }

    /// Build a request carrying `body` serialised as JSON.
    pub fn with_json<B: Serialize>(method: Method, url: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self {
            method,
            url: url.into(),
            body: Some(body),
        })
    }
}

/// A fully-read response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Bad gateway / gateway timeout from the proxy in front of the backend.
    pub fn is_gateway(&self) -> bool {
        matches!(self.status, 502 | 504)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Pass 2xx responses through and turn anything else into [`ApiError::Status`].
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                message: self.error_message(),
            })
        }
    }

    /// Best human-readable explanation for a failed response: the JSON `error`
    /// or `message` field, then the raw body, then the bare status.
    pub fn error_message(&self) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&self.body) {
            for field in ["error", "message"] {
                if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                    if !text.trim().is_empty() {
                        return text.to_string();
                    }
                }
            }
        }
        let text = self.body.trim();
        if text.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            text.to_string()
        }
    }
}

/// Async interface for sending requests.
pub trait HttpTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>>;
}

/// `reqwest`-backed transport; uses the browser's `fetch` on wasm.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}

/// GET `url` and decode a 2xx JSON body.
pub async fn fetch_json<T: DeserializeOwned, H: HttpTransport>(transport: &H, url: &str) -> Result<T, ApiError> {
    transport.send(ApiRequest::get(url)).await?.into_result()?.json()
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted transport for controller tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Default)]
    pub struct MockTransport {
        responses: Rc<RefCell<VecDeque<Result<ApiResponse, ApiError>>>>,
        requests: Rc<RefCell<Vec<ApiRequest>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a JSON response with the given status.
        pub fn respond(&self, status: u16, body: &str) -> &Self {
            self.responses.borrow_mut().push_back(Ok(ApiResponse {
                status,
                content_type: Some("application/json".to_string()),
                body: body.to_string(),
            }));
            self
        }

        /// Queue a plain-text response.
        pub fn respond_text(&self, status: u16, body: &str) -> &Self {
            self.responses.borrow_mut().push_back(Ok(ApiResponse {
                status,
                content_type: Some("text/plain".to_string()),
                body: body.to_string(),
            }));
            self
        }

        /// Queue a transport-level failure.
        pub fn fail(&self, reason: &str) -> &Self {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Network(reason.to_string())));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.borrow().clone()
        }

        pub fn methods(&self) -> Vec<Method> {
            self.requests.borrow().iter().map(|r| r.method).collect()
        }
    }

    impl HttpTransport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
        }
    }
}
