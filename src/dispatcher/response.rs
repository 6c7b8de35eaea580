use serde_json::Value;
use std::sync::Arc;

use super::request::HeaderVec;

/// Body published when no route accepts the request
pub const NOT_FOUND_BODY: &str = "Route not found. Error 404";

pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json; charset=utf-8";

/// The single response published for one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    /// HTTP status code (200, 302, 404, ...)
    pub status: u16,
    pub headers: HeaderVec,
    pub body: String,
}

impl DispatchResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), TEXT_HTML.to_string()));
        Self::new(status, headers, body.into())
    }

    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), APPLICATION_JSON.to_string()));
        Self::new(status, headers, body.to_string())
    }

    /// The standard not-found response
    #[must_use]
    pub fn not_found() -> Self {
        Self::text(404, NOT_FOUND_BODY)
    }

    #[must_use]
    pub fn redirect(location: &str) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("location"), location.to_string()));
        Self::new(302, headers, String::new())
    }

    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// What a handler hands back to the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    /// Rendered text or HTML, published as `text/html`
    Text(String),
    /// Structured data, published as serialized JSON
    Json(Value),
    /// A fully-formed response, published as-is
    Response(DispatchResponse),
}

impl HandlerOutput {
    pub fn text(body: impl Into<String>) -> Self {
        HandlerOutput::Text(body.into())
    }

    pub fn json(body: Value) -> Self {
        HandlerOutput::Json(body)
    }

    /// Bind the output as a response; text and JSON succeed with 200
    #[must_use]
    pub fn into_response(self) -> DispatchResponse {
        match self {
            HandlerOutput::Text(body) => DispatchResponse::text(200, body),
            HandlerOutput::Json(body) => DispatchResponse::json(200, &body),
            HandlerOutput::Response(resp) => resp,
        }
    }
}

impl From<String> for HandlerOutput {
    fn from(s: String) -> Self {
        HandlerOutput::Text(s)
    }
}

impl From<&str> for HandlerOutput {
    fn from(s: &str) -> Self {
        HandlerOutput::Text(s.to_string())
    }
}

impl From<Value> for HandlerOutput {
    fn from(v: Value) -> Self {
        HandlerOutput::Json(v)
    }
}

impl From<DispatchResponse> for HandlerOutput {
    fn from(r: DispatchResponse) -> Self {
        HandlerOutput::Response(r)
    }
}
