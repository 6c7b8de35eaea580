use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::ids::{RequestId, REQUEST_ID_HEADER};
use crate::router::{subdomain_of, ParamVec};

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path
///
/// Header names use `Arc<str>` so repeated names clone in O(1).
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// One incoming request, owned by a single dispatch
///
/// Built by the transport adapter. Middleware receives it mutably during the
/// before stage and may attach attributes, rewrite headers or set a redirect.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    pub method: Method,
    /// Request path without query string
    pub path: String,
    /// `Host` value as received, port included
    pub host: Option<String>,
    pub headers: HeaderVec,
    /// Parameters bound from the matched route
    pub path_params: ParamVec,
    /// Free-form values set by middleware for handlers further down
    pub attributes: HashMap<String, Value>,
    subdomains: Option<bool>,
    redirect_url: Option<String>,
}

impl DispatchRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            host: None,
            headers: HeaderVec::new(),
            path_params: ParamVec::new(),
            attributes: HashMap::new(),
            subdomains: None,
            redirect_url: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Add a header; an `x-request-id` header also becomes the request id
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value.into());
        if name.eq_ignore_ascii_case(REQUEST_ID_HEADER) {
            self.request_id = RequestId::from_headers(&self.headers);
        }
        self
    }

    /// Opt this request into subdomain handling
    #[must_use]
    pub fn activate_subdomains(mut self) -> Self {
        self.subdomains = Some(true);
        self
    }

    /// Opt this request out of subdomain handling regardless of defaults
    #[must_use]
    pub fn deactivate_subdomains(mut self) -> Self {
        self.subdomains = Some(false);
        self
    }

    /// The active subdomain, if subdomain handling applies to this request
    ///
    /// `default_active` is used when the request did not opt in or out itself.
    #[must_use]
    pub fn subdomain(&self, default_active: bool) -> Option<String> {
        if !self.subdomains.unwrap_or(default_active) {
            return None;
        }
        self.host.as_deref().and_then(subdomain_of)
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// Get a path parameter by name (last write wins)
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_params(&mut self, params: ParamVec) {
        self.path_params = params;
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    /// Mark the request for redirection; the handler will not be invoked
    pub fn redirect(&mut self, url: impl Into<String>) {
        self.redirect_url = Some(url.into());
    }

    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    pub fn has_redirect(&self) -> bool {
        self.redirect_url.is_some()
    }
}
