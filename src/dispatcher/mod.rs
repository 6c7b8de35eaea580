//! # Dispatcher Module
//!
//! Ties routing, middleware and handler invocation together for one request.
//!
//! ## Request Flow
//!
//! 1. Count the request path's segments and fetch that bucket of routes
//! 2. Scan candidates; the first path + method + subdomain fit wins
//! 3. No fit → publish the not-found response, run no middleware
//! 4. Bind path parameters onto the request
//! 5. Run global `before` hooks, then the route's `before` hooks
//! 6. Invoke the handler unless a redirect is already pending
//! 7. Run the route's `after` hooks, then global `after` hooks
//! 8. Publish the response as part of a [`DispatchResult`]
//!
//! ## Error Handling
//!
//! Dispatch never fails. Missing hooks are no-ops, parameters that cannot be
//! bound are left unbound, unknown middleware identifiers resolve to nothing.
//!
//! ## Example
//!
//! ```rust
//! use routedispatch::dispatcher::{DispatchRequest, Dispatcher, HandlerOutput};
//! use routedispatch::router::Router;
//! use routedispatch::spec::RouteTemplate;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let router = Router::new(vec![RouteTemplate::get("/pets/@id", |req: &DispatchRequest| {
//!     HandlerOutput::json(json!({ "id": req.param("id") }))
//! })])?;
//! let dispatcher = Dispatcher::new(router);
//!
//! let result = dispatcher.dispatch(DispatchRequest::get("/pets/7"));
//! assert_eq!(result.response.status, 200);
//! assert_eq!(result.response.body, r#"{"id":"7"}"#);
//!
//! let missing = dispatcher.dispatch(DispatchRequest::get("/owners/7"));
//! assert_eq!(missing.response.status, 404);
//! # Ok(())
//! # }
//! ```

mod core;
mod request;
mod response;

pub use self::core::{DispatchOutcome, DispatchResult, Dispatcher, Handler};
pub use request::{DispatchRequest, HeaderVec, MAX_INLINE_HEADERS};
pub use response::{
    DispatchResponse, HandlerOutput, APPLICATION_JSON, NOT_FOUND_BODY, TEXT_HTML,
};
