//! # routedispatch
//!
//! The request-routing and middleware-dispatch core of a web framework.
//!
//! Given one incoming request (method, path, host) it finds the single
//! matching registered route, binds path parameters, runs ordered
//! before/after middleware around the handler, and publishes exactly one
//! response.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Route declarations (`@param` templates, domain constraints, middleware ids)
//! - **[`router`]** - Pattern compilation, segment-count bucketing, matching, subdomain gate
//! - **[`middleware`]** - `before`/`after` middleware, the route middleware registry, built-ins
//! - **[`dispatcher`]** - Per-request orchestration and the published [`DispatchResult`]
//! - **[`runtime_config`]** - Debug and subdomain settings from env, YAML or TOML
//! - **[`otel`]** - `tracing` subscriber setup
//!
//! ### Request Handling Flow
//!
//! ```text
//! request ──► segment count ──► bucket of candidates
//!                                  │ first path+method+subdomain fit
//!                  ┌───────────────┴───────────────┐
//!               no fit                           match
//!                  │                               │ bind params
//!          404 "Route not found.        global before → route before
//!             Error 404"                           │
//!                                      handler (skipped if redirect pending)
//!                                                  │
//!                                      route after → global after
//!                                                  │
//!                                           DispatchResult
//! ```
//!
//! ## Concurrency
//!
//! A [`Dispatcher`] is `Send + Sync`. The route table is immutable once built
//! and read through an `ArcSwap` snapshot, so dispatches on many threads share
//! it without locking. Each dispatch owns its request exclusively.
//!
//! ## Quick Start
//!
//! ```rust
//! use routedispatch::{
//!     DispatchRequest, Dispatcher, HandlerOutput, Middleware, MiddlewareRegistry, RouteTemplate,
//!     Router,
//! };
//! use std::sync::Arc;
//!
//! struct RequireLogin;
//!
//! impl Middleware for RequireLogin {
//!     fn before(&self, req: &mut DispatchRequest) {
//!         if req.get_header("authorization").is_none() {
//!             req.redirect("/login");
//!         }
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let router = Router::new(vec![
//!     RouteTemplate::get("/dashboard", |_: &DispatchRequest| HandlerOutput::text("hi"))
//!         .middleware("auth"),
//! ])?;
//!
//! let mut dispatcher = Dispatcher::new(router);
//! dispatcher.set_route_middleware(MiddlewareRegistry::new().with("auth", Arc::new(RequireLogin)));
//!
//! let result = dispatcher.dispatch(DispatchRequest::get("/dashboard"));
//! assert_eq!(result.response.status, 302);
//! assert_eq!(result.response.get_header("location"), Some("/login"));
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod ids;
pub mod middleware;
pub mod otel;
pub mod router;
pub mod runtime_config;
pub mod spec;

pub use dispatcher::{
    DispatchOutcome, DispatchRequest, DispatchResponse, DispatchResult, Dispatcher, Handler,
    HandlerOutput,
};
pub use middleware::{Middleware, MiddlewareRegistry};
pub use router::{RouteMatch, Router};
pub use runtime_config::RuntimeConfig;
pub use spec::RouteTemplate;
