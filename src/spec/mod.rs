//! # Route Declarations
//!
//! Value types produced by a route registration source and consumed by the
//! [`router`](crate::router). Registration itself happens elsewhere; this module
//! only describes what a registered route looks like.
//!
//! A route URL is split on `/`. Segments starting with `@` are parameters, all
//! others are literals:
//!
//! ```rust
//! use routedispatch::spec::{RouteTemplate, Segment};
//! use routedispatch::dispatcher::{DispatchRequest, HandlerOutput};
//! use http::Method;
//!
//! # fn main() -> anyhow::Result<()> {
//! let route = RouteTemplate::new(Method::GET, "/users/@id:int", |_req: &DispatchRequest| {
//!     HandlerOutput::text("user")
//! })
//! .middleware("auth");
//!
//! assert_eq!(route.param_names(), vec!["id"]);
//! assert!(matches!(route.segments()?[1], Segment::Literal(ref s) if s == "users"));
//! # Ok(())
//! # }
//! ```

mod types;

pub use types::*;
