//! # Router Module
//!
//! Path matching and route resolution.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling `@param` route templates into anchored regex patterns
//! - Bucketing routes by path segment count
//! - Matching an incoming method + path to the first fitting route
//! - Gating matches by the request's subdomain
//! - Extracting path parameters from the matched route
//!
//! ## Architecture
//!
//! 1. **Compilation**: when the table is built, each URL such as `/pets/@id` is
//!    turned into a pattern like `^/pets/([^/]+)$` plus the names `["id"]`.
//!    A malformed template fails here, never during dispatch.
//!
//! 2. **Matching**: a request path is split on `/`; only routes with the same
//!    number of pieces are considered, in registration order. The first route
//!    whose pattern and method match and whose domain constraint admits the
//!    request wins.
//!
//! ## Example
//!
//! ```rust
//! use routedispatch::router::Router;
//! use routedispatch::spec::RouteTemplate;
//! use routedispatch::dispatcher::{DispatchRequest, HandlerOutput};
//! use http::Method;
//!
//! # fn main() -> anyhow::Result<()> {
//! let router = Router::new(vec![
//!     RouteTemplate::get("/pets/@id", |_: &DispatchRequest| HandlerOutput::text("pet")),
//! ])?;
//!
//! let m = router.match_route(&Method::GET, "/pets/123", None).unwrap();
//! assert_eq!(m.get_path_param("id"), Some("123"));
//! assert!(router.match_route(&Method::POST, "/pets/123", None).is_none());
//! # Ok(())
//! # }
//! ```

mod core;
pub mod domain;
pub mod pattern;
pub mod table;

pub use self::core::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS, SUBDOMAIN_PARAM};
pub use domain::{check_domain, subdomain_of, DomainDecision};
pub use pattern::{AnchorMode, CompiledPattern};
pub use table::{segment_count, CompiledRoute, RouteTable};
