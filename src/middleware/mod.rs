//! # Middleware
//!
//! Two tiers of middleware wrap every matched request:
//!
//! - **Global** middleware, added with
//!   [`Dispatcher::add_middleware`](crate::dispatcher::Dispatcher::add_middleware),
//!   applies to every matched request.
//! - **Route** middleware is declared by identifier on a route and resolved
//!   through a [`MiddlewareRegistry`].
//!
//! Order is always global `before`, route `before`, handler, route `after`,
//! global `after`. Unmatched requests run neither tier.

mod core;
mod metrics;
mod registry;
mod tracing;

pub use self::core::Middleware;
pub use metrics::MetricsMiddleware;
pub use registry::MiddlewareRegistry;
pub use self::tracing::TracingMiddleware;
