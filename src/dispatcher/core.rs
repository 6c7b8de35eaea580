//! Dispatcher core module - per-request orchestration.

use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::request::DispatchRequest;
use super::response::{DispatchResponse, HandlerOutput};
use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::router::{RouteMatch, Router};
use crate::runtime_config::RuntimeConfig;

/// Route handler: turns a bound request into output
///
/// Implemented for any `Fn(&DispatchRequest) -> HandlerOutput`.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &DispatchRequest) -> HandlerOutput;
}

impl<F> Handler for F
where
    F: Fn(&DispatchRequest) -> HandlerOutput + Send + Sync,
{
    fn handle(&self, req: &DispatchRequest) -> HandlerOutput {
        self(req)
    }
}

/// Whether a dispatch found a route
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    Found(RouteMatch),
    NotFound,
}

/// Everything a dispatch publishes: the outcome, the request as middleware
/// left it, and the one response
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub outcome: DispatchOutcome,
    pub request: DispatchRequest,
    pub response: DispatchResponse,
}

impl DispatchResult {
    fn not_found(request: DispatchRequest) -> Self {
        Self {
            outcome: DispatchOutcome::NotFound,
            request,
            response: DispatchResponse::not_found(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Found(_))
    }

    pub fn route_match(&self) -> Option<&RouteMatch> {
        match &self.outcome {
            DispatchOutcome::Found(m) => Some(m),
            DispatchOutcome::NotFound => None,
        }
    }

    #[must_use]
    pub fn into_response(self) -> DispatchResponse {
        self.response
    }
}

/// Runs one request through match, middleware and handler
///
/// Stage order for a matched request is fixed:
/// global before → route before → handler → route after → global after.
/// A request that matches nothing runs no middleware at all.
///
/// The router sits behind an [`ArcSwap`]: each dispatch works on one snapshot,
/// so [`Dispatcher::replace_router`] never disturbs in-flight requests.
pub struct Dispatcher {
    router: ArcSwap<Router>,
    /// Global middleware, applied to every matched request in order
    pub middlewares: Vec<Arc<dyn Middleware>>,
    route_middleware: MiddlewareRegistry,
    config: RuntimeConfig,
}

impl Dispatcher {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            router: ArcSwap::from_pointee(router),
            middlewares: Vec::new(),
            route_middleware: MiddlewareRegistry::new(),
            config: RuntimeConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Add global middleware
    ///
    /// Global middleware runs for every matched request, in the order added.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Install the registry route-declared middleware identifiers resolve from
    pub fn set_route_middleware(&mut self, registry: MiddlewareRegistry) {
        self.route_middleware = registry;
    }

    pub fn route_middleware_mut(&mut self) -> &mut MiddlewareRegistry {
        &mut self.route_middleware
    }

    /// Snapshot of the current router
    #[must_use]
    pub fn router(&self) -> Arc<Router> {
        self.router.load_full()
    }

    /// Atomically swap in a new route table
    pub fn replace_router(&self, router: Router) {
        info!(
            routes_count = router.table().len(),
            "Replacing route table"
        );
        self.router.store(Arc::new(router));
    }

    /// Dispatch one request and publish its response
    ///
    /// Never fails: an unmatched request, or one refused by every candidate's
    /// subdomain gate, yields the not-found response.
    pub fn dispatch(&self, mut request: DispatchRequest) -> DispatchResult {
        let router = self.router.load();
        let subdomain = request.subdomain(self.config.activate_subdomains);

        let Some(route_match) =
            router.match_route(&request.method, &request.path, subdomain.as_deref())
        else {
            warn!(
                request_id = %request.request_id,
                method = %request.method,
                path = %request.path,
                "Publishing not found"
            );
            return DispatchResult::not_found(request);
        };

        request.set_params(route_match.path_params.clone());

        let template = route_match.template();
        let route_mws = self
            .route_middleware
            .resolve_all(template.middleware.identifiers());

        debug!(
            request_id = %request.request_id,
            global_middleware = self.middlewares.len(),
            route_middleware = route_mws.len(),
            "Middleware before execution"
        );
        for mw in &self.middlewares {
            mw.before(&mut request);
        }

        if self.config.debug {
            info!("{} Route: {}", template.method, request.path);
        }

        for mw in &route_mws {
            mw.before(&mut request);
        }

        let start = Instant::now();
        let mut response = match request.redirect_url() {
            Some(location) => {
                debug!(
                    request_id = %request.request_id,
                    location = %location,
                    "Redirect pending, handler skipped"
                );
                DispatchResponse::redirect(location)
            }
            None => {
                info!(
                    request_id = %request.request_id,
                    method = %request.method,
                    path = %request.path,
                    route = %template.url,
                    "Request dispatched to handler"
                );
                template.invoke(&request).into_response()
            }
        };
        let latency: Duration = start.elapsed();

        debug!(
            request_id = %request.request_id,
            response_status = response.status,
            latency_us = latency.as_micros() as u64,
            "Middleware after execution"
        );
        for mw in &route_mws {
            mw.after(&request, &mut response, latency);
        }
        for mw in &self.middlewares {
            mw.after(&request, &mut response, latency);
        }

        DispatchResult {
            outcome: DispatchOutcome::Found(route_match),
            request,
            response,
        }
    }
}
