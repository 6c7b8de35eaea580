//! Router core module - hot path for request routing.

use anyhow::Result;
use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::domain::{check_domain, DomainDecision};
use super::table::{CompiledRoute, RouteTable};
use crate::spec::RouteTemplate;

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because they come from the compiled route table
/// and are shared by every match; values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Name under which an active subdomain is bound alongside path parameters
pub const SUBDOMAIN_PARAM: &str = "subdomain";

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (shared with the route table)
    pub route: Arc<CompiledRoute>,
    /// Parameters extracted from the URL (e.g., `@id` → `{"id": "123"}`)
    pub path_params: ParamVec,
    /// Subdomain the route was accepted for, if any
    pub subdomain: Option<String>,
}

impl RouteMatch {
    pub fn template(&self) -> &RouteTemplate {
        &self.route.template
    }

    /// Get a path parameter by name
    ///
    /// Last write wins if a name appears twice.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Note: This allocates - use get_path_param() in hot paths instead
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Matches requests against a segment-bucketed [`RouteTable`]
///
/// Candidates sharing the path's segment count are tried in registration
/// order; the first whose pattern and method match, and whose domain
/// constraint admits the request's subdomain, wins. Specificity plays no role.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    /// Compile and index `routes`
    pub fn new(routes: Vec<RouteTemplate>) -> Result<Self> {
        Ok(Self::from_table(RouteTable::build(routes)?))
    }

    #[must_use]
    pub fn from_table(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        println!("[routes] {} registered", self.table.len());
        for route in self.table.iter() {
            println!(
                "[route] {} {} -> {}",
                route.template.method,
                route.template.url,
                route.pattern.as_str()
            );
        }
    }

    /// Find the route for `method` + `path`
    ///
    /// `subdomain` is the request's active subdomain. A candidate that matches
    /// path and method but is refused by the subdomain gate is skipped and the
    /// scan continues; `None` is returned only once every candidate has failed.
    #[must_use]
    pub fn match_route(
        &self,
        method: &Method,
        path: &str,
        subdomain: Option<&str>,
    ) -> Option<RouteMatch> {
        let start = Instant::now();
        let candidates = self.table.candidates(path);

        debug!(
            method = %method,
            path = %path,
            candidates = candidates.len(),
            "Scanning route candidates"
        );

        for route in candidates {
            if route.template.method != *method {
                continue;
            }
            let Some(captures) = route.pattern.captures(path) else {
                continue;
            };

            if check_domain(subdomain, &route.template) == DomainDecision::Deny {
                debug!(
                    route = %route.template.url,
                    subdomain = ?subdomain,
                    "Route refused by subdomain gate"
                );
                continue;
            }

            let mut path_params = bind_params(route.pattern.param_names(), &captures)
                .unwrap_or_else(|| {
                    debug!(
                        route = %route.template.url,
                        captured = captures.len(),
                        expected = route.pattern.param_names().len(),
                        "Parameter capture mismatch, leaving parameters unbound"
                    );
                    ParamVec::new()
                });
            if let Some(sub) = subdomain {
                path_params.push((Arc::from(SUBDOMAIN_PARAM), sub.to_string()));
            }

            info!(
                method = %method,
                path = %path,
                route_pattern = %route.template.url,
                path_params = ?path_params,
                duration_us = start.elapsed().as_micros(),
                "Route matched"
            );

            return Some(RouteMatch {
                route: Arc::clone(route),
                path_params,
                subdomain: subdomain.map(str::to_string),
            });
        }

        debug!(
            method = %method,
            path = %path,
            subdomain = ?subdomain,
            duration_us = start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }
}

/// Pair captured values with parameter names; `None` if the counts differ
fn bind_params(names: &[Arc<str>], values: &[&str]) -> Option<ParamVec> {
    if names.len() != values.len() {
        return None;
    }
    Some(
        names
            .iter()
            .zip(values)
            .map(|(name, value)| (Arc::clone(name), (*value).to_string()))
            .collect(),
    )
}
