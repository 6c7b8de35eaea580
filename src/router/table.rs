//! Route table: routes bucketed by path segment count.
//!
//! Bucketing only narrows the search space. Within a bucket routes keep their
//! registration order, so "first match wins" is unaffected.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::pattern::CompiledPattern;
use crate::spec::RouteTemplate;

/// Number of `/`-delimited pieces in `path` (`/` and `/a` → 2, `/a/` → 3)
#[inline]
#[must_use]
pub fn segment_count(path: &str) -> usize {
    path.split('/').count()
}

/// A route template paired with its compiled pattern
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub template: RouteTemplate,
    pub pattern: CompiledPattern,
}

impl CompiledRoute {
    pub fn compile(template: RouteTemplate) -> Result<Self> {
        let pattern = CompiledPattern::compile(&template)?;
        Ok(Self { template, pattern })
    }
}

/// Immutable index from segment count to the routes having that count
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    buckets: HashMap<usize, Vec<Arc<CompiledRoute>>>,
    len: usize,
}

impl RouteTable {
    /// Compile every route and bucket it by its own segment count
    ///
    /// Fails when a pattern cannot be compiled; that is a registration error
    /// and never surfaces at dispatch time.
    pub fn build(routes: Vec<RouteTemplate>) -> Result<Self> {
        let mut buckets: HashMap<usize, Vec<Arc<CompiledRoute>>> = HashMap::new();
        let len = routes.len();
        for template in routes {
            let key = template.segment_count();
            let compiled = CompiledRoute::compile(template)?;
            buckets.entry(key).or_default().push(Arc::new(compiled));
        }

        info!(
            routes_count = len,
            buckets = buckets.len(),
            "Route table built"
        );
        Ok(Self { buckets, len })
    }

    /// Build from routes a registration source already bucketed
    ///
    /// Every route must sit under the key equal to its own segment count.
    pub fn from_buckets(source: HashMap<usize, Vec<RouteTemplate>>) -> Result<Self> {
        let mut buckets = HashMap::with_capacity(source.len());
        let mut len = 0;
        for (key, routes) in source {
            let mut compiled = Vec::with_capacity(routes.len());
            for template in routes {
                if template.segment_count() != key {
                    bail!(
                        "route {} {} has {} segments but was bucketed under {}",
                        template.method,
                        template.url,
                        template.segment_count(),
                        key
                    );
                }
                compiled.push(Arc::new(CompiledRoute::compile(template)?));
            }
            len += compiled.len();
            buckets.insert(key, compiled);
        }

        info!(routes_count = len, buckets = buckets.len(), "Route table loaded");
        Ok(Self { buckets, len })
    }

    /// Routes sharing the request path's segment count, in registration order
    ///
    /// Empty when no bucket exists for that count.
    #[must_use]
    pub fn candidates(&self, path: &str) -> &[Arc<CompiledRoute>] {
        let key = segment_count(path);
        match self.buckets.get(&key) {
            Some(bucket) => bucket,
            None => {
                debug!(path = %path, segments = key, "No route bucket for segment count");
                &[]
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All routes, grouped by ascending segment count
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CompiledRoute>> {
        let mut keys: Vec<_> = self.buckets.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
            .filter_map(move |k| self.buckets.get(&k))
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{DispatchRequest, HandlerOutput};

    fn noop(_: &DispatchRequest) -> HandlerOutput {
        HandlerOutput::text("")
    }

    fn urls(routes: &[Arc<CompiledRoute>]) -> Vec<&str> {
        routes.iter().map(|r| r.template.url.as_str()).collect()
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count("/"), 2);
        assert_eq!(segment_count("/view"), 2);
        assert_eq!(segment_count("/view/"), 3);
        assert_eq!(segment_count("/test/1"), 3);
    }

    #[test]
    fn test_buckets_keep_registration_order() {
        let table = RouteTable::build(vec![
            RouteTemplate::get("/test/@id", noop),
            RouteTemplate::get("/test", noop),
            RouteTemplate::get("/test/id/1", noop),
            RouteTemplate::get("/other/x", noop),
        ])
        .unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(urls(table.candidates("/test/1")), vec!["/test/@id", "/other/x"]);
        assert_eq!(urls(table.candidates("/a/b/c")), vec!["/test/id/1"]);
        assert!(table.candidates("/a/b/c/d/e").is_empty());
    }

    #[test]
    fn test_from_buckets_rejects_misfiled_route() {
        let mut source = HashMap::new();
        source.insert(3, vec![RouteTemplate::get("/view", noop)]);
        let err = RouteTable::from_buckets(source).unwrap_err();
        assert!(err.to_string().contains("bucketed under 3"));
    }

    #[test]
    fn test_from_buckets_accepts_prebucketed_routes() {
        let mut source = HashMap::new();
        source.insert(2, vec![RouteTemplate::get("/view", noop), RouteTemplate::get("/", noop)]);
        let table = RouteTable::from_buckets(source).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(urls(table.candidates("/x")), vec!["/view", "/"]);
    }

    #[test]
    fn test_build_rejects_malformed_templates() {
        let err = RouteTable::build(vec![
            RouteTemplate::get("/ok", noop),
            RouteTemplate::get("/u/@id:integr", noop),
        ])
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown parameter kind"));

        let err = RouteTable::build(vec![RouteTemplate::get("/u/@id/@id", noop)]).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate parameter `id`"));

        let mut source = HashMap::new();
        source.insert(4, vec![RouteTemplate::get("/u/@id/@id", noop)]);
        assert!(RouteTable::from_buckets(source).is_err());
    }

    #[test]
    fn test_iter_orders_by_segment_count() {
        let table = RouteTable::build(vec![
            RouteTemplate::get("/a/b", noop),
            RouteTemplate::get("/a", noop),
        ])
        .unwrap();
        let all: Vec<_> = table.iter().map(|r| r.template.url.as_str()).collect();
        assert_eq!(all, vec!["/a", "/a/b"]);
    }
}
