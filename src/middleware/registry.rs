use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use super::Middleware;

enum Entry {
    Single(Arc<dyn Middleware>),
    Group(Vec<(String, Arc<dyn Middleware>)>),
}

/// Resolves route-declared middleware identifiers to instances
///
/// An identifier names either a single unit or an ordered group. A group is
/// resolved whole by its name, or one member at a time as `group.member`.
#[derive(Default)]
pub struct MiddlewareRegistry {
    entries: HashMap<String, Entry>,
}

impl MiddlewareRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single unit under `name`, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, mw: Arc<dyn Middleware>) {
        self.entries.insert(name.into(), Entry::Single(mw));
    }

    /// Register an ordered group of named units under `name`
    pub fn register_group<I, S>(&mut self, name: impl Into<String>, members: I)
    where
        I: IntoIterator<Item = (S, Arc<dyn Middleware>)>,
        S: Into<String>,
    {
        let members = members
            .into_iter()
            .map(|(member, mw)| (member.into(), mw))
            .collect();
        self.entries.insert(name.into(), Entry::Group(members));
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, mw: Arc<dyn Middleware>) -> Self {
        self.register(name, mw);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        !self.lookup(id).is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve one identifier to zero or more units
    ///
    /// Unknown identifiers resolve to nothing.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Vec<Arc<dyn Middleware>> {
        let found = self.lookup(id);
        if found.is_empty() {
            warn!(middleware = %id, "Unknown route middleware, skipping");
        }
        found
    }

    /// Resolve identifiers in declaration order
    #[must_use]
    pub fn resolve_all(&self, ids: &[String]) -> Vec<Arc<dyn Middleware>> {
        ids.iter().flat_map(|id| self.resolve(id)).collect()
    }

    fn lookup(&self, id: &str) -> Vec<Arc<dyn Middleware>> {
        match self.entries.get(id) {
            Some(Entry::Single(mw)) => return vec![Arc::clone(mw)],
            Some(Entry::Group(members)) => {
                return members.iter().map(|(_, mw)| Arc::clone(mw)).collect()
            }
            None => {}
        }

        let Some((group, member)) = id.split_once('.') else {
            return Vec::new();
        };
        match self.entries.get(group) {
            Some(Entry::Group(members)) => members
                .iter()
                .filter(|(name, _)| name == member)
                .map(|(_, mw)| Arc::clone(mw))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Debug for MiddlewareRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("MiddlewareRegistry")
            .field("entries", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::DispatchRequest;
    use serde_json::json;

    struct Tag(&'static str);

    impl Middleware for Tag {
        fn before(&self, req: &mut DispatchRequest) {
            let mut seen = req
                .attribute("tags")
                .and_then(|v| v.as_array().cloned())
                .unwrap_or_default();
            seen.push(json!(self.0));
            req.set_attribute("tags", json!(seen));
        }
    }

    fn tags(registry: &MiddlewareRegistry, ids: &[&str]) -> serde_json::Value {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        let mut req = DispatchRequest::get("/");
        for mw in registry.resolve_all(&ids) {
            mw.before(&mut req);
        }
        req.attribute("tags").cloned().unwrap_or(json!([]))
    }

    fn registry() -> MiddlewareRegistry {
        let mut registry = MiddlewareRegistry::new().with("auth", Arc::new(Tag("auth")));
        registry.register_group(
            "middleware",
            [
                ("test", Arc::new(Tag("test")) as Arc<dyn Middleware>),
                ("other", Arc::new(Tag("other")) as Arc<dyn Middleware>),
            ],
        );
        registry
    }

    #[test]
    fn test_single_identifier() {
        assert_eq!(tags(&registry(), &["auth"]), json!(["auth"]));
    }

    #[test]
    fn test_group_resolves_in_order() {
        assert_eq!(tags(&registry(), &["middleware"]), json!(["test", "other"]));
    }

    #[test]
    fn test_dotted_member() {
        assert_eq!(tags(&registry(), &["middleware.other"]), json!(["other"]));
        assert_eq!(
            tags(&registry(), &["middleware.test", "auth"]),
            json!(["test", "auth"])
        );
    }

    #[test]
    fn test_unknown_identifiers_resolve_to_nothing() {
        let registry = registry();
        assert!(registry.resolve("missing").is_empty());
        assert!(registry.resolve("middleware.missing").is_empty());
        assert!(registry.resolve("auth.member").is_empty());
        assert!(!registry.contains("missing"));
        assert!(registry.contains("middleware.test"));
        assert_eq!(tags(&registry, &["missing", "auth"]), json!(["auth"]));
    }
}
