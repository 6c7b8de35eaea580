use anyhow::{bail, Result};
use http::Method;
use std::fmt;
use std::sync::Arc;

use crate::dispatcher::{DispatchRequest, Handler, HandlerOutput};

/// Marker that opens a parameter segment (`/users/@id`)
pub const PARAM_MARKER: char = '@';

/// Constraint applied to a parameter segment via a `:kind` suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `@name` - any run of non-`/` characters
    Any,
    /// `@name:int` - ASCII digits only
    Int,
    /// `@name:string` - ASCII letters only
    Alpha,
}

impl ParamKind {
    /// Resolve a `:kind` suffix; unknown kinds are a registration error
    pub fn from_suffix(suffix: &str) -> Result<Self> {
        match suffix {
            "int" | "integer" => Ok(ParamKind::Int),
            "string" | "alpha" => Ok(ParamKind::Alpha),
            other => bail!("unknown parameter kind `{other}`"),
        }
    }

    /// Regex fragment (without the capture group) accepted by this kind
    pub fn pattern(self) -> &'static str {
        match self {
            ParamKind::Any => "[^/]+",
            ParamKind::Int => "[0-9]+",
            ParamKind::Alpha => "[A-Za-z]+",
        }
    }
}

/// One `/`-delimited piece of a route URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param { name: String, kind: ParamKind },
}

impl Segment {
    /// Parse one raw piece of a route URL
    pub fn parse(raw: &str) -> Result<Self> {
        let Some(rest) = raw.strip_prefix(PARAM_MARKER) else {
            return Ok(Segment::Literal(raw.to_string()));
        };
        let (name, kind) = match rest.split_once(':') {
            Some((name, suffix)) => (name, ParamKind::from_suffix(suffix)?),
            None => (rest, ParamKind::Any),
        };
        if name.is_empty() {
            bail!("parameter segment `{raw}` has no name");
        }
        Ok(Segment::Param {
            name: name.to_string(),
            kind,
        })
    }
}

/// Subdomain a route is willing to serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainConstraint {
    /// `*` - any subdomain
    Any,
    Exact(String),
    OneOf(Vec<String>),
}

impl DomainConstraint {
    /// Whether a request carrying `subdomain` may be served by this route
    #[must_use]
    pub fn allows(&self, subdomain: &str) -> bool {
        match self {
            DomainConstraint::Any => true,
            DomainConstraint::Exact(name) => name.eq_ignore_ascii_case(subdomain),
            DomainConstraint::OneOf(names) => {
                names.iter().any(|n| n.eq_ignore_ascii_case(subdomain))
            }
        }
    }
}

impl From<&str> for DomainConstraint {
    fn from(s: &str) -> Self {
        if s == "*" {
            DomainConstraint::Any
        } else {
            DomainConstraint::Exact(s.to_string())
        }
    }
}

/// Route-scoped middleware declaration
///
/// A route names its middleware either with a single identifier or an ordered
/// list; every identifier is resolved through the
/// [`MiddlewareRegistry`](crate::middleware::MiddlewareRegistry) at dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteMiddleware {
    #[default]
    None,
    Single(String),
    List(Vec<String>),
}

impl RouteMiddleware {
    /// Identifiers in declaration order
    pub fn identifiers(&self) -> &[String] {
        match self {
            RouteMiddleware::None => &[],
            RouteMiddleware::Single(id) => std::slice::from_ref(id),
            RouteMiddleware::List(ids) => ids,
        }
    }

    fn push(&mut self, id: String) {
        *self = match std::mem::take(self) {
            RouteMiddleware::None => RouteMiddleware::Single(id),
            RouteMiddleware::Single(first) => RouteMiddleware::List(vec![first, id]),
            RouteMiddleware::List(mut ids) => {
                ids.push(id);
                RouteMiddleware::List(ids)
            }
        };
    }
}

/// A registered route: URL template, method, handler and its constraints
///
/// Immutable once built. Segments are parsed when the route is compiled into
/// a table, so a malformed URL surfaces as a registration error there.
#[derive(Clone)]
pub struct RouteTemplate {
    pub method: Method,
    pub url: String,
    pub name: Option<String>,
    pub domain: Option<DomainConstraint>,
    pub middleware: RouteMiddleware,
    handler: Arc<dyn Handler>,
}

impl RouteTemplate {
    pub fn new<H>(method: Method, url: impl Into<String>, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        Self {
            method,
            url: url.into(),
            name: None,
            domain: None,
            middleware: RouteMiddleware::None,
            handler: Arc::new(handler),
        }
    }

    pub fn get<H: Handler + 'static>(url: impl Into<String>, handler: H) -> Self {
        Self::new(Method::GET, url, handler)
    }

    pub fn post<H: Handler + 'static>(url: impl Into<String>, handler: H) -> Self {
        Self::new(Method::POST, url, handler)
    }

    pub fn put<H: Handler + 'static>(url: impl Into<String>, handler: H) -> Self {
        Self::new(Method::PUT, url, handler)
    }

    pub fn patch<H: Handler + 'static>(url: impl Into<String>, handler: H) -> Self {
        Self::new(Method::PATCH, url, handler)
    }

    pub fn delete<H: Handler + 'static>(url: impl Into<String>, handler: H) -> Self {
        Self::new(Method::DELETE, url, handler)
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append one route middleware identifier
    #[must_use]
    pub fn middleware(mut self, id: impl Into<String>) -> Self {
        self.middleware.push(id.into());
        self
    }

    /// Append several route middleware identifiers, keeping their order
    #[must_use]
    pub fn middleware_list<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.middleware.push(id.into());
        }
        self
    }

    /// Restrict the route to one subdomain (`"*"` accepts any)
    #[must_use]
    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = Some(DomainConstraint::from(domain));
        self
    }

    #[must_use]
    pub fn any_domain(mut self) -> Self {
        self.domain = Some(DomainConstraint::Any);
        self
    }

    #[must_use]
    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain = Some(DomainConstraint::OneOf(
            domains.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Parse the URL into its segments
    pub fn segments(&self) -> Result<Vec<Segment>> {
        self.url.split('/').map(Segment::parse).collect()
    }

    /// Number of `/`-delimited pieces, the route table bucket key
    pub fn segment_count(&self) -> usize {
        self.url.split('/').count()
    }

    /// Parameter names in left-to-right order, without `:kind` suffixes
    pub fn param_names(&self) -> Vec<&str> {
        self.url
            .split('/')
            .filter_map(|raw| raw.strip_prefix(PARAM_MARKER))
            .map(|rest| rest.split_once(':').map_or(rest, |(name, _)| name))
            .collect()
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.url.ends_with('/')
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub(crate) fn invoke(&self, req: &DispatchRequest) -> HandlerOutput {
        self.handler.handle(req)
    }
}

impl fmt::Debug for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTemplate")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("middleware", &self.middleware)
            .finish_non_exhaustive()
    }
}
