//! Subdomain gate.
//!
//! A request only carries a subdomain when subdomain handling is active for it
//! and its host has one. Without a subdomain every route is allowed; with one,
//! the matched route must declare a compatible
//! [`DomainConstraint`](crate::spec::DomainConstraint).

use std::net::IpAddr;

use crate::spec::RouteTemplate;

/// Outcome of the subdomain gate for one candidate route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainDecision {
    Allow,
    Deny,
}

/// Extract the subdomain from a `Host` value
///
/// The port is dropped and the host lowercased. The registrable domain is
/// found through the public suffix list, so `example.co.uk` has no subdomain
/// and `www.example.co.uk` has `www`. IP literals and hosts without a
/// registrable domain have none.
#[must_use]
pub fn subdomain_of(host: &str) -> Option<String> {
    let host = strip_port(host.trim())
        .trim_end_matches('.')
        .to_ascii_lowercase();
    if host.is_empty() || host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let registrable = psl::domain_str(&host)?;
    let prefix = host.strip_suffix(registrable)?.strip_suffix('.')?;
    if prefix.is_empty() || prefix.split('.').any(str::is_empty) {
        return None;
    }
    Some(prefix.to_string())
}

fn strip_port(host: &str) -> &str {
    // bracketed IPv6 literal, with or without port
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

/// Gate a path/method-matched route against the request's subdomain
#[must_use]
pub fn check_domain(subdomain: Option<&str>, route: &RouteTemplate) -> DomainDecision {
    let Some(subdomain) = subdomain else {
        return DomainDecision::Allow;
    };
    match &route.domain {
        Some(constraint) if constraint.allows(subdomain) => DomainDecision::Allow,
        _ => DomainDecision::Deny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{DispatchRequest, HandlerOutput};

    fn noop(_: &DispatchRequest) -> HandlerOutput {
        HandlerOutput::text("")
    }

    #[test]
    fn test_subdomain_extraction() {
        assert_eq!(subdomain_of("subb.domain.com"), Some("subb".into()));
        assert_eq!(subdomain_of("API.Example.com:8080"), Some("api".into()));
        assert_eq!(subdomain_of("a.b.example.com"), Some("a.b".into()));
        assert_eq!(subdomain_of("example.com"), None);
        assert_eq!(subdomain_of("localhost:8000"), None);
        assert_eq!(subdomain_of("127.0.0.1:8000"), None);
        assert_eq!(subdomain_of("[::1]:8000"), None);
        assert_eq!(subdomain_of(""), None);
    }

    #[test]
    fn test_multi_label_public_suffix() {
        assert_eq!(subdomain_of("example.co.uk"), None);
        assert_eq!(subdomain_of("www.example.co.uk"), Some("www".into()));
        assert_eq!(subdomain_of("shop.example.com.au:443"), Some("shop".into()));
        assert_eq!(subdomain_of("example.com.au"), None);
    }

    #[test]
    fn test_no_subdomain_always_allows() {
        let route = RouteTemplate::get("/", noop).domain("api");
        assert_eq!(check_domain(None, &route), DomainDecision::Allow);
        let route = RouteTemplate::get("/", noop);
        assert_eq!(check_domain(None, &route), DomainDecision::Allow);
    }

    #[test]
    fn test_route_without_domain_denies_subdomain() {
        let route = RouteTemplate::get("/test", noop);
        assert_eq!(check_domain(Some("subb"), &route), DomainDecision::Deny);
    }

    #[test]
    fn test_domain_constraints_gate() {
        let route = RouteTemplate::get("/", noop).domain("api");
        assert_eq!(check_domain(Some("api"), &route), DomainDecision::Allow);
        assert_eq!(check_domain(Some("admin"), &route), DomainDecision::Deny);

        let route = RouteTemplate::get("/", noop).any_domain();
        assert_eq!(check_domain(Some("admin"), &route), DomainDecision::Allow);

        let route = RouteTemplate::get("/", noop).domains(["api", "admin"]);
        assert_eq!(check_domain(Some("admin"), &route), DomainDecision::Allow);
        assert_eq!(check_domain(Some("www"), &route), DomainDecision::Deny);
    }
}
