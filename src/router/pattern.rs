//! Pattern compiler: route template → anchored regex + ordered parameter names.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::sync::Arc;

use crate::spec::{RouteTemplate, Segment};

/// How the end of a compiled pattern is anchored
///
/// Decided once from the declared URL. A route declared as `/view/` only
/// accepts `/view/`; a route declared as `/view` only accepts `/view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// Path must end right after the last segment
    Exact,
    /// Path must end with exactly one `/` after the last segment
    TrailingSlash,
}

impl AnchorMode {
    #[must_use]
    pub fn for_template(template: &RouteTemplate) -> Self {
        if template.has_trailing_slash() {
            AnchorMode::TrailingSlash
        } else {
            AnchorMode::Exact
        }
    }
}

/// Compiled matcher for one route template
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    param_names: Vec<Arc<str>>,
    anchor: AnchorMode,
}

impl CompiledPattern {
    /// Compile `template` with the anchor mode its URL declares
    pub fn compile(template: &RouteTemplate) -> Result<Self> {
        Self::compile_with(template, AnchorMode::for_template(template))
    }

    /// Compile `template` with an explicit anchor mode
    ///
    /// Literal segments are escaped, parameter segments become one capture
    /// group each. Both ends are anchored. Unknown parameter kinds and
    /// parameter names repeated within one template are rejected.
    pub fn compile_with(template: &RouteTemplate, anchor: AnchorMode) -> Result<Self> {
        let parsed = template
            .segments()
            .with_context(|| format!("invalid route template {}", template.url))?;
        let mut segments = parsed.as_slice();
        // the empty piece after a trailing `/` is expressed by the anchor
        if let [head @ .., Segment::Literal(last)] = segments {
            if last.is_empty() && !head.is_empty() {
                segments = head;
            }
        }

        let mut pattern = String::with_capacity(template.url.len() + 16);
        pattern.push('^');
        let mut param_names: Vec<Arc<str>> = Vec::new();

        for (idx, segment) in segments.iter().enumerate() {
            if idx > 0 {
                pattern.push('/');
            }
            match segment {
                Segment::Literal(lit) => pattern.push_str(&regex::escape(lit)),
                Segment::Param { name, kind } => {
                    if param_names.iter().any(|n| n.as_ref() == name.as_str()) {
                        bail!(
                            "duplicate parameter `{}` in route template {}",
                            name,
                            template.url
                        );
                    }
                    pattern.push('(');
                    pattern.push_str(kind.pattern());
                    pattern.push(')');
                    param_names.push(Arc::from(name.as_str()));
                }
            }
        }

        if anchor == AnchorMode::TrailingSlash {
            pattern.push('/');
        }
        pattern.push('$');

        let regex = Regex::new(&pattern)
            .with_context(|| format!("failed to compile route pattern for {}", template.url))?;

        Ok(Self {
            regex,
            param_names,
            anchor,
        })
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Captured values in group order, or `None` when the path does not match
    #[must_use]
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .collect(),
        )
    }

    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    pub fn anchor(&self) -> AnchorMode {
        self.anchor
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
