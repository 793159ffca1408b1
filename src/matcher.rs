//! Route patterns and first-match-wins path matching.
//!
//! Patterns are compiled once, when the router is configured, into a short
//! list of tokens:
//!
//! - literal text, compared ASCII case-insensitively
//! - `:name` captures one or more characters up to the next `/`
//! - `*` (or `*name`) captures the rest of the path, slashes included
//!
//! A single trailing `/` is optional on both the pattern and the path. Only
//! the pathname takes part in matching; query and fragment are parsed into the
//! match's [`Location`].
//!
//! Routes are tried strictly in declaration order and the first match wins,
//! so a catch-all route must be declared last.

use std::fmt;
use std::sync::Arc;

use crate::{Error, Location, RouteParams};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Param(String),
    Wildcard(String),
}

/// A compiled route pattern such as `/users/:id`.
///
/// ```
/// use pyramid_mvu::PathPattern;
///
/// let pattern = PathPattern::compile("/users/:id").unwrap();
/// let params = pattern.matches("/users/42/").unwrap();
/// assert_eq!(params.get("id").map(String::as_str), Some("42"));
///
/// assert!(pattern.matches("/users").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    tokens: Vec<Token>,
}

impl PathPattern {
    /// Compile a pattern.
    ///
    /// Fails on an empty pattern, a pattern not starting with `/` (other than
    /// a bare `*`), an empty or duplicated parameter name, or a wildcard that
    /// is not the last token.
    pub fn compile(pattern: &str) -> Result<Self, Error> {
        let invalid = |reason: &str| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if !pattern.starts_with('/') && !pattern.starts_with('*') {
            return Err(invalid("pattern must start with '/' or be a wildcard"));
        }

        let body = if pattern.len() > 1 {
            pattern.strip_suffix('/').unwrap_or(pattern)
        } else {
            pattern
        };

        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut unnamed = 0usize;
        let mut chars = body.char_indices().peekable();

        while let Some((index, c)) = chars.next() {
            match c {
                ':' | '*' => {
                    if matches!(tokens.last(), Some(Token::Wildcard(_))) {
                        return Err(invalid("wildcard must be the last segment"));
                    }
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(core::mem::take(&mut literal)));
                    }

                    let mut name = String::new();
                    while let Some(&(_, next)) = chars.peek() {
                        if !is_name_char(next) {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }

                    if c == ':' {
                        if name.is_empty() {
                            return Err(invalid(&format!(
                                "empty parameter name at offset {}",
                                index
                            )));
                        }
                        tokens.push(Token::Param(name));
                    } else {
                        if name.is_empty() {
                            name = unnamed.to_string();
                            unnamed += 1;
                        }
                        tokens.push(Token::Wildcard(name));
                    }
                }
                _ => {
                    if matches!(tokens.last(), Some(Token::Wildcard(_))) {
                        return Err(invalid("wildcard must be the last segment"));
                    }
                    literal.push(c);
                }
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        let mut names: Vec<&str> = Vec::new();
        for token in &tokens {
            if let Token::Param(name) | Token::Wildcard(name) = token {
                if names.contains(&name.as_str()) {
                    return Err(invalid(&format!("duplicate parameter '{}'", name)));
                }
                names.push(name);
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a pathname, returning the captured parameters.
    pub fn matches(&self, pathname: &str) -> Option<RouteParams> {
        let mut captures = Vec::new();
        if match_tokens(&self.tokens, pathname, &mut captures) {
            return Some(captures.into_iter().collect());
        }

        let trimmed = pathname.strip_suffix('/').filter(|rest| !rest.is_empty())?;
        captures.clear();
        if match_tokens(&self.tokens, trimmed, &mut captures) {
            return Some(captures.into_iter().collect());
        }
        None
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn match_tokens<'p>(
    tokens: &'p [Token],
    path: &str,
    captures: &mut Vec<(&'p str, String)>,
) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return path.is_empty();
    };

    match token {
        Token::Literal(literal) => match path.get(..literal.len()) {
            Some(head) if head.eq_ignore_ascii_case(literal) => {
                match_tokens(rest, &path[literal.len()..], captures)
            }
            _ => false,
        },
        Token::Param(name) => {
            let segment_end = path.find('/').unwrap_or(path.len());
            // Shortest capture first, so a literal suffix in the same segment
            // (e.g. `/:file.json`) still matches.
            for end in (1..=segment_end).filter(|end| path.is_char_boundary(*end)) {
                let depth = captures.len();
                captures.push((name.as_str(), path[..end].to_string()));
                if match_tokens(rest, &path[end..], captures) {
                    return true;
                }
                captures.truncate(depth);
            }
            false
        }
        Token::Wildcard(name) => {
            captures.push((name.as_str(), path.to_string()));
            true
        }
    }
}

/// One entry of the route configuration: a pattern and the component it
/// mounts.
pub struct Route<C: ?Sized> {
    pattern: String,
    component: Arc<C>,
}

impl<C: ?Sized> Route<C> {
    pub fn new(pattern: impl Into<String>, component: Arc<C>) -> Self {
        Self {
            pattern: pattern.into(),
            component,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Result of matching a path against the route table.
pub(crate) struct RouteMatch<'a, C: ?Sized> {
    pub params: RouteParams,
    pub pattern: &'a str,
    pub location: Location,
    pub component: &'a Arc<C>,
}

struct CompiledRoute<C: ?Sized> {
    pattern: PathPattern,
    component: Arc<C>,
}

/// Ordered, compiled route configuration.
pub(crate) struct RouteTable<C: ?Sized> {
    routes: Vec<CompiledRoute<C>>,
}

impl<C: ?Sized> RouteTable<C> {
    /// Compile every pattern, failing on the first invalid one.
    pub(crate) fn compile(routes: Vec<Route<C>>) -> Result<Self, Error> {
        let mut compiled: Vec<CompiledRoute<C>> = Vec::with_capacity(routes.len());

        for route in routes {
            let pattern = PathPattern::compile(&route.pattern)?;
            if compiled.iter().any(|earlier| earlier.pattern == pattern) {
                warn_log!(
                    "route '{}' is declared twice, the later declaration is unreachable",
                    pattern
                );
            }
            compiled.push(CompiledRoute {
                pattern,
                component: route.component,
            });
        }

        Ok(Self { routes: compiled })
    }

    /// Find the first route matching `path`.
    pub(crate) fn match_path(&self, path: &str) -> Option<RouteMatch<'_, C>> {
        let location = Location::parse(path);

        self.routes.iter().find_map(|route| {
            let params = route.pattern.matches(location.pathname())?;
            trace_log!("path '{}' matched route '{}'", path, route.pattern);
            Some(RouteMatch {
                params,
                pattern: route.pattern.as_str(),
                location: location.clone(),
                component: &route.component,
            })
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.routes.len()
    }
}
