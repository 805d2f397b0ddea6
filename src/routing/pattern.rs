//! Path normalization and pattern matching.
//!
//! # Responsibilities
//! - Normalize requested paths (drop query/fragment, collapse slashes)
//! - Parse configured path patterns into segments
//! - Match a normalized path against a pattern and rank the match
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex: patterns are literal, `:param` or a final `*` segment
//! - Specificity is a plain ordered value so the table can pick the best match

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::config::schema::CATCH_ALL;

/// Errors raised while parsing a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern must start with '/'")]
    MissingLeadingSlash,

    #[error("pattern contains an empty segment")]
    EmptySegment,

    #[error("parameter segment has no name")]
    EmptyParam,

    #[error("'*' is only allowed as the final segment")]
    WildcardNotLast,

    #[error("the catch-all '*' is reserved for the fallback entry")]
    ReservedCatchAll,

    #[error("segment '{0}' contains a query or fragment delimiter")]
    QueryOrFragment(String),
}

/// A requested path after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavPath(String);

impl NavPath {
    /// Normalize a raw navigation target.
    ///
    /// `/calendar/?view=week#today` becomes `/calendar`; `//a//b/` becomes `/a/b`.
    pub fn parse(raw: &str) -> Self {
        let end = raw.find(|c: char| c == '?' || c == '#').unwrap_or(raw.len());
        let segments: Vec<&str> = raw[..end].split('/').filter(|s| !s.is_empty()).collect();
        Self(format!("/{}", segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segments without the leading slash; the root has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

/// How specific a successful match is. Greater is more specific.
///
/// Ordering: literal segments, then parameter segments, then overall length,
/// then "no tail wildcard" beats "tail wildcard".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    literals: usize,
    params: usize,
    segments: usize,
    exact_tail: bool,
}

/// Parameters captured by a match. The tail wildcard is stored under `*`.
pub type Params = BTreeMap<String, String>;

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a configured pattern. The bare catch-all is rejected; it is
    /// represented by [`PathPattern::catch_all`].
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if raw == CATCH_ALL {
            return Err(PatternError::ReservedCatchAll);
        }
        let rest = raw.strip_prefix('/').ok_or(PatternError::MissingLeadingSlash)?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            let parts: Vec<&str> = rest.split('/').collect();
            for (i, part) in parts.iter().enumerate() {
                let segment = match *part {
                    "" => return Err(PatternError::EmptySegment),
                    "*" if i + 1 != parts.len() => return Err(PatternError::WildcardNotLast),
                    "*" => Segment::Wildcard,
                    p if p.contains(|c: char| c == '?' || c == '#') => {
                        return Err(PatternError::QueryOrFragment(p.to_string()))
                    }
                    p => match p.strip_prefix(':') {
                        Some("") => return Err(PatternError::EmptyParam),
                        Some(name) => Segment::Param(name.to_string()),
                        None => Segment::Literal(p.to_string()),
                    },
                };
                segments.push(segment);
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern of the fallback entry. It matches nothing by itself; the
    /// table returns the fallback when no other pattern matches.
    pub fn catch_all() -> Self {
        Self {
            raw: CATCH_ALL.to_string(),
            segments: vec![Segment::Wildcard],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_catch_all(&self) -> bool {
        self.raw == CATCH_ALL
    }

    /// True when the pattern has no parameters or wildcard, i.e. it names
    /// exactly one navigable path.
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Canonical form with parameter names erased. Two patterns with the
    /// same shape match exactly the same paths.
    pub fn shape(&self) -> String {
        let parts: Vec<&str> = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Literal(lit) => lit.as_str(),
                Segment::Param(_) => ":",
                Segment::Wildcard => "*",
            })
            .collect();
        format!("/{}", parts.join("/"))
    }

    /// Match `path` and return the captured parameters with the match's
    /// specificity, or `None`.
    pub fn matches(&self, path: &NavPath) -> Option<(Params, Specificity)> {
        if self.is_catch_all() {
            return None;
        }

        let parts: Vec<&str> = path.segments().collect();
        let mut params = Params::new();
        let mut rank = Specificity {
            literals: 0,
            params: 0,
            segments: self.segments.len(),
            exact_tail: true,
        };

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard => {
                    params.insert("*".to_string(), parts[i.min(parts.len())..].join("/"));
                    rank.exact_tail = false;
                    return Some((params, rank));
                }
                Segment::Literal(lit) => {
                    if parts.get(i) != Some(&lit.as_str()) {
                        return None;
                    }
                    rank.literals += 1;
                }
                Segment::Param(name) => {
                    let value = parts.get(i)?;
                    params.insert(name.clone(), (*value).to_string());
                    rank.params += 1;
                }
            }
        }

        (parts.len() == self.segments.len()).then_some((params, rank))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
