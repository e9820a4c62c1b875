//! Dotted-path names.
//!
//! A `QualifiedName` addresses a member nested inside namespaces, e.g.
//! `ns.sub.Foo`. It is stored pre-split so lookups walk segments without
//! re-parsing strings.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    leftmost: String,
    rest: Vec<String>,
}

impl QualifiedName {
    /// A simple (single identifier) name.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            leftmost: identifier.into(),
            rest: Vec::new(),
        }
    }

    /// Build from a dotted string. Returns `None` for empty segments
    /// (`"a..b"`, `""`, `".a"`).
    #[must_use]
    pub fn from_dotted(dotted: &str) -> Option<Self> {
        Self::from_segments(dotted.split('.').map(str::to_string))
    }

    /// Build from already-split segments. Returns `None` when there are no
    /// segments or one of them is empty.
    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut iter = segments.into_iter();
        let leftmost = iter.next()?;
        if leftmost.is_empty() {
            return None;
        }
        let rest: Vec<String> = iter.collect();
        if rest.iter().any(String::is_empty) {
            return None;
        }
        Some(Self { leftmost, rest })
    }

    #[must_use]
    pub fn is_identifier(&self) -> bool {
        self.rest.is_empty()
    }

    #[must_use]
    pub fn leftmost(&self) -> &str {
        &self.leftmost
    }

    #[must_use]
    pub fn rightmost(&self) -> &str {
        self.rest.last().unwrap_or(&self.leftmost)
    }

    /// `a.b.c` -> `b.c`; `None` for a simple name.
    #[must_use]
    pub fn all_but_leftmost(&self) -> Option<Self> {
        Self::from_segments(self.rest.iter().cloned())
    }

    /// `a.b.c` -> `a.b`; `None` for a simple name.
    #[must_use]
    pub fn all_but_rightmost(&self) -> Option<Self> {
        let (_, init) = self.rest.split_last()?;
        Some(Self {
            leftmost: self.leftmost.clone(),
            rest: init.to_vec(),
        })
    }

    /// Append a trailing segment.
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut rest = self.rest.clone();
        rest.push(segment.into());
        Self {
            leftmost: self.leftmost.clone(),
            rest,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.leftmost.as_str()).chain(self.rest.iter().map(String::as_str))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.leftmost)?;
        for segment in &self.rest {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/qualified_name_tests.rs"]
mod tests;
