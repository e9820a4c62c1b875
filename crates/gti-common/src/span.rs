//! Source spans.
//!
//! Nodes handed to the type info builder carry a half-open `[start, end)`
//! range. The builder never reads source text, so spans are only used to
//! position diagnostics.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A one-unit span at `pos`, used for synthesized nodes.
    #[must_use]
    pub const fn at(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }
}
