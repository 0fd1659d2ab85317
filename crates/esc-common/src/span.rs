//! Span - source location tracking for IR nodes and diagnostics.
//!
//! A span is a half-open byte range `[start, end)` into the original
//! source text. Spans are small (8 bytes) and `Copy`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn at(pos: u32) -> Self {
        Span { start: pos, end: pos }
    }

    #[inline]
    pub const fn from_len(start: u32, len: u32) -> Self {
        Span { start, end: start + len }
    }

    /// Synthetic span used for nodes that have no source origin.
    #[inline]
    pub const fn dummy() -> Self {
        Span { start: u32::MAX, end: u32::MAX }
    }

    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.start == u32::MAX && self.end == u32::MAX
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn merge(&self, other: Span) -> Span {
        let start = if self.start < other.start { self.start } else { other.start };
        let end = if self.end > other.end { self.end } else { other.end };
        Span { start, end }
    }

    #[inline]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start as usize..self.end as usize).unwrap_or("")
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

pub trait Spanned {
    fn span(&self) -> Span;

    fn start(&self) -> u32 {
        self.span().start
    }

    fn end(&self) -> u32 {
        self.span().end
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}
