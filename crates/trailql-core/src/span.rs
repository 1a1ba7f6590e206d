//! Diagnostic source locations.

use serde::{Deserialize, Serialize};

/// Byte range into the original query source.
///
/// Carried for diagnostics only; never part of structural comparison.
/// Nodes synthesized by the compiler have no span.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: u32,
    pub end: u32,
}

impl SourceSpan {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}
