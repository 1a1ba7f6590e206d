//! Result-set multiplicity lattice.
//!
//! Every branch-merging IR node stores the cardinality of its operands;
//! the merged cardinality is always computed through [`Cardinality::join`]
//! rather than re-derived by walking the subtree.

use serde::{Deserialize, Serialize};

/// Multiplicity classification of a result set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Cardinality {
    /// Exactly one element.
    One,
    /// Zero or one element.
    AtMostOne,
    /// One or more elements.
    AtLeastOne,
    /// Any number of elements, including none.
    Many,
}

impl Cardinality {
    /// Lower multiplicity bound is one (the set is provably non-empty).
    pub fn is_required(self) -> bool {
        matches!(self, Self::One | Self::AtLeastOne)
    }

    /// Upper multiplicity bound is one.
    pub fn is_single(self) -> bool {
        matches!(self, Self::One | Self::AtMostOne)
    }

    fn from_bounds(required: bool, single: bool) -> Self {
        match (required, single) {
            (true, true) => Self::One,
            (false, true) => Self::AtMostOne,
            (true, false) => Self::AtLeastOne,
            (false, false) => Self::Many,
        }
    }

    /// Least upper bound of two cardinalities.
    ///
    /// The result is required only when both operands are, and single only
    /// when both operands are. `One.join(One)` is `One`;
    /// `One.join(Many)` is `Many`.
    pub fn join(self, other: Self) -> Self {
        Self::from_bounds(
            self.is_required() && other.is_required(),
            self.is_single() && other.is_single(),
        )
    }
}
