#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::error::ForestError;

/// Which subtree metric decides the new root when two sets merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MergePolicy {
    /// The shorter side goes under the taller one.
    #[default]
    ByHeight,
    /// The side with fewer elements goes under the larger one.
    BySize,
}

/// Whose height or size the merge policy compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Weighing {
    /// Compare the two elements passed to `union`, even when they sit deep
    /// inside their trees.
    #[default]
    Operands,
    /// Compare the roots of the two sets (textbook weighted union).
    Roots,
}

/// Forest configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForestConfig {
    pub policy: MergePolicy,
    pub weighing: Weighing,
}

#[cfg(feature = "serde")]
impl ForestConfig {
    /// Parse a TOML config, e.g. `policy = "by_size"`. Missing keys take
    /// their defaults.
    pub fn from_toml(toml_str: &str) -> Result<ForestConfig, ForestError> {
        toml::from_str(toml_str).map_err(|e| ForestError::Config(e.to_string()))
    }
}

/// Outcome of comparing two merge candidates: which root ends up on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Winner {
    First,
    Second,
}

impl MergePolicy {
    /// Decide the surviving root given the compared `(height, size)` of each
    /// side. Ties go to the second side.
    pub(crate) fn pick(self, first: (usize, usize), second: (usize, usize)) -> Winner {
        let (a, b) = match self {
            MergePolicy::ByHeight => (first.0, second.0),
            MergePolicy::BySize => (first.1, second.1),
        };
        if a <= b {
            Winner::Second
        } else {
            Winner::First
        }
    }
}
