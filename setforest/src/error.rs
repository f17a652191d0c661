use thiserror::Error;

/// Errors reported by [`Forest`](crate::forest::Forest) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    #[error("unknown element {id}: not registered in this forest")]
    UnknownElement { id: usize },

    #[error("element {id} belongs to a different forest")]
    ForeignElement { id: usize },

    #[error("config error: {0}")]
    Config(String),
}

/// A structural invariant that failed during [`Forest::verify`](crate::forest::Forest::verify).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("element {id} lies on a parent cycle")]
    Cycle { id: usize },

    #[error("element {child} names {parent} as parent but is missing from its children")]
    MissingChild { parent: usize, child: usize },

    #[error("element {parent} lists {child} as a child but {child} has a different parent")]
    StrayChild { parent: usize, child: usize },

    #[error("element {id} records height {recorded}, recomputed {actual}")]
    Height {
        id: usize,
        recorded: usize,
        actual: usize,
    },

    #[error("element {id} records size {recorded}, recomputed {actual}")]
    Size {
        id: usize,
        recorded: usize,
        actual: usize,
    },
}
