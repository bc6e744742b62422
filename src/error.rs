use std::fmt;

use thiserror::Error;

/// A component was assembled from parts that are not usable.
///
/// These errors are raised synchronously at construction time and mean the
/// assembling caller must not proceed with the affected component.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// A model group child `Ref` points at a reserved slot that was never
    /// filled in the construction table.
    #[error("child particle at index {index} is not constructed")]
    AbsentChildParticle { index: usize },
}

/// Which traversal ran into a reference cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CycleKind {
    /// An attribute group (directly or transitively) references itself.
    AttributeGroup,
    /// A group redefinition reached a model group it had already entered.
    Redefinition,
    /// A content model reaches itself through a group reference chain.
    ContentModel,
}

impl fmt::Display for CycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeGroup => write!(f, "attribute group reference"),
            Self::Redefinition => write!(f, "group redefinition"),
            Self::ContentModel => write!(f, "content model"),
        }
    }
}

/// A reference cycle detected by one of the graph traversals.
///
/// Carries the rendered cycle trail (`"a -> b -> a"`). The schema containing
/// the cycle should be rejected or flagged; the component graph itself is
/// left untouched by the traversal that failed.
#[derive(Debug, Error)]
#[error("{kind} cycle: {trail}")]
pub struct CycleError {
    kind: CycleKind,
    trail: String,
}

impl CycleError {
    pub(crate) fn new(kind: CycleKind, trail: String) -> Self {
        Self { kind, trail }
    }

    pub fn kind(&self) -> CycleKind {
        self.kind
    }

    /// The components forming the cycle, top of the traversal first.
    pub fn trail(&self) -> &str {
        &self.trail
    }
}
