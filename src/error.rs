//! Error types for the simulation core.
//!
//! Expected per-tick outcomes (touching, penetrating) are ordinary
//! [`CollisionState`](crate::collision::CollisionState) values; only the
//! four unrecoverable step failures surface here.

use std::fmt;

use crate::collision::contact::ContactKind;

/// Fatal simulation-step failures.
///
/// After any of these, the tick's partial state has been discarded and the
/// world still holds the last accepted configuration; the caller decides
/// whether to halt or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// Time bisection hit its depth bound with the configuration still
    /// interpenetrating.
    PenetrationUnresolved,
    /// A body–wall contact was still closing after the impulse iteration
    /// bound.
    WallContactUnresolved,
    /// A vertex–vertex contact was still closing after the impulse
    /// iteration bound.
    VertexVertexUnresolved,
    /// A vertex–edge contact was still closing after the impulse iteration
    /// bound.
    VertexEdgeUnresolved,
}

impl StepError {
    pub(crate) fn from_contact(kind: ContactKind) -> Self {
        match kind {
            ContactKind::BodyWall { .. } => Self::WallContactUnresolved,
            ContactKind::VertexVertex { .. } => Self::VertexVertexUnresolved,
            ContactKind::VertexEdge { .. } => Self::VertexEdgeUnresolved,
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PenetrationUnresolved => write!(f, "unresolvable penetration: bisection bound exceeded"),
            Self::WallContactUnresolved => write!(f, "unresolvable body-wall collision"),
            Self::VertexVertexUnresolved => write!(f, "unresolvable vertex-vertex collision"),
            Self::VertexEdgeUnresolved => write!(f, "unresolvable vertex-edge collision"),
        }
    }
}

impl std::error::Error for StepError {}

/// Convenient Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, StepError>;
