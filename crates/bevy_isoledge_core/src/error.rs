//! Error types for ledge compilation.

use bevy::math::IVec2;
use thiserror::Error;

use crate::keys::{BoundaryKey, LayerId};

/// The layer set handed to [`LayerStack::build`](crate::layer::LayerStack::build)
/// cannot form a stack.
///
/// This is the only failure caused by input data. World loading should stop
/// and report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerStackError {
    #[error("no layers were provided")]
    Empty,

    #[error(
        "layer z-indices are not a dense sequence starting at 0 (missing: {missing:?}, duplicated: {duplicated:?})"
    )]
    IndexesNotASequence {
        /// Indices in `0..=max` that no layer carries, ascending.
        missing: Vec<u32>,
        /// Indices carried by more than one layer, ascending.
        duplicated: Vec<u32>,
    },
}

/// A bug in perimeter tracing or key bookkeeping.
///
/// These never depend on user input being malformed; they abort compilation
/// so a broken wall is never handed to the physics layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("edge {start}..{end} is tagged {tag} but its endpoints disagree")]
    OrientationMismatch {
        start: IVec2,
        end: IVec2,
        tag: &'static str,
    },

    #[error("edges of {key:?} are not contiguous at position {position}")]
    DisconnectedEdges { key: BoundaryKey, position: usize },

    #[error("boundary loop of {key:?} does not close")]
    OpenLoop { key: BoundaryKey },

    #[error("{remaining} boundary edges of {key:?} were never traced")]
    UntracedEdges { key: BoundaryKey, remaining: usize },

    #[error("boundary loop of {key:?} has the wrong winding")]
    WrongWinding { key: BoundaryKey },

    #[error("polygon needs at least {expected} vertices, got {actual}")]
    VertexCount { expected: usize, actual: usize },

    #[error("no boundary stored for {0:?}")]
    MissingBoundary(BoundaryKey),

    #[error("no layer stored for {0}")]
    MissingLayer(LayerId),
}

/// Any failure of the compilation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid layer stack: {0}")]
    Structural(#[from] LayerStackError),

    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl CompileError {
    /// Structural failures come from the input and can be fixed by editing
    /// the world; everything else is a compiler bug.
    pub fn is_structural(&self) -> bool {
        matches!(self, CompileError::Structural(_))
    }
}
