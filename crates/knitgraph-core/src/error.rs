//! Error types for knitgraph core

use crate::knit_loop::LoopId;
use crate::limits::ValidationError;
use crate::yarn::YarnId;
use thiserror::Error;

/// Result type alias using knitgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Knit graph error types
///
/// Every variant except `LoopNotFound` is a precondition violation: the
/// operation that returned it left the graph untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Loop {loop_id} references unregistered yarn: {yarn_id}")]
    UnregisteredYarn { loop_id: LoopId, yarn_id: YarnId },

    #[error("Yarn already exists: {0}")]
    YarnExists(YarnId),

    #[error("Loop already exists: {0}")]
    LoopExists(LoopId),

    #[error("Loop {0} already has parents; connect them through the graph")]
    LoopHasParents(LoopId),

    #[error("Yarn {0} must be empty when registered; feed loops through the graph")]
    YarnNotEmpty(YarnId),

    #[error("Loop {loop_id} is already on yarn {yarn_id}")]
    LoopAlreadyOnYarn { loop_id: LoopId, yarn_id: YarnId },

    #[error("Cannot connect {parent} -> {child}: loop {missing} is not in the graph")]
    MissingEndpoint {
        parent: LoopId,
        child: LoopId,
        missing: LoopId,
    },

    #[error("Loop {0} cannot be pulled through itself")]
    SelfConnection(LoopId),

    #[error("Edge already exists: {parent} -> {child}")]
    EdgeExists { parent: LoopId, child: LoopId },

    #[error("Stack position {position} out of range for loop {loop_id} with {len} parents")]
    StackPositionOutOfRange {
        loop_id: LoopId,
        position: usize,
        len: usize,
    },

    #[error("No loop id left after {0}")]
    LoopIdsExhausted(LoopId),

    #[error("Unknown pull direction: {0} (expected BtF or FtB)")]
    InvalidPullDirection(String),

    #[error("Invalid crossing depth: {0} (expected -1, 0 or 1)")]
    InvalidDepth(i8),

    #[error("Loop not found: {0}")]
    LoopNotFound(LoopId),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
