//! Loop (node) types and the parent stack

use crate::error::{Error, Result};
use crate::yarn::YarnId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoopId(pub u64);

impl LoopId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The id following this one, `None` past `u64::MAX`
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for LoopId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LoopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single stitch loop (a node in the knit graph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    /// Unique identifier, fixed at creation
    pub loop_id: LoopId,

    /// Yarn this loop is strung on
    pub yarn_id: YarnId,

    /// Whether the two legs of the loop cross
    pub is_twisted: bool,

    /// Loops pulled through to form this one, bottom of the stack first
    parent_loops: Vec<LoopId>,
}

impl Loop {
    /// Create a loop with an empty parent stack
    pub fn new(loop_id: LoopId, yarn_id: impl Into<YarnId>, is_twisted: bool) -> Self {
        Self {
            loop_id,
            yarn_id: yarn_id.into(),
            is_twisted,
            parent_loops: Vec::new(),
        }
    }

    /// Push a parent onto the stack.
    ///
    /// `None` places the parent on top. `Some(position)` inserts it at that
    /// index (0 is the bottom), shifting later entries up; positions past the
    /// current top are rejected.
    pub fn add_parent_loop(&mut self, parent: LoopId, stack_position: Option<usize>) -> Result<()> {
        match stack_position {
            None => self.parent_loops.push(parent),
            Some(position) => {
                self.check_stack_position(position)?;
                self.parent_loops.insert(position, parent);
            }
        }
        Ok(())
    }

    pub(crate) fn check_stack_position(&self, position: usize) -> Result<()> {
        if position > self.parent_loops.len() {
            return Err(Error::StackPositionOutOfRange {
                loop_id: self.loop_id,
                position,
                len: self.parent_loops.len(),
            });
        }
        Ok(())
    }

    /// Parent stack, bottom first
    pub fn parent_loops(&self) -> &[LoopId] {
        &self.parent_loops
    }

    /// The most recently stacked parent
    pub fn top_parent(&self) -> Option<LoopId> {
        self.parent_loops.last().copied()
    }

    pub fn has_parent(&self, parent: LoopId) -> bool {
        self.parent_loops.contains(&parent)
    }

    /// True for cast-on loops and yarn-overs
    pub fn has_parents(&self) -> bool {
        !self.parent_loops.is_empty()
    }
}
