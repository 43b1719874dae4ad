//! Yarn types: an append-only strand of loops and its carrier

use crate::error::{Error, Result};
use crate::knit_loop::LoopId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier for a yarn
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YarnId(pub String);

impl YarnId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for YarnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for YarnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&YarnId> for YarnId {
    fn from(id: &YarnId) -> Self {
        id.clone()
    }
}

impl std::fmt::Display for YarnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to the machine feeder that delivers a yarn.
///
/// Opaque to the graph: it is stored with the yarn and handed back through
/// `KnitGraph::get_carriers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Carrier(pub u8);

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strand of loops in feed order
#[derive(Debug, Clone, Serialize)]
pub struct Yarn {
    pub yarn_id: YarnId,

    pub carrier: Carrier,

    loops: Vec<LoopId>,

    #[serde(skip)]
    members: HashSet<LoopId>,
}

impl Yarn {
    /// Create an empty yarn fed by `carrier`
    pub fn new(yarn_id: impl Into<YarnId>, carrier: Carrier) -> Self {
        Self {
            yarn_id: yarn_id.into(),
            carrier,
            loops: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Append a loop to the end of the yarn; a loop is fed at most once
    pub fn add_loop_to_end(&mut self, loop_id: LoopId) -> Result<()> {
        if !self.members.insert(loop_id) {
            return Err(Error::LoopAlreadyOnYarn {
                loop_id,
                yarn_id: self.yarn_id.clone(),
            });
        }
        self.loops.push(loop_id);
        Ok(())
    }

    pub fn contains(&self, loop_id: LoopId) -> bool {
        self.members.contains(&loop_id)
    }

    /// Loops in the order they were fed
    pub fn loops(&self) -> &[LoopId] {
        &self.loops
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn first_loop(&self) -> Option<LoopId> {
        self.loops.first().copied()
    }

    pub fn last_loop(&self) -> Option<LoopId> {
        self.loops.last().copied()
    }

    /// The loop fed right after `loop_id`
    pub fn next_loop(&self, loop_id: LoopId) -> Option<LoopId> {
        let position = self.position(loop_id)?;
        self.loops.get(position + 1).copied()
    }

    /// The loop fed right before `loop_id`
    pub fn prior_loop(&self, loop_id: LoopId) -> Option<LoopId> {
        let position = self.position(loop_id)?;
        position.checked_sub(1).map(|p| self.loops[p])
    }

    fn position(&self, loop_id: LoopId) -> Option<usize> {
        if !self.contains(loop_id) {
            return None;
        }
        self.loops.iter().position(|&id| id == loop_id)
    }
}

impl PartialEq for Yarn {
    fn eq(&self, other: &Self) -> bool {
        self.yarn_id == other.yarn_id && self.carrier == other.carrier && self.loops == other.loops
    }
}

impl Eq for Yarn {}
