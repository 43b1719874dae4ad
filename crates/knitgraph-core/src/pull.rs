//! Stitch-edge attributes: pull direction, cable crossing depth, parent offset

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Direction a child loop is drawn through its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PullDirection {
    /// Back to front (a knit stitch seen from the front bed)
    #[default]
    BtF,
    /// Front to back (a purl stitch seen from the front bed)
    FtB,
}

/// The opposite pull direction
pub fn opposite(direction: PullDirection) -> PullDirection {
    match direction {
        PullDirection::BtF => PullDirection::FtB,
        PullDirection::FtB => PullDirection::BtF,
    }
}

impl PullDirection {
    pub fn opposite(self) -> Self {
        opposite(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BtF => "BtF",
            Self::FtB => "FtB",
        }
    }
}

impl std::fmt::Display for PullDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "btf" => Ok(Self::BtF),
            "ftb" => Ok(Self::FtB),
            _ => Err(Error::InvalidPullDirection(s.to_string())),
        }
    }
}

/// Layering of a loop where stitches cross in a cable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum CrossingDepth {
    Behind,
    #[default]
    Level,
    Front,
}

impl CrossingDepth {
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Behind => -1,
            Self::Level => 0,
            Self::Front => 1,
        }
    }
}

impl TryFrom<i8> for CrossingDepth {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            -1 => Ok(Self::Behind),
            0 => Ok(Self::Level),
            1 => Ok(Self::Front),
            other => Err(Error::InvalidDepth(other)),
        }
    }
}

impl From<CrossingDepth> for i8 {
    fn from(depth: CrossingDepth) -> Self {
        depth.as_i8()
    }
}

/// Metadata carried by a parent -> child edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeAttributes {
    pub pull_direction: PullDirection,

    pub depth: CrossingDepth,

    /// Needle displacement from the child to the parent, oriented from the front bed
    pub parent_offset: i32,
}

/// Options for `KnitGraph::connect_loops`
///
/// The default is a plain knit: back-to-front, level, no offset, parent
/// pushed on top of the child's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Connection {
    pub attributes: EdgeAttributes,

    /// Insert position in the child's parent stack; `None` pushes on top
    pub stack_position: Option<usize>,
}

impl Connection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pull_direction(mut self, direction: PullDirection) -> Self {
        self.attributes.pull_direction = direction;
        self
    }

    pub fn with_depth(mut self, depth: CrossingDepth) -> Self {
        self.attributes.depth = depth;
        self
    }

    pub fn with_parent_offset(mut self, offset: i32) -> Self {
        self.attributes.parent_offset = offset;
        self
    }

    pub fn at_stack_position(mut self, position: usize) -> Self {
        self.stack_position = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(opposite(PullDirection::BtF), PullDirection::FtB);
        assert_eq!(opposite(PullDirection::FtB), PullDirection::BtF);
        assert_eq!(PullDirection::BtF.opposite().opposite(), PullDirection::BtF);
    }

    #[test]
    fn test_pull_direction_parse() {
        assert_eq!("BtF".parse::<PullDirection>(), Ok(PullDirection::BtF));
        assert_eq!("ftb".parse::<PullDirection>(), Ok(PullDirection::FtB));
        assert_eq!(
            "sideways".parse::<PullDirection>(),
            Err(Error::InvalidPullDirection("sideways".to_string()))
        );
        assert_eq!(PullDirection::FtB.to_string(), "FtB");
    }

    #[test]
    fn test_crossing_depth_conversion() {
        assert_eq!(CrossingDepth::try_from(-1), Ok(CrossingDepth::Behind));
        assert_eq!(CrossingDepth::try_from(0), Ok(CrossingDepth::Level));
        assert_eq!(CrossingDepth::try_from(1), Ok(CrossingDepth::Front));
        assert_eq!(CrossingDepth::try_from(2), Err(Error::InvalidDepth(2)));
        assert_eq!(CrossingDepth::Behind.as_i8(), -1);
    }

    #[test]
    fn test_edge_attributes_serialize_depth_as_integer() {
        let attributes = EdgeAttributes {
            pull_direction: PullDirection::FtB,
            depth: CrossingDepth::Behind,
            parent_offset: -1,
        };
        let json = serde_json::to_value(attributes).unwrap();
        assert_eq!(json["pull_direction"], "FtB");
        assert_eq!(json["depth"], -1);
        assert_eq!(json["parent_offset"], -1);
    }

    #[test]
    fn test_connection_builder() {
        let connection = Connection::new()
            .with_pull_direction(PullDirection::FtB)
            .with_depth(CrossingDepth::Front)
            .with_parent_offset(2)
            .at_stack_position(0);

        assert_eq!(connection.attributes.pull_direction, PullDirection::FtB);
        assert_eq!(connection.attributes.depth, CrossingDepth::Front);
        assert_eq!(connection.attributes.parent_offset, 2);
        assert_eq!(connection.stack_position, Some(0));
        assert_eq!(Connection::default().stack_position, None);
    }
}
