//! knitgraph core - topology of knitted fabric
//!
//! Loops strung along yarns form a directed graph: an edge runs from a
//! parent loop to the child loop produced by pulling yarn through it. Each
//! edge records the pull direction, cable crossing depth and needle offset
//! that downstream machine-instruction generators need. The graph can be
//! partitioned into courses (fabric rows).

pub mod course;
pub mod error;
pub mod graph;
pub mod knit_loop;
pub mod limits;
pub mod pull;
pub mod swatches;
pub mod yarn;

pub use course::Courses;
pub use error::{Error, Result};
pub use graph::{Edge, GraphMember, KnitGraph};
pub use knit_loop::{Loop, LoopId};
pub use limits::ValidationError;
pub use pull::{opposite, Connection, CrossingDepth, EdgeAttributes, PullDirection};
pub use yarn::{Carrier, Yarn, YarnId};
