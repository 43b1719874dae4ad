//! Knit graph: loops, yarns and the pulled-through edge index
//!
//! Edges run from a parent loop to the child loop formed by pulling yarn
//! through it. The edge index is the source of truth; each child's parent
//! stack is a denormalized view of the same edges, and both are updated only
//! by `connect_loops`.

use crate::course::Courses;
use crate::error::{Error, Result};
use crate::knit_loop::{Loop, LoopId};
use crate::pull::{Connection, EdgeAttributes};
use crate::yarn::{Carrier, Yarn, YarnId};
use serde::Serialize;
use std::collections::HashMap;

/// Anything that names a loop in the graph
pub trait GraphMember {
    fn member_id(&self) -> LoopId;
}

impl GraphMember for LoopId {
    fn member_id(&self) -> LoopId {
        *self
    }
}

impl GraphMember for Loop {
    fn member_id(&self) -> LoopId {
        self.loop_id
    }
}

impl<T: GraphMember + ?Sized> GraphMember for &T {
    fn member_id(&self) -> LoopId {
        (**self).member_id()
    }
}

/// A parent -> child edge with its attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub parent: LoopId,
    pub child: LoopId,
    #[serde(flatten)]
    pub attributes: EdgeAttributes,
}

/// Directed graph of loops pulled through loops, strung on yarns
#[derive(Debug, Clone, Default)]
pub struct KnitGraph {
    loops: HashMap<LoopId, Loop>,
    loop_order: Vec<LoopId>,
    yarns: HashMap<YarnId, Yarn>,
    yarn_order: Vec<YarnId>,
    edges: HashMap<(LoopId, LoopId), EdgeAttributes>,
    predecessors: HashMap<LoopId, Vec<LoopId>>,
    successors: HashMap<LoopId, Vec<LoopId>>,
    last_loop_id: Option<LoopId>,
}

impl KnitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a yarn. Yarn ids are unique; re-registering one fails.
    ///
    /// The yarn must be empty: loops reach a yarn only through `add_loop`, so
    /// its feed order always matches loop creation order.
    pub fn add_yarn(&mut self, yarn: Yarn) -> Result<()> {
        if self.yarns.contains_key(&yarn.yarn_id) {
            return Err(Error::YarnExists(yarn.yarn_id));
        }
        if !yarn.is_empty() {
            return Err(Error::YarnNotEmpty(yarn.yarn_id));
        }
        tracing::trace!("Adding yarn {} on carrier {}", yarn.yarn_id, yarn.carrier);
        self.yarn_order.push(yarn.yarn_id.clone());
        self.yarns.insert(yarn.yarn_id.clone(), yarn);
        Ok(())
    }

    /// Add a loop as a node.
    ///
    /// The loop's yarn must already be registered. The loop is appended to
    /// the end of that yarn.
    pub fn add_loop(&mut self, loop_: Loop) -> Result<()> {
        let loop_id = loop_.loop_id;
        if self.loops.contains_key(&loop_id) {
            return Err(Error::LoopExists(loop_id));
        }
        if loop_.has_parents() {
            return Err(Error::LoopHasParents(loop_id));
        }
        let yarn = self
            .yarns
            .get_mut(&loop_.yarn_id)
            .ok_or_else(|| Error::UnregisteredYarn {
                loop_id,
                yarn_id: loop_.yarn_id.clone(),
            })?;
        yarn.add_loop_to_end(loop_id)?;

        tracing::trace!("Adding loop {} on yarn {}", loop_id, loop_.yarn_id);
        self.last_loop_id = Some(self.last_loop_id.map_or(loop_id, |last| last.max(loop_id)));
        self.loop_order.push(loop_id);
        self.loops.insert(loop_id, loop_);
        Ok(())
    }

    /// Create a loop with the next free id on `yarn_id` and add it
    pub fn new_loop(&mut self, yarn_id: &YarnId, is_twisted: bool) -> Result<LoopId> {
        let loop_id = self.next_loop_id()?;
        self.add_loop(Loop::new(loop_id, yarn_id, is_twisted))?;
        Ok(loop_id)
    }

    /// One past the largest loop id ever added
    pub fn next_loop_id(&self) -> Result<LoopId> {
        match self.last_loop_id {
            None => Ok(LoopId(0)),
            Some(last) => last.next().ok_or(Error::LoopIdsExhausted(last)),
        }
    }

    /// Pull `child` through `parent`.
    ///
    /// Records the edge and pushes `parent` onto the child's parent stack at
    /// `connection.stack_position` (top by default). All preconditions are
    /// checked first, so a failure leaves both the edge index and the stack
    /// untouched.
    pub fn connect_loops(
        &mut self,
        parent: LoopId,
        child: LoopId,
        connection: Connection,
    ) -> Result<()> {
        for id in [parent, child] {
            if !self.contains(id) {
                return Err(Error::MissingEndpoint {
                    parent,
                    child,
                    missing: id,
                });
            }
        }
        if parent == child {
            return Err(Error::SelfConnection(child));
        }
        if self.edges.contains_key(&(parent, child)) {
            return Err(Error::EdgeExists { parent, child });
        }

        let child_loop = self.loops.get_mut(&child).ok_or(Error::MissingEndpoint {
            parent,
            child,
            missing: child,
        })?;
        child_loop.add_parent_loop(parent, connection.stack_position)?;

        tracing::trace!(
            "Connecting {} -> {} ({}, depth {}, offset {})",
            parent,
            child,
            connection.attributes.pull_direction,
            connection.attributes.depth.as_i8(),
            connection.attributes.parent_offset
        );
        self.edges.insert((parent, child), connection.attributes);
        self.predecessors.entry(child).or_default().push(parent);
        self.successors.entry(parent).or_default().push(child);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether a loop id (or loop) is a node in the graph
    pub fn contains(&self, item: impl GraphMember) -> bool {
        self.loops.contains_key(&item.member_id())
    }

    /// Look up a loop by id
    pub fn get(&self, loop_id: LoopId) -> Result<&Loop> {
        self.loops.get(&loop_id).ok_or(Error::LoopNotFound(loop_id))
    }

    pub fn get_yarn(&self, yarn_id: &YarnId) -> Option<&Yarn> {
        self.yarns.get(yarn_id)
    }

    /// Carrier of every yarn, in registration order
    pub fn get_carriers(&self) -> Vec<Carrier> {
        self.yarns().map(|yarn| yarn.carrier).collect()
    }

    /// Yarns in registration order
    pub fn yarns(&self) -> impl Iterator<Item = &Yarn> + '_ {
        self.yarn_order.iter().filter_map(|id| self.yarns.get(id))
    }

    /// Loops in insertion order
    pub fn loops(&self) -> impl Iterator<Item = &Loop> + '_ {
        self.loop_order.iter().filter_map(|id| self.loops.get(id))
    }

    /// Loop ids in insertion order
    pub fn loop_ids(&self) -> &[LoopId] {
        &self.loop_order
    }

    pub fn last_loop_id(&self) -> Option<LoopId> {
        self.last_loop_id
    }

    pub fn loop_count(&self) -> usize {
        self.loop_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loop_order.is_empty()
    }

    /// Attributes of the edge `parent -> child`, if any
    pub fn edge(&self, parent: LoopId, child: LoopId) -> Option<&EdgeAttributes> {
        self.edges.get(&(parent, child))
    }

    /// Direct predecessors of `child`, in connection order
    pub fn parents_of(&self, child: LoopId) -> &[LoopId] {
        self.predecessors.get(&child).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Direct successors of `parent`, in connection order
    pub fn children_of(&self, parent: LoopId) -> &[LoopId] {
        self.successors.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every edge, grouped by child in loop insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.loop_order.iter().flat_map(move |&child| {
            self.parents_of(child).iter().filter_map(move |&parent| {
                self.edges.get(&(parent, child)).map(|&attributes| Edge {
                    parent,
                    child,
                    attributes,
                })
            })
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Courses
    // ─────────────────────────────────────────────────────────────────────────

    /// Partition the loops into courses (see [`Courses`])
    pub fn get_courses(&self) -> Courses {
        Courses::decompose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pull::{CrossingDepth, PullDirection};

    fn graph_with_yarn() -> (KnitGraph, YarnId) {
        let mut graph = KnitGraph::new();
        let yarn_id = YarnId::from("yarn");
        graph.add_yarn(Yarn::new(yarn_id.clone(), Carrier(3))).unwrap();
        (graph, yarn_id)
    }

    #[test]
    fn test_add_loop() {
        let (mut graph, yarn_id) = graph_with_yarn();
        let loop_ = Loop::new(LoopId(0), yarn_id.clone(), false);

        graph.add_loop(loop_.clone()).unwrap();

        assert!(graph.contains(LoopId(0)));
        assert!(graph.contains(&loop_));
        assert_eq!(graph.get(LoopId(0)).unwrap(), &loop_);
        assert_eq!(graph.get_yarn(&yarn_id).unwrap().loops(), &[LoopId(0)]);
        assert_eq!(graph.loop_count(), 1);
    }

    #[test]
    fn test_add_loop_unregistered_yarn() {
        let (mut graph, _) = graph_with_yarn();

        let err = graph
            .add_loop(Loop::new(LoopId(0), "missing", false))
            .unwrap_err();

        assert_eq!(
            err,
            Error::UnregisteredYarn {
                loop_id: LoopId(0),
                yarn_id: YarnId::from("missing"),
            }
        );
        assert!(graph.is_empty());
        assert!(!graph.contains(LoopId(0)));
        assert_eq!(graph.yarns().count(), 1);
        assert!(graph.get_yarn(&YarnId::from("yarn")).unwrap().is_empty());
    }

    #[test]
    fn test_prefed_yarn_rejected() {
        let mut graph = KnitGraph::new();
        let mut yarn = Yarn::new("yarn", Carrier(1));
        yarn.add_loop_to_end(LoopId(7)).unwrap();

        let err = graph.add_yarn(yarn).unwrap_err();

        assert_eq!(err, Error::YarnNotEmpty(YarnId::from("yarn")));
        assert!(graph.get_yarn(&YarnId::from("yarn")).is_none());
        assert!(graph.get_carriers().is_empty());
    }

    #[test]
    fn test_yarn_order_follows_add_loop_order() {
        let (mut graph, yarn_id) = graph_with_yarn();
        for id in [4, 0, 9] {
            graph.add_loop(Loop::new(LoopId(id), yarn_id.clone(), false)).unwrap();
        }

        let yarn = graph.get_yarn(&yarn_id).unwrap();
        assert_eq!(yarn.loops(), graph.loop_ids());
    }

    #[test]
    fn test_duplicate_loop_rejected() {
        let (mut graph, yarn_id) = graph_with_yarn();
        graph.add_loop(Loop::new(LoopId(0), yarn_id.clone(), false)).unwrap();

        let err = graph
            .add_loop(Loop::new(LoopId(0), yarn_id.clone(), true))
            .unwrap_err();

        assert_eq!(err, Error::LoopExists(LoopId(0)));
        assert!(!graph.get(LoopId(0)).unwrap().is_twisted);
        assert_eq!(graph.get_yarn(&yarn_id).unwrap().len(), 1);
    }

    #[test]
    fn test_loop_with_parents_rejected() {
        let (mut graph, yarn_id) = graph_with_yarn();
        let mut loop_ = Loop::new(LoopId(1), yarn_id, false);
        loop_.add_parent_loop(LoopId(0), None).unwrap();

        assert_eq!(
            graph.add_loop(loop_).unwrap_err(),
            Error::LoopHasParents(LoopId(1))
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn test_duplicate_yarn_rejected() {
        let (mut graph, yarn_id) = graph_with_yarn();
        graph.new_loop(&yarn_id, false).unwrap();

        let err = graph.add_yarn(Yarn::new("yarn", Carrier(9))).unwrap_err();

        assert_eq!(err, Error::YarnExists(yarn_id.clone()));
        assert_eq!(graph.get_carriers(), vec![Carrier(3)]);
        assert_eq!(graph.get_yarn(&yarn_id).unwrap().len(), 1);
    }

    #[test]
    fn test_new_loop_allocates_sequential_ids() {
        let (mut graph, yarn_id) = graph_with_yarn();
        graph.add_loop(Loop::new(LoopId(5), yarn_id.clone(), false)).unwrap();

        let next = graph.new_loop(&yarn_id, true).unwrap();

        assert_eq!(next, LoopId(6));
        assert!(graph.get(next).unwrap().is_twisted);
        assert_eq!(graph.last_loop_id(), Some(LoopId(6)));
        assert_eq!(KnitGraph::new().next_loop_id(), Ok(LoopId(0)));
    }

    #[test]
    fn test_new_loop_after_max_id_fails() {
        let (mut graph, yarn_id) = graph_with_yarn();
        graph
            .add_loop(Loop::new(LoopId(u64::MAX), yarn_id.clone(), false))
            .unwrap();

        let err = graph.new_loop(&yarn_id, false).unwrap_err();

        assert_eq!(err, Error::LoopIdsExhausted(LoopId(u64::MAX)));
        assert_eq!(graph.loop_ids(), &[LoopId(u64::MAX)]);
        assert_eq!(graph.get_yarn(&yarn_id).unwrap().len(), 1);
    }

    #[test]
    fn test_get_missing_loop() {
        let (graph, _) = graph_with_yarn();
        assert_eq!(
            graph.get(LoopId(42)).unwrap_err(),
            Error::LoopNotFound(LoopId(42))
        );
    }

    #[test]
    fn test_connect_loops_default() {
        let (mut graph, yarn_id) = graph_with_yarn();
        let parent = graph.new_loop(&yarn_id, false).unwrap();
        let child = graph.new_loop(&yarn_id, false).unwrap();

        graph.connect_loops(parent, child, Connection::default()).unwrap();

        let attributes = graph.edge(parent, child).unwrap();
        assert_eq!(attributes.pull_direction, PullDirection::BtF);
        assert_eq!(attributes.depth, CrossingDepth::Level);
        assert_eq!(attributes.parent_offset, 0);
        assert_eq!(graph.get(child).unwrap().parent_loops(), &[parent]);
        assert_eq!(graph.parents_of(child), &[parent]);
        assert_eq!(graph.children_of(parent), &[child]);
        assert!(graph.edge(child, parent).is_none());
    }

    #[test]
    fn test_connect_loops_with_attributes_and_stack_position() {
        let (mut graph, yarn_id) = graph_with_yarn();
        let left = graph.new_loop(&yarn_id, false).unwrap();
        let right = graph.new_loop(&yarn_id, false).unwrap();
        let child = graph.new_loop(&yarn_id, false).unwrap();

        graph.connect_loops(left, child, Connection::default()).unwrap();
        let cross = Connection::new()
            .with_pull_direction(PullDirection::FtB)
            .with_depth(CrossingDepth::Front)
            .with_parent_offset(-1)
            .at_stack_position(0);
        graph.connect_loops(right, child, cross).unwrap();

        assert_eq!(graph.get(child).unwrap().parent_loops(), &[right, left]);
        assert_eq!(graph.edge(right, child), Some(&cross.attributes));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_connect_loops_missing_endpoint() {
        let (mut graph, yarn_id) = graph_with_yarn();
        let child = graph.new_loop(&yarn_id, false).unwrap();

        let err = graph
            .connect_loops(LoopId(99), child, Connection::default())
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingEndpoint {
                parent: LoopId(99),
                child,
                missing: LoopId(99),
            }
        );

        let err = graph
            .connect_loops(child, LoopId(98), Connection::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingEndpoint { missing, .. } if missing == LoopId(98)));

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.get(child).unwrap().parent_loops().is_empty());
    }

    #[test]
    fn test_connect_loops_bad_stack_position_leaves_graph_unchanged() {
        let (mut graph, yarn_id) = graph_with_yarn();
        let parent = graph.new_loop(&yarn_id, false).unwrap();
        let child = graph.new_loop(&yarn_id, false).unwrap();

        let err = graph
            .connect_loops(parent, child, Connection::new().at_stack_position(1))
            .unwrap_err();

        assert!(matches!(err, Error::StackPositionOutOfRange { .. }));
        assert!(graph.edge(parent, child).is_none());
        assert!(graph.parents_of(child).is_empty());
        assert!(graph.get(child).unwrap().parent_loops().is_empty());
    }

    #[test]
    fn test_connect_loops_rejects_self_and_duplicate_edges() {
        let (mut graph, yarn_id) = graph_with_yarn();
        let parent = graph.new_loop(&yarn_id, false).unwrap();
        let child = graph.new_loop(&yarn_id, false).unwrap();

        assert_eq!(
            graph
                .connect_loops(child, child, Connection::default())
                .unwrap_err(),
            Error::SelfConnection(child)
        );

        graph.connect_loops(parent, child, Connection::default()).unwrap();
        assert_eq!(
            graph
                .connect_loops(parent, child, Connection::default())
                .unwrap_err(),
            Error::EdgeExists { parent, child }
        );
        assert_eq!(graph.get(child).unwrap().parent_loops(), &[parent]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_get_carriers_in_registration_order() {
        let mut graph = KnitGraph::new();
        graph.add_yarn(Yarn::new("contrast", Carrier(5))).unwrap();
        graph.add_yarn(Yarn::new("main", Carrier(2))).unwrap();
        graph.add_yarn(Yarn::new("accent", Carrier(7))).unwrap();

        assert_eq!(
            graph.get_carriers(),
            vec![Carrier(5), Carrier(2), Carrier(7)]
        );
    }

    #[test]
    fn test_edges_iterate_by_child_insertion_order() {
        let (mut graph, yarn_id) = graph_with_yarn();
        let a = graph.new_loop(&yarn_id, false).unwrap();
        let b = graph.new_loop(&yarn_id, false).unwrap();
        let c = graph.new_loop(&yarn_id, false).unwrap();
        let d = graph.new_loop(&yarn_id, false).unwrap();
        graph.connect_loops(b, d, Connection::default()).unwrap();
        graph.connect_loops(a, c, Connection::default()).unwrap();
        graph.connect_loops(a, d, Connection::default()).unwrap();

        let edges: Vec<(LoopId, LoopId)> = graph.edges().map(|e| (e.parent, e.child)).collect();
        assert_eq!(edges, vec![(a, c), (b, d), (a, d)]);
    }
}
