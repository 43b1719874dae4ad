//! Course decomposition
//!
//! A course is the graph analogue of a fabric row: a run of loops, in the
//! order they were added, none of which was pulled through another loop of
//! the same run. The partition is a single pass over loops in insertion
//! order. A loop whose direct predecessor is already in the open course
//! closes that course and opens the next one. This follows the order the
//! stitches were formed rather than a topological sort, so two loops that
//! do not depend on each other can still land in different courses.
//!
//! Cost is O(n·m) for n loops and at most m parents per loop.

use crate::graph::KnitGraph;
use crate::knit_loop::LoopId;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Course index of every loop, and the loops of every course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Courses {
    /// Loop id -> course index
    loop_courses: BTreeMap<LoopId, usize>,

    /// Course index -> loop ids in insertion order
    course_loops: BTreeMap<usize, Vec<LoopId>>,
}

impl Courses {
    pub(crate) fn decompose(graph: &KnitGraph) -> Self {
        let mut courses = Self::default();
        let mut index = 0;
        let mut members: HashSet<LoopId> = HashSet::new();
        let mut current: Vec<LoopId> = Vec::new();

        for &loop_id in graph.loop_ids() {
            let depends_on_current = graph
                .parents_of(loop_id)
                .iter()
                .any(|parent| members.contains(parent));

            if depends_on_current {
                courses.record(index, std::mem::take(&mut current));
                members.clear();
                index += 1;
            }
            members.insert(loop_id);
            current.push(loop_id);
        }
        if !current.is_empty() {
            courses.record(index, current);
        }

        tracing::debug!(
            "Decomposed {} loops into {} courses",
            courses.loop_courses.len(),
            courses.course_loops.len()
        );
        courses
    }

    fn record(&mut self, index: usize, loops: Vec<LoopId>) {
        for &loop_id in &loops {
            self.loop_courses.insert(loop_id, index);
        }
        self.course_loops.insert(index, loops);
    }

    /// Course index of a loop
    pub fn course_of(&self, loop_id: LoopId) -> Option<usize> {
        self.loop_courses.get(&loop_id).copied()
    }

    /// Loops of a course, in insertion order
    pub fn course(&self, index: usize) -> Option<&[LoopId]> {
        self.course_loops.get(&index).map(Vec::as_slice)
    }

    /// Number of courses
    pub fn len(&self) -> usize {
        self.course_loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.course_loops.is_empty()
    }

    /// Courses in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[LoopId])> + '_ {
        self.course_loops
            .iter()
            .map(|(&index, loops)| (index, loops.as_slice()))
    }

    pub fn loop_courses(&self) -> &BTreeMap<LoopId, usize> {
        &self.loop_courses
    }

    pub fn course_loops(&self) -> &BTreeMap<usize, Vec<LoopId>> {
        &self.course_loops
    }

    pub fn into_maps(self) -> (BTreeMap<LoopId, usize>, BTreeMap<usize, Vec<LoopId>>) {
        (self.loop_courses, self.course_loops)
    }
}
