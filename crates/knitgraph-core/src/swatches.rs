//! Reference swatches
//!
//! Small fabrics on a single yarn, knit in serpentine order: each row visits
//! the previous row's loops in reverse. Every swatch of `height` rows has
//! exactly `height` courses of `width` loops.

use crate::error::Result;
use crate::graph::KnitGraph;
use crate::knit_loop::LoopId;
use crate::limits::{validate_rib_width, validate_swatch_dimensions};
use crate::pull::{opposite, Connection, CrossingDepth, PullDirection};
use crate::yarn::{Carrier, Yarn, YarnId};

/// Yarn id used by every swatch
pub const SWATCH_YARN: &str = "yarn";

/// Carrier feeding the swatch yarn
pub const SWATCH_CARRIER: Carrier = Carrier(3);

fn start_swatch(width: usize) -> Result<(KnitGraph, YarnId, Vec<LoopId>)> {
    let mut graph = KnitGraph::new();
    let yarn_id = YarnId::from(SWATCH_YARN);
    graph.add_yarn(Yarn::new(yarn_id.clone(), SWATCH_CARRIER))?;
    let cast_on = (0..width)
        .map(|_| graph.new_loop(&yarn_id, false))
        .collect::<Result<Vec<_>>>()?;
    Ok((graph, yarn_id, cast_on))
}

/// Knit one loop through `parent` and return it
fn knit(
    graph: &mut KnitGraph,
    yarn_id: &YarnId,
    parent: LoopId,
    direction: PullDirection,
) -> Result<LoopId> {
    let child = graph.new_loop(yarn_id, false)?;
    graph.connect_loops(
        parent,
        child,
        Connection::new().with_pull_direction(direction),
    )?;
    Ok(child)
}

/// Pull direction of the edge that formed `loop_id`, BtF for cast-on loops
fn formed_direction(graph: &KnitGraph, loop_id: LoopId) -> PullDirection {
    graph
        .parents_of(loop_id)
        .first()
        .and_then(|&parent| graph.edge(parent, loop_id))
        .map(|attributes| attributes.pull_direction)
        .unwrap_or_default()
}

/// Plain knitting: every stitch back to front
pub fn stockinette(width: usize, height: usize) -> Result<KnitGraph> {
    validate_swatch_dimensions(width, height)?;
    let (mut graph, yarn_id, mut prior_row) = start_swatch(width)?;

    for _ in 1..height {
        prior_row = prior_row
            .iter()
            .rev()
            .map(|&parent| knit(&mut graph, &yarn_id, parent, PullDirection::BtF))
            .collect::<Result<Vec<_>>>()?;
    }

    tracing::debug!("Built {}x{} stockinette swatch", width, height);
    Ok(graph)
}

/// Columns alternate knit and purl in bands of `rib_width`
pub fn rib(width: usize, height: usize, rib_width: usize) -> Result<KnitGraph> {
    validate_swatch_dimensions(width, height)?;
    validate_rib_width(rib_width, width)?;
    let (mut graph, yarn_id, mut prior_row) = start_swatch(width)?;

    for row in 1..height {
        let mut next_row = Vec::with_capacity(width);
        for (column, &parent) in prior_row.iter().rev().enumerate() {
            let direction = if row == 1 {
                if (column / rib_width) % 2 == 0 {
                    PullDirection::BtF
                } else {
                    PullDirection::FtB
                }
            } else {
                formed_direction(&graph, parent)
            };
            next_row.push(knit(&mut graph, &yarn_id, parent, direction)?);
        }
        prior_row = next_row;
    }

    tracing::debug!(
        "Built {}x{} rib swatch with bands of {}",
        width,
        height,
        rib_width
    );
    Ok(graph)
}

/// Every stitch flips the pull direction of the stitch below it
pub fn seed(width: usize, height: usize) -> Result<KnitGraph> {
    validate_swatch_dimensions(width, height)?;
    let (mut graph, yarn_id, mut prior_row) = start_swatch(width)?;

    for row in 1..height {
        let mut next_row = Vec::with_capacity(width);
        for (column, &parent) in prior_row.iter().rev().enumerate() {
            let direction = if row == 1 {
                if column % 2 == 0 {
                    PullDirection::BtF
                } else {
                    PullDirection::FtB
                }
            } else {
                opposite(formed_direction(&graph, parent))
            };
            next_row.push(knit(&mut graph, &yarn_id, parent, direction)?);
        }
        prior_row = next_row;
    }

    tracing::debug!("Built {}x{} seed swatch", width, height);
    Ok(graph)
}

/// Odd rows work k2tog then yarn-over across the row; even rows are plain
pub fn lace(width: usize, height: usize) -> Result<KnitGraph> {
    validate_swatch_dimensions(width, height)?;
    let (mut graph, yarn_id, mut prior_row) = start_swatch(width)?;

    for row in 1..height {
        let parents: Vec<LoopId> = prior_row.iter().rev().copied().collect();
        let mut next_row = Vec::with_capacity(width);
        if row % 2 == 0 {
            for parent in parents {
                next_row.push(knit(&mut graph, &yarn_id, parent, PullDirection::BtF)?);
            }
        } else {
            for pair in parents.chunks(2) {
                match *pair {
                    [bottom, top] => {
                        let decrease = graph.new_loop(&yarn_id, false)?;
                        graph.connect_loops(bottom, decrease, Connection::new())?;
                        graph.connect_loops(
                            top,
                            decrease,
                            Connection::new().with_parent_offset(1),
                        )?;
                        let yarn_over = graph.new_loop(&yarn_id, false)?;
                        next_row.push(decrease);
                        next_row.push(yarn_over);
                    }
                    [single] => {
                        next_row.push(knit(&mut graph, &yarn_id, single, PullDirection::BtF)?);
                    }
                    _ => unreachable!("chunks(2) yields one or two loops"),
                }
            }
        }
        prior_row = next_row;
    }

    tracing::debug!("Built {}x{} lace swatch", width, height);
    Ok(graph)
}

/// Odd rows cross each pair of stitches, the first child in front
pub fn cable(width: usize, height: usize) -> Result<KnitGraph> {
    validate_swatch_dimensions(width, height)?;
    let (mut graph, yarn_id, mut prior_row) = start_swatch(width)?;

    for row in 1..height {
        let parents: Vec<LoopId> = prior_row.iter().rev().copied().collect();
        let mut next_row = Vec::with_capacity(width);
        if row % 2 == 0 {
            for parent in parents {
                next_row.push(knit(&mut graph, &yarn_id, parent, PullDirection::BtF)?);
            }
        } else {
            for pair in parents.chunks(2) {
                match *pair {
                    [left, right] => {
                        let over = graph.new_loop(&yarn_id, false)?;
                        graph.connect_loops(
                            right,
                            over,
                            Connection::new()
                                .with_depth(CrossingDepth::Front)
                                .with_parent_offset(1),
                        )?;
                        let under = graph.new_loop(&yarn_id, false)?;
                        graph.connect_loops(
                            left,
                            under,
                            Connection::new()
                                .with_depth(CrossingDepth::Behind)
                                .with_parent_offset(-1),
                        )?;
                        next_row.push(over);
                        next_row.push(under);
                    }
                    [single] => {
                        next_row.push(knit(&mut graph, &yarn_id, single, PullDirection::BtF)?);
                    }
                    _ => unreachable!("chunks(2) yields one or two loops"),
                }
            }
        }
        prior_row = next_row;
    }

    tracing::debug!("Built {}x{} cable swatch", width, height);
    Ok(graph)
}
