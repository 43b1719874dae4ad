//! Inspect command: loops, yarns and edges of a swatch

use clap::Args;
use knitgraph_core::{Carrier, Edge, KnitGraph, Loop, LoopId, Yarn};
use serde::Serialize;

use crate::commands::SwatchArgs;
use crate::output::{join_ids, to_json, OutputFormat, Table};
use crate::AppContext;

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub swatch: SwatchArgs,

    /// Show a single loop and its edges
    #[arg(short = 'l', long = "loop")]
    pub loop_id: Option<u64>,
}

/// Serializable view of a graph
#[derive(Serialize)]
struct GraphReport<'a> {
    carriers: Vec<Carrier>,
    yarns: Vec<&'a Yarn>,
    loops: Vec<&'a Loop>,
    edges: Vec<Edge>,
}

pub fn run(args: &InspectArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = args.swatch.build(&ctx.config)?;

    let report = match args.loop_id {
        Some(id) => loop_report(&graph, LoopId(id))?,
        None => GraphReport {
            carriers: graph.get_carriers(),
            yarns: graph.yarns().collect(),
            loops: graph.loops().collect(),
            edges: graph.edges().collect(),
        },
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Table => print!("{}", render_tables(&report)),
    }
    Ok(())
}

fn loop_report(graph: &KnitGraph, loop_id: LoopId) -> anyhow::Result<GraphReport<'_>> {
    let loop_ = graph.get(loop_id)?;
    let yarn = graph.get_yarn(&loop_.yarn_id);
    let edges = graph
        .edges()
        .filter(|edge| edge.parent == loop_id || edge.child == loop_id)
        .collect();

    Ok(GraphReport {
        carriers: yarn.iter().map(|yarn| yarn.carrier).collect(),
        yarns: yarn.into_iter().collect(),
        loops: vec![loop_],
        edges,
    })
}

fn render_tables(report: &GraphReport<'_>) -> String {
    let mut yarns = Table::new(["Yarn", "Carrier", "Loops"]);
    for yarn in &report.yarns {
        yarns.add_row(vec![
            yarn.yarn_id.to_string(),
            yarn.carrier.to_string(),
            yarn.len().to_string(),
        ]);
    }

    let mut loops = Table::new(["Loop", "Yarn", "Twisted", "Parents"]);
    for loop_ in &report.loops {
        loops.add_row(vec![
            loop_.loop_id.to_string(),
            loop_.yarn_id.to_string(),
            loop_.is_twisted.to_string(),
            join_ids(loop_.parent_loops()),
        ]);
    }

    let mut edges = Table::new(["Parent", "Child", "Pull", "Depth", "Offset"]);
    for edge in &report.edges {
        edges.add_row(vec![
            edge.parent.to_string(),
            edge.child.to_string(),
            edge.attributes.pull_direction.to_string(),
            edge.attributes.depth.as_i8().to_string(),
            edge.attributes.parent_offset.to_string(),
        ]);
    }

    let mut out = yarns.render();
    out.push('\n');
    out.push_str(&loops.render());
    if !edges.is_empty() {
        out.push('\n');
        out.push_str(&edges.render());
    }
    out
}
