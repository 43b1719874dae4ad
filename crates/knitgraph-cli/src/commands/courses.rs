//! Courses command

use crate::commands::SwatchArgs;
use crate::output::{join_ids, to_json, OutputFormat, Table};
use crate::AppContext;

pub fn run(args: &SwatchArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = args.build(&ctx.config)?;
    let courses = graph.get_courses();
    tracing::info!(
        "Found {} courses over {} loops",
        courses.len(),
        graph.loop_count()
    );

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&courses)?),
        OutputFormat::Table => {
            let mut table = Table::new(["Course", "Loops"]);
            for (index, loops) in courses.iter() {
                table.add_row(vec![index.to_string(), join_ids(loops)]);
            }
            print!("{}", table.render());
            if !ctx.quiet {
                println!();
                println!(
                    "{} courses, {} loops",
                    courses.len(),
                    graph.loop_count()
                );
            }
        }
    }
    Ok(())
}
