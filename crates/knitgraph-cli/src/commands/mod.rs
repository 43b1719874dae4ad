//! CLI command implementations

pub mod completions;
pub mod config;
pub mod courses;
pub mod inspect;

use clap::{Args, ValueEnum};
use knitgraph_core::{swatches, KnitGraph};

use crate::config::Config;

/// Reference swatch patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwatchKind {
    Stockinette,
    Rib,
    Seed,
    Lace,
    Cable,
}

/// Swatch selection shared by graph commands
#[derive(Args, Debug)]
pub struct SwatchArgs {
    /// Swatch pattern to build
    #[arg(value_enum)]
    pub swatch: SwatchKind,

    /// Stitches per row (default from config)
    #[arg(long)]
    pub width: Option<usize>,

    /// Number of rows (default from config)
    #[arg(long)]
    pub height: Option<usize>,

    /// Rib band width, rib only (default from config)
    #[arg(long)]
    pub rib_width: Option<usize>,
}

impl SwatchArgs {
    /// Build the selected swatch, filling unset dimensions from `config`
    pub fn build(&self, config: &Config) -> anyhow::Result<KnitGraph> {
        let width = self.width.unwrap_or(config.width);
        let height = self.height.unwrap_or(config.height);
        tracing::info!("Building {:?} swatch {}x{}", self.swatch, width, height);

        let graph = match self.swatch {
            SwatchKind::Stockinette => swatches::stockinette(width, height)?,
            SwatchKind::Rib => {
                let rib_width = self.rib_width.unwrap_or(config.rib_width);
                swatches::rib(width, height, rib_width)?
            }
            SwatchKind::Seed => swatches::seed(width, height)?,
            SwatchKind::Lace => swatches::lace(width, height)?,
            SwatchKind::Cable => swatches::cable(width, height)?,
        };
        Ok(graph)
    }
}
