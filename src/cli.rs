mod busbar;
mod catalog;
mod cells;
mod prompt;
mod rules;
mod search;

use clap::{Parser, Subcommand};

pub use self::{
    cells::{CellsArgs, cells},
    prompt::{PromptArgs, prompt},
    rules::{RulesArgs, rules},
    search::{SearchArgs, search},
};
use crate::cli::{busbar::BusbarArgs, catalog::CatalogArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sweep the catalog cells for layouts matching the target voltage and energy.
    #[clap(name = "search")]
    Search(Box<SearchArgs>),

    /// Run searches interactively and collect the accepted layouts into a CSV file.
    #[clap(name = "prompt")]
    Prompt(Box<PromptArgs>),

    /// Print the cell catalog.
    #[clap(name = "cells")]
    Cells(CellsArgs),

    /// Print the effective feasibility rules as TOML.
    #[clap(name = "rules")]
    Rules(RulesArgs),
}

/// Everything a search needs apart from the targets.
#[derive(Parser)]
pub struct PipelineArgs {
    #[clap(flatten)]
    pub catalog: CatalogArgs,

    #[clap(flatten)]
    pub busbar: BusbarArgs,

    #[clap(flatten)]
    pub rules: RulesArgs,

    /// Allowed module (segment) counts, in the order they are tried.
    #[clap(
        long = "module-counts",
        env = "MODULE_COUNTS",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "4,5,6,7",
    )]
    pub module_counts: Vec<u32>,
}
