#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod catalog;
mod cli;
mod core;
mod fmt;
mod prelude;
mod quantity;
mod sink;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, cells, prompt, rules, search},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Search(args) => search(&args)?,
        Command::Prompt(args) => prompt(&args)?,
        Command::Cells(args) => cells(&args)?,
        Command::Rules(args) => rules(&args)?,
    }

    info!("done!");
    Ok(())
}
