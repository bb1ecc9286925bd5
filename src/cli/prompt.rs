//! Interactive search loop.

use std::{io::Write, path::PathBuf};

use bon::Builder;
use clap::Parser;
use itertools::Itertools;
use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    catalog::{CellCatalog, CellRecord},
    cli::PipelineArgs,
    core::{busbar::BusbarModel, feasibility::Ruleset, generator::Generator, search::Search},
    prelude::*,
    quantity::{
        electric::Volts,
        energy::{KilowattHours, Megajoules},
    },
    sink::CsvSink,
    tables::build_evaluations_table,
};

#[derive(Parser)]
pub struct PromptArgs {
    #[clap(flatten)]
    pub pipeline: PipelineArgs,

    /// CSV file the accepted layouts are appended to.
    #[clap(long = "output", env = "OUTPUT_PATH", default_value = "configurations.csv")]
    pub output: PathBuf,
}

/// Source of user input lines.
pub trait LineReader {
    /// Read the next line, [`None`] at the end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl LineReader for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => {
                let _ = self.add_history_entry(line.as_str());
                Ok(Some(line))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(error) => Err(error).context("failed to read the input"),
        }
    }
}

#[instrument(skip_all)]
pub fn prompt(args: &PromptArgs) -> Result {
    let catalog = args.pipeline.catalog.load()?;
    let busbar = args.pipeline.busbar.model()?;
    let ruleset = args.pipeline.rules.ruleset()?;
    let mut sink = CsvSink::append_to(&args.output)?;
    let mut editor = DefaultEditor::new().context("failed to initialise the line editor")?;

    let n_appended = Session::builder()
        .catalog(&catalog)
        .busbar(&busbar)
        .ruleset(&ruleset)
        .module_counts(&args.pipeline.module_counts)
        .build()
        .run(&mut editor, &mut sink)?;
    sink.into_inner()?;
    info!(n_appended, path = %args.output.display(), "bye!");
    Ok(())
}

#[derive(Builder)]
struct Session<'a> {
    catalog: &'a CellCatalog,
    busbar: &'a BusbarModel,
    ruleset: &'a Ruleset,
    module_counts: &'a [u32],
}

impl Session<'_> {
    /// Serve the menu until the user exits or the input ends.
    ///
    /// Returns the total number of appended rows.
    fn run<W: Write>(&self, reader: &mut impl LineReader, sink: &mut CsvSink<W>) -> Result<usize> {
        let mut n_appended = 0;
        loop {
            println!("1) add configuration search");
            println!("2) exit");
            let Some(choice) = reader.read_line("> ")? else {
                break;
            };
            match choice.trim() {
                "1" => {
                    let Some(n_search_appended) = self.search(reader, sink)? else {
                        break;
                    };
                    n_appended += n_search_appended;
                }
                "2" => break,
                "" => {}
                choice => warn!(choice, "unknown menu option"),
            }
        }
        Ok(n_appended)
    }

    /// Ask for the targets, run the search, and append the accepted layouts.
    ///
    /// Returns [`None`] when the input ends halfway.
    fn search<W: Write>(
        &self,
        reader: &mut impl LineReader,
        sink: &mut CsvSink<W>,
    ) -> Result<Option<usize>> {
        let Some(cell) = self.ask_cell(reader)? else { return Ok(None) };
        let Some(target_voltage) = ask(reader, "target voltage (V): ")?.map(Volts) else {
            return Ok(None);
        };
        let Some(voltage_tolerance) = ask(reader, "voltage tolerance (V): ")?.map(Volts) else {
            return Ok(None);
        };
        let Some(target_energy) = ask(reader, "target energy (MJ): ")?.map(Megajoules) else {
            return Ok(None);
        };
        let Some(energy_tolerance) = ask(reader, "energy tolerance (MJ): ")?.map(Megajoules)
        else {
            return Ok(None);
        };

        let generator = Generator::builder()
            .target_voltage(target_voltage)
            .voltage_tolerance(voltage_tolerance)
            .target_energy(KilowattHours::from(target_energy))
            .energy_tolerance(KilowattHours::from(energy_tolerance))
            .module_counts(self.module_counts)
            .build();
        let evaluations = Search::builder()
            .generator(&generator)
            .busbar(self.busbar)
            .ruleset(self.ruleset)
            .build()
            .run(cell);

        let feasible = evaluations.iter().filter(|evaluation| evaluation.is_feasible()).collect_vec();
        if feasible.is_empty() {
            warn!(n_evaluated = evaluations.len(), "no feasible layouts, try widening the tolerances");
        } else {
            println!("{}", build_evaluations_table(&feasible));
        }
        let n_appended = sink.append_feasible(&evaluations)?;
        info!(n_appended, "appended");
        Ok(Some(n_appended))
    }

    fn ask_cell(&self, reader: &mut impl LineReader) -> Result<Option<&CellRecord>> {
        loop {
            let Some(name) = reader.read_line("cell name: ")? else { return Ok(None) };
            match self.catalog.get(name.trim()) {
                Ok(cell) => return Ok(Some(cell)),
                Err(error) => warn!(%error, "try again"),
            }
        }
    }
}

/// Ask until the answer parses as a finite, non-negative number.
fn ask(reader: &mut impl LineReader, prompt: &str) -> Result<Option<f64>> {
    loop {
        let Some(line) = reader.read_line(prompt)? else { return Ok(None) };
        match line.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => return Ok(Some(value)),
            Ok(_) => warn!(input = line.trim(), "expected a finite non-negative number"),
            Err(error) => warn!(input = line.trim(), %error, "not a number"),
        }
    }
}
