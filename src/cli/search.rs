use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::{
    catalog::{CellCatalog, CellRecord},
    cli::PipelineArgs,
    core::{field::Field, generator::Generator, search::Search},
    prelude::*,
    quantity::{electric::Volts, energy::KilowattHours},
    sink::CsvSink,
    tables::build_evaluations_table,
};

#[derive(Parser)]
pub struct SearchArgs {
    #[clap(flatten)]
    pub pipeline: PipelineArgs,

    /// Cell to sweep, may be repeated. All catalog cells are swept when omitted.
    #[clap(long = "cell")]
    pub cells: Vec<String>,

    #[clap(long = "target-voltage-volts", env = "TARGET_VOLTAGE_VOLTS")]
    pub target_voltage: Volts,

    #[clap(long = "voltage-tolerance-volts", default_value = "25", env = "VOLTAGE_TOLERANCE_VOLTS")]
    pub voltage_tolerance: Volts,

    #[clap(long = "target-energy-kilowatt-hours", env = "TARGET_ENERGY_KILOWATT_HOURS")]
    pub target_energy: KilowattHours,

    #[clap(
        long = "energy-tolerance-kilowatt-hours",
        default_value = "3",
        env = "ENERGY_TOLERANCE_KILOWATT_HOURS"
    )]
    pub energy_tolerance: KilowattHours,

    /// Also list the rejected layouts together with the violated rules.
    #[clap(long)]
    pub show_rejected: bool,

    /// Sort the listed layouts by this field, ascending. Undefined values go last.
    #[clap(long = "sort-by", value_enum)]
    pub sort_by: Option<Field>,

    /// Append the accepted layouts to this CSV file.
    #[clap(long = "output", env = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,
}

impl SearchArgs {
    /// Check the targets and build the generator over them.
    fn generator(&self) -> Result<Generator<'_>> {
        for (name, value) in [
            ("target voltage", self.target_voltage.0),
            ("voltage tolerance", self.voltage_tolerance.0),
            ("target energy", self.target_energy.0),
            ("energy tolerance", self.energy_tolerance.0),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{name} must be a finite non-negative number, got {value}",
            );
        }
        Ok(Generator::builder()
            .target_voltage(self.target_voltage)
            .voltage_tolerance(self.voltage_tolerance)
            .target_energy(self.target_energy)
            .energy_tolerance(self.energy_tolerance)
            .module_counts(&self.pipeline.module_counts)
            .build())
    }
}

/// Resolve the requested cells, or take the whole catalog when none are requested.
///
/// Unknown names are reported and skipped, it only fails when nothing is left to sweep.
fn select_cells<'a>(catalog: &'a CellCatalog, names: &[String]) -> Result<Vec<&'a CellRecord>> {
    if names.is_empty() {
        return Ok(catalog.iter().collect());
    }
    let cells = names
        .iter()
        .filter_map(|name| match catalog.get(name) {
            Ok(cell) => Some(cell),
            Err(error) => {
                warn!(%error, "skipping");
                None
            }
        })
        .collect_vec();
    ensure!(!cells.is_empty(), "none of the requested cells are in the catalog");
    Ok(cells)
}

#[instrument(skip_all)]
pub fn search(args: &SearchArgs) -> Result {
    let catalog = args.pipeline.catalog.load()?;
    let busbar = args.pipeline.busbar.model()?;
    let ruleset = args.pipeline.rules.ruleset()?;
    let generator = args.generator()?;
    let search = Search::builder().generator(&generator).busbar(&busbar).ruleset(&ruleset).build();

    let evaluations = select_cells(&catalog, &args.cells)?
        .into_iter()
        .flat_map(|cell| search.run(cell))
        .collect_vec();
    let n_feasible = evaluations.iter().filter(|evaluation| evaluation.is_feasible()).count();
    info!(n_evaluated = evaluations.len(), n_feasible, "swept");

    let mut listed = evaluations
        .iter()
        .filter(|evaluation| args.show_rejected || evaluation.is_feasible())
        .collect_vec();
    if let Some(field) = args.sort_by {
        listed.sort_by_key(|evaluation| {
            let value = evaluation.parameters.value(field);
            (value.is_none(), OrderedFloat(value.unwrap_or_default()))
        });
    }
    if listed.is_empty() {
        warn!("no layouts to show, try widening the tolerances");
    } else {
        println!("{}", build_evaluations_table(&listed));
    }

    if let Some(output) = &args.output {
        let mut sink = CsvSink::append_to(output)?;
        let n_appended = sink.append_feasible(&evaluations)?;
        info!(n_appended, path = %output.display(), "saved");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::cell_21700;

    fn parse(extra: &[&str]) -> Result<SearchArgs> {
        let args = ["search", "--target-voltage-volts", "350", "--target-energy-kilowatt-hours", "21"];
        Ok(SearchArgs::try_parse_from(args.into_iter().chain(extra.iter().copied()))?)
    }

    #[test]
    fn test_generator() -> Result {
        let args = parse(&[])?;
        let evaluations = args.generator()?.generate(&cell_21700());
        assert!(!evaluations.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_targets() -> Result {
        assert!(parse(&["--voltage-tolerance-volts=-5"])?.generator().is_err());
        assert!(parse(&["--energy-tolerance-kilowatt-hours", "NaN"])?.generator().is_err());
        assert!(parse(&["--target-energy-kilowatt-hours", "inf"])?.generator().is_err());
        Ok(())
    }

    #[test]
    fn test_select_cells() -> Result {
        let catalog = CellCatalog::try_from_records([cell_21700()])?;
        assert_eq!(select_cells(&catalog, &[])?.len(), 1);

        let names = ["NOPE".to_owned(), "P45B".to_owned()];
        let cells = select_cells(&catalog, &names)?;
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].name, "P45B");

        assert!(select_cells(&catalog, &["NOPE".to_owned()]).is_err());
        Ok(())
    }
}
