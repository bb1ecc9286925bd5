use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    catalog::CellCatalog,
    core::{
        feasibility::{Category, Verdict},
        search::Evaluation,
    },
    fmt::FormattedEfficiency,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_evaluations_table(evaluations: &[&Evaluation]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Cell",
        "Layout",
        "Nominal voltage",
        "Max voltage",
        "Module max voltage",
        "Energy",
        "Module max energy",
        "Current",
        "Power",
        "Cell mass",
        "Module mass",
        "Busbars",
        "Efficiency",
        "Verdict",
    ]);
    for evaluation in evaluations {
        let parameters = &evaluation.parameters;
        table.add_row(vec![
            Cell::new(&evaluation.candidate.cell_name).add_attribute(Attribute::Dim),
            Cell::new(&evaluation.candidate).fg(if evaluation.is_feasible() {
                Color::Green
            } else {
                Color::Red
            }),
            Cell::new(format!("{:.1}", parameters.nominal_pack_voltage))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", parameters.max_pack_voltage))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", parameters.max_module_voltage))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", parameters.nominal_pack_energy))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", parameters.max_module_energy))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}", parameters.continuous_current))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", parameters.nominal_power))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", parameters.cell_mass)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", parameters.module_mass))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{} × {:.3}", parameters.busbar.count, parameters.busbar.mass))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(FormattedEfficiency(parameters.efficiency))
                .set_alignment(CellAlignment::Right),
            verdict_cell(&evaluation.verdict),
        ]);
    }
    table
}

fn verdict_cell(verdict: &Verdict) -> Cell {
    if verdict.is_feasible() {
        return Cell::new("ok").fg(Color::Green);
    }
    let text = verdict
        .violations
        .iter()
        .map(|violation| format!("{} ({})", violation.rule.description, violation.rule.category))
        .join("\n");
    let is_hardware_only =
        verdict.violations.iter().all(|violation| violation.rule.category == Category::Hardware);
    Cell::new(text).fg(if is_hardware_only { Color::DarkYellow } else { Color::Red })
}

#[must_use]
pub fn build_catalog_table(catalog: &CellCatalog) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Cell",
        "Manufacturer",
        "Nominal",
        "Max",
        "Capacity",
        "Current",
        "Mass",
        "Volume",
        "DCIR",
    ]);
    for cell in catalog.iter() {
        table.add_row(vec![
            Cell::new(&cell.name),
            Cell::new(cell.manufacturer.as_deref().unwrap_or_default())
                .add_attribute(Attribute::Dim),
            Cell::new(cell.nominal_voltage).set_alignment(CellAlignment::Right),
            Cell::new(cell.max_voltage).set_alignment(CellAlignment::Right),
            Cell::new(cell.nominal_capacity).set_alignment(CellAlignment::Right),
            Cell::new(cell.continuous_current).set_alignment(CellAlignment::Right),
            Cell::new(cell.mass).set_alignment(CellAlignment::Right),
            Cell::new(cell.volume).set_alignment(CellAlignment::Right),
            Cell::new(cell.dcir).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
