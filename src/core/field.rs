use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::core::pack::PackParameters;

/// Stable name of a numeric [`PackParameters`] value.
///
/// Rules and output columns refer to parameters through this, so the declaration order here is also
/// the output column order.
#[derive(Debug, Hash, Deserialize, Serialize, clap::ValueEnum, enumset::EnumSetType)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    SeriesPerModule,
    Capacity,
    NominalPackVoltage,
    MaxPackVoltage,
    NominalModuleVoltage,
    MaxModuleVoltage,
    NominalPackEnergy,
    MaxPackEnergy,
    NominalModuleEnergy,
    MaxModuleEnergy,
    ContinuousCurrent,
    NominalPower,
    CellCount,
    CellsPerModule,
    CellMass,
    ModuleMass,
    CellVolume,
    ModuleVolume,
    InternalResistance,
    ResistiveLoss,
    Efficiency,
    BusbarCurrent,
    BusbarCrossSection,
    BusbarHeight,
    BusbarMass,
    BusbarCount,
    ConnectorMass,
}

impl Field {
    /// All fields in the declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        EnumSet::<Self>::all().iter()
    }

    /// Column header with the unit.
    pub const fn header(self) -> &'static str {
        match self {
            Self::SeriesPerModule => "Series per module",
            Self::Capacity => "Capacity (Ah)",
            Self::NominalPackVoltage => "Nominal pack voltage (V)",
            Self::MaxPackVoltage => "Max pack voltage (V)",
            Self::NominalModuleVoltage => "Nominal module voltage (V)",
            Self::MaxModuleVoltage => "Max module voltage (V)",
            Self::NominalPackEnergy => "Nominal pack energy (kWh)",
            Self::MaxPackEnergy => "Max pack energy (kWh)",
            Self::NominalModuleEnergy => "Nominal module energy (kWh)",
            Self::MaxModuleEnergy => "Max module energy (kWh)",
            Self::ContinuousCurrent => "Continuous current (A)",
            Self::NominalPower => "Nominal power (kW)",
            Self::CellCount => "Cells",
            Self::CellsPerModule => "Cells per module",
            Self::CellMass => "Cell mass (kg)",
            Self::ModuleMass => "Module cell mass (kg)",
            Self::CellVolume => "Cell volume (L)",
            Self::ModuleVolume => "Module cell volume (L)",
            Self::InternalResistance => "Internal resistance (Ω)",
            Self::ResistiveLoss => "Resistive loss (kW)",
            Self::Efficiency => "Efficiency",
            Self::BusbarCurrent => "Busbar current (A)",
            Self::BusbarCrossSection => "Busbar cross-section (mm²)",
            Self::BusbarHeight => "Busbar height (mm)",
            Self::BusbarMass => "Busbar mass (kg)",
            Self::BusbarCount => "Busbars",
            Self::ConnectorMass => "Connector mass (kg)",
        }
    }
}

impl PackParameters {
    /// Look up a value by its field name.
    ///
    /// Quantities are returned in the unit of [`Field::header`].
    /// [`None`] stands for an undefined value.
    pub fn value(&self, field: Field) -> Option<f64> {
        let value = match field {
            Field::SeriesPerModule => f64::from(self.series_per_module),
            Field::Capacity => self.capacity.0,
            Field::NominalPackVoltage => self.nominal_pack_voltage.0,
            Field::MaxPackVoltage => self.max_pack_voltage.0,
            Field::NominalModuleVoltage => self.nominal_module_voltage.0,
            Field::MaxModuleVoltage => self.max_module_voltage.0,
            Field::NominalPackEnergy => self.nominal_pack_energy.0,
            Field::MaxPackEnergy => self.max_pack_energy.0,
            Field::NominalModuleEnergy => self.nominal_module_energy.0,
            Field::MaxModuleEnergy => self.max_module_energy.0,
            Field::ContinuousCurrent => self.continuous_current.0,
            Field::NominalPower => self.nominal_power.0,
            Field::CellCount => f64::from(self.cell_count),
            Field::CellsPerModule => f64::from(self.cells_per_module),
            Field::CellMass => self.cell_mass.0,
            Field::ModuleMass => self.module_mass.0,
            Field::CellVolume => self.cell_volume.0,
            Field::ModuleVolume => self.module_volume.0,
            Field::InternalResistance => self.internal_resistance.0,
            Field::ResistiveLoss => self.resistive_loss.0,
            Field::Efficiency => return self.efficiency,
            Field::BusbarCurrent => self.busbar.required_current.0,
            Field::BusbarCrossSection => self.busbar.cross_section.0,
            Field::BusbarHeight => self.busbar.height.0,
            Field::BusbarMass => self.busbar.mass.0,
            Field::BusbarCount => f64::from(self.busbar.count),
            Field::ConnectorMass => self.busbar.total_mass.0,
        };
        Some(value)
    }
}
