//! Cell datasheet catalog.

mod attribute;
mod loader;

use std::collections::BTreeMap;

use bon::bon;

pub use self::loader::CatalogLoader;
use crate::{
    core::InputError,
    prelude::*,
    quantity::{
        electric::{AmpereHours, Amperes, Milliohms, Volts},
        geometry::Liters,
        mass::Grams,
    },
};

/// Datasheet attributes of a single cell type.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct CellRecord {
    pub name: String,
    pub manufacturer: Option<String>,
    pub nominal_voltage: Volts,
    pub max_voltage: Volts,
    pub nominal_capacity: AmpereHours,

    /// Maximum continuous discharge current.
    pub continuous_current: Amperes,

    pub mass: Grams,
    pub volume: Liters,

    /// Typical DC internal resistance.
    pub dcir: Milliohms,
}

#[bon]
impl CellRecord {
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        #[builder(into)] manufacturer: Option<String>,
        nominal_voltage: Volts,
        max_voltage: Volts,
        nominal_capacity: AmpereHours,
        continuous_current: Amperes,
        mass: Grams,
        volume: Liters,
        dcir: Milliohms,
    ) -> Result<Self> {
        ensure!(!name.trim().is_empty(), "cell name must not be empty");
        ensure_positive(&name, "nominal voltage", nominal_voltage.0)?;
        ensure_positive(&name, "max voltage", max_voltage.0)?;
        ensure_positive(&name, "nominal capacity", nominal_capacity.0)?;
        ensure_non_negative(&name, "continuous current", continuous_current.0)?;
        ensure_non_negative(&name, "mass", mass.0)?;
        ensure_non_negative(&name, "volume", volume.0)?;
        ensure_non_negative(&name, "DCIR", dcir.0)?;
        ensure!(
            max_voltage >= nominal_voltage,
            "`{name}`: max voltage ({max_voltage}) is below the nominal voltage ({nominal_voltage})",
        );
        Ok(Self {
            name,
            manufacturer,
            nominal_voltage,
            max_voltage,
            nominal_capacity,
            continuous_current,
            mass,
            volume,
            dcir,
        })
    }
}

fn ensure_positive(name: &str, attribute: &str, value: f64) -> Result {
    ensure!(value.is_finite() && value > 0.0, "`{name}`: {attribute} must be positive, got {value}");
    Ok(())
}

fn ensure_non_negative(name: &str, attribute: &str, value: f64) -> Result {
    ensure!(
        value.is_finite() && value >= 0.0,
        "`{name}`: {attribute} must be non-negative, got {value}",
    );
    Ok(())
}

/// Cell records keyed by their unique name.
#[must_use]
#[derive(Debug, Default)]
pub struct CellCatalog(BTreeMap<String, CellRecord>);

impl CellCatalog {
    pub fn try_from_records(records: impl IntoIterator<Item = CellRecord>) -> Result<Self> {
        let mut catalog = Self::default();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, record: CellRecord) -> Result {
        ensure!(!self.0.contains_key(&record.name), "duplicate cell `{}`", record.name);
        self.0.insert(record.name.clone(), record);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&CellRecord, InputError> {
        self.0.get(name).ok_or_else(|| InputError::UnknownCell { name: name.to_owned() })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CellRecord> {
        self.0.values()
    }
}
