use std::ops::RangeInclusive;

use bon::Builder;
use itertools::Itertools;

use crate::{
    catalog::CellRecord,
    core::candidate::Candidate,
    prelude::*,
    quantity::{
        electric::Volts,
        energy::{KilowattHours, WattHours},
    },
};

/// Absorbs floating-point error when a band edge is an exact multiple of the cell value.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Module counts used when none are given explicitly.
pub static DEFAULT_MODULE_COUNTS: [u32; 4] = [4, 5, 6, 7];

/// Enumerates layouts whose nominal voltage and energy fall into the target bands.
#[derive(Builder)]
pub struct Generator<'a> {
    target_voltage: Volts,
    voltage_tolerance: Volts,
    target_energy: KilowattHours,
    energy_tolerance: KilowattHours,

    /// Allowed module counts, in iteration order.
    #[builder(default = DEFAULT_MODULE_COUNTS.as_slice())]
    module_counts: &'a [u32],
}

impl Generator<'_> {
    /// Generate the candidates ordered by series count, then module count, then parallel count.
    #[instrument(skip_all, fields(cell = %cell.name))]
    pub fn generate(&self, cell: &CellRecord) -> Vec<Candidate> {
        let module_counts = self.module_counts();
        let candidates = self
            .series_counts(cell)
            .flat_map(|n_series| {
                module_counts
                    .iter()
                    .copied()
                    .filter(move |n_modules| n_series % n_modules == 0)
                    .map(move |n_modules| (n_series, n_modules))
            })
            .flat_map(|(n_series, n_modules)| {
                debug_assert_eq!(n_series % n_modules, 0);
                self.parallel_counts(cell, n_series).map(move |n_parallel| Candidate {
                    cell_name: cell.name.clone(),
                    n_series,
                    n_parallel,
                    n_modules,
                })
            })
            .collect_vec();
        debug!(n_candidates = candidates.len(), "generated");
        candidates
    }

    /// Series counts whose nominal voltage lies within the voltage band.
    pub fn series_counts(&self, cell: &CellRecord) -> RangeInclusive<u32> {
        let min_voltage = self.target_voltage - self.voltage_tolerance;
        let max_voltage = self.target_voltage + self.voltage_tolerance;
        let min = ceil_count(min_voltage / cell.nominal_voltage).max(1);
        let max = floor_count(max_voltage / cell.nominal_voltage);
        trace!(?min_voltage, ?max_voltage, min, max, "series counts");
        min..=max
    }

    /// Parallel counts whose nominal energy lies within the energy band for the given series count.
    pub fn parallel_counts(&self, cell: &CellRecord, n_series: u32) -> RangeInclusive<u32> {
        let string_energy: WattHours =
            cell.nominal_voltage * cell.nominal_capacity * f64::from(n_series);
        let min_energy = WattHours::from(self.target_energy - self.energy_tolerance);
        let max_energy = WattHours::from(self.target_energy + self.energy_tolerance);
        let min = ceil_count(min_energy / string_energy).max(1);
        let max = floor_count(max_energy / string_energy);
        trace!(n_series, ?string_energy, min, max, "parallel counts");
        min..=max
    }

    /// Usable module counts: zeros dropped, duplicates removed keeping the first occurrence.
    fn module_counts(&self) -> Vec<u32> {
        self.module_counts
            .iter()
            .copied()
            .filter(|n_modules| {
                if *n_modules == 0 {
                    warn!("ignoring zero module count");
                }
                *n_modules != 0
            })
            .unique()
            .collect()
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_count(ratio: f64) -> u32 {
    (ratio - ROUNDING_EPSILON).ceil().max(0.0) as u32
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_count(ratio: f64) -> u32 {
    (ratio + ROUNDING_EPSILON).floor().max(0.0) as u32
}
