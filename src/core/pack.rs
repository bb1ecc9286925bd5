use crate::{
    catalog::CellRecord,
    core::{
        InputError,
        busbar::{BusbarEstimate, BusbarModel},
        candidate::Candidate,
    },
    prelude::*,
    quantity::{
        Zero,
        electric::{AmpereHours, Amperes, Ohms, Volts},
        energy::KilowattHours,
        geometry::Liters,
        mass::Kilograms,
        power::Kilowatts,
    },
};

/// Electrical and physical parameters of a pack layout.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct PackParameters {
    pub series_per_module: u32,
    pub capacity: AmpereHours,

    pub nominal_pack_voltage: Volts,
    pub max_pack_voltage: Volts,
    pub nominal_module_voltage: Volts,
    pub max_module_voltage: Volts,

    pub nominal_pack_energy: KilowattHours,
    pub max_pack_energy: KilowattHours,
    pub nominal_module_energy: KilowattHours,
    pub max_module_energy: KilowattHours,

    pub continuous_current: Amperes,
    pub nominal_power: Kilowatts,

    pub cell_count: u32,
    pub cells_per_module: u32,
    pub cell_mass: Kilograms,
    pub module_mass: Kilograms,
    pub cell_volume: Liters,
    pub module_volume: Liters,

    pub internal_resistance: Ohms,

    /// Resistive loss at the continuous current.
    pub resistive_loss: Kilowatts,

    /// Share of the nominal power left after the resistive loss, `0..=1`.
    ///
    /// [`None`] when the nominal power is zero.
    pub efficiency: Option<f64>,

    pub busbar: BusbarEstimate,
}

impl PackParameters {
    pub fn calculate(
        cell: &CellRecord,
        candidate: &Candidate,
        busbar: &BusbarModel,
    ) -> Result<Self, InputError> {
        if candidate.cell_name != cell.name {
            return Err(InputError::CellMismatch {
                candidate: candidate.to_string(),
                expected: candidate.cell_name.clone(),
                actual: cell.name.clone(),
            });
        }
        if candidate.n_series == 0 || candidate.n_parallel == 0 || candidate.n_modules == 0 {
            return Err(InputError::ZeroCount { candidate: candidate.to_string() });
        }
        if candidate.n_series % candidate.n_modules != 0 {
            return Err(InputError::NotDivisible {
                n_series: candidate.n_series,
                n_modules: candidate.n_modules,
            });
        }

        let n_series = f64::from(candidate.n_series);
        let n_parallel = f64::from(candidate.n_parallel);
        let n_modules = f64::from(candidate.n_modules);
        let series_per_module = candidate.n_series / candidate.n_modules;

        let capacity = cell.nominal_capacity * n_parallel;

        let nominal_pack_voltage = cell.nominal_voltage * n_series;
        let max_pack_voltage = cell.max_voltage * n_series;
        let nominal_module_voltage = nominal_pack_voltage / n_modules;
        let max_module_voltage = max_pack_voltage / n_modules;

        let continuous_current = cell.continuous_current * n_parallel;
        let nominal_power = Kilowatts::from(nominal_pack_voltage * continuous_current);

        let cell_count = candidate.n_cells();
        let cell_mass = Kilograms::from(cell.mass * f64::from(cell_count));
        let cell_volume = cell.volume * f64::from(cell_count);

        let internal_resistance = Ohms::from(cell.dcir) * n_series / n_parallel;
        let resistive_loss =
            Kilowatts::from((continuous_current * internal_resistance) * continuous_current);
        let efficiency = (nominal_power != Kilowatts::ZERO)
            .then(|| (nominal_power - resistive_loss) / nominal_power);

        let parameters = Self {
            series_per_module,
            capacity,
            nominal_pack_voltage,
            max_pack_voltage,
            nominal_module_voltage,
            max_module_voltage,
            nominal_pack_energy: (nominal_pack_voltage * capacity).into(),
            max_pack_energy: (max_pack_voltage * capacity).into(),
            nominal_module_energy: (nominal_module_voltage * capacity).into(),
            max_module_energy: (max_module_voltage * capacity).into(),
            continuous_current,
            nominal_power,
            cell_count,
            cells_per_module: cell_count / candidate.n_modules,
            cell_mass,
            module_mass: cell_mass / n_modules,
            cell_volume,
            module_volume: cell_volume / n_modules,
            internal_resistance,
            resistive_loss,
            efficiency,
            busbar: busbar.estimate(nominal_pack_voltage, series_per_module, candidate.n_modules),
        };
        trace!(%candidate, ?parameters.max_pack_voltage, ?parameters.nominal_pack_energy, "calculated");
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::catalog::tests::cell_21700;

    fn candidate(n_series: u32, n_parallel: u32, n_modules: u32) -> Candidate {
        Candidate { cell_name: "P45B".to_owned(), n_series, n_parallel, n_modules }
    }

    #[test]
    fn test_calculate() -> Result {
        let parameters =
            PackParameters::calculate(&cell_21700(), &candidate(96, 12, 6), &BusbarModel::default())?;

        assert_eq!(parameters.series_per_module, 16);
        assert_abs_diff_eq!(parameters.capacity.0, 60.0);
        assert_abs_diff_eq!(parameters.nominal_pack_voltage.0, 345.6, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.max_pack_voltage.0, 403.2, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.nominal_module_voltage.0, 57.6, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.max_module_voltage.0, 67.2, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.nominal_pack_energy.0, 20.736, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.max_pack_energy.0, 24.192, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.nominal_module_energy.0, 3.456, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.max_module_energy.0, 4.032, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.continuous_current.0, 540.0);
        assert_abs_diff_eq!(parameters.nominal_power.0, 186.624, epsilon = 1e-9);
        assert_eq!(parameters.cell_count, 1152);
        assert_eq!(parameters.cells_per_module, 192);
        assert_abs_diff_eq!(parameters.cell_mass.0, 80.64, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.module_mass.0, 13.44, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.cell_volume.0, 27.9936, epsilon = 1e-9);
        assert_abs_diff_eq!(parameters.module_volume.0, 4.6656, epsilon = 1e-9);

        // 9 mΩ × 96 / 12 = 72 mΩ, and 540² A × 0.072 Ω = 20.9952 kW.
        assert_abs_diff_eq!(parameters.internal_resistance.0, 0.072, epsilon = 1e-12);
        assert_abs_diff_eq!(parameters.resistive_loss.0, 20.9952, epsilon = 1e-9);
        assert_abs_diff_eq!(
            parameters.efficiency.unwrap(),
            (186.624 - 20.9952) / 186.624,
            epsilon = 1e-12,
        );

        assert_eq!(parameters.busbar.count, 15 * 6);
        assert_abs_diff_eq!(parameters.busbar.required_current.0, 80_000.0 / 345.6, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_idempotence() -> Result {
        let cell = cell_21700();
        let candidate = candidate(100, 12, 5);
        let busbar = BusbarModel::default();
        assert_eq!(
            PackParameters::calculate(&cell, &candidate, &busbar)?,
            PackParameters::calculate(&cell, &candidate, &busbar)?,
        );
        Ok(())
    }

    #[test]
    fn test_monotonic_in_parallel_count() -> Result {
        let cell = cell_21700();
        let busbar = BusbarModel::default();
        let parameters = (1..=20)
            .map(|n_parallel| PackParameters::calculate(&cell, &candidate(96, n_parallel, 6), &busbar))
            .collect::<Result<Vec<_>, _>>()?;
        for (lhs, rhs) in parameters.iter().zip(&parameters[1..]) {
            assert!(rhs.capacity > lhs.capacity);
            assert!(rhs.nominal_pack_energy > lhs.nominal_pack_energy);
            assert!(rhs.continuous_current > lhs.continuous_current);
        }
        Ok(())
    }

    #[test]
    fn test_zero_power_efficiency_is_undefined() -> Result {
        let cell = CellRecord { continuous_current: Amperes::ZERO, ..cell_21700() };
        let parameters =
            PackParameters::calculate(&cell, &candidate(96, 12, 6), &BusbarModel::default())?;
        assert_eq!(parameters.nominal_power, Kilowatts::ZERO);
        assert_eq!(parameters.efficiency, None);
        Ok(())
    }

    #[test]
    fn test_not_divisible() {
        assert_eq!(
            PackParameters::calculate(&cell_21700(), &candidate(97, 12, 6), &BusbarModel::default()),
            Err(InputError::NotDivisible { n_series: 97, n_modules: 6 }),
        );
    }

    #[test]
    fn test_zero_count() {
        assert!(matches!(
            PackParameters::calculate(&cell_21700(), &candidate(96, 0, 6), &BusbarModel::default()),
            Err(InputError::ZeroCount { .. }),
        ));
    }

    #[test]
    fn test_cell_mismatch() {
        let candidate = Candidate { cell_name: "P42A".to_owned(), ..candidate(96, 12, 6) };
        assert!(matches!(
            PackParameters::calculate(&cell_21700(), &candidate, &BusbarModel::default()),
            Err(InputError::CellMismatch { .. }),
        ));
    }
}
