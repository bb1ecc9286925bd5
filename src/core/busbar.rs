//! Inter-cell busbar sizing.
//!
//! The cross-section is chosen from a linear ampacity regression for the current drawn at a target
//! peak power, and the mass follows from a fixed busbar footprint and the copper density.

use std::{fmt::Debug, path::Path};

use bon::Builder;
use itertools::Itertools;
use linfa::{Dataset, traits::Fit};
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{
        electric::{Amperes, Volts},
        geometry::{CubicMillimeters, Density, Millimeters, SquareMillimeters},
        mass::Kilograms,
        power::Kilowatts,
    },
};

/// Required cross-section as a linear function of the current: `slope × current + intercept`.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmpacityRegression {
    /// Square millimeters per ampere.
    pub slope: f64,

    pub intercept: SquareMillimeters,
}

impl Default for AmpacityRegression {
    fn default() -> Self {
        Self { slope: 0.3, intercept: SquareMillimeters(5.0) }
    }
}

/// Calibration point: a cross-section and the current it can carry.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct AmpacitySample {
    #[serde(rename = "current_amperes")]
    pub current: Amperes,

    #[serde(rename = "cross_section_square_millimeters")]
    pub cross_section: SquareMillimeters,
}

impl AmpacityRegression {
    pub fn cross_section(&self, current: Amperes) -> SquareMillimeters {
        SquareMillimeters(self.slope * current.0) + self.intercept
    }

    /// Fit the regression from a CSV file with `current_amperes` and
    /// `cross_section_square_millimeters` columns.
    #[instrument(skip(path), fields(path = ?path))]
    pub fn try_fit_path<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let samples: Vec<AmpacitySample> = csv::Reader::from_path(path.as_ref())
            .context("failed to open the ampacity table")?
            .deserialize()
            .collect::<Result<_, _>>()
            .context("failed to read the ampacity table")?;
        Self::try_fit(&samples)
    }

    /// Ordinary least squares over the calibration samples.
    pub fn try_fit(samples: &[AmpacitySample]) -> Result<Self> {
        let n_distinct_currents =
            samples.iter().map(|sample| OrderedFloat(sample.current.0)).unique().count();
        ensure!(
            n_distinct_currents >= 2,
            "at least two samples with distinct currents are needed, got {}",
            samples.len(),
        );

        let records = Array2::from_shape_vec(
            (samples.len(), 1),
            samples.iter().map(|sample| sample.current.0).collect(),
        )?;
        let targets: Array1<f64> = samples.iter().map(|sample| sample.cross_section.0).collect();
        let regression = LinearRegression::new()
            .fit(&Dataset::new(records, targets))
            .context("failed to fit the ampacity regression")?;

        let fitted =
            Self { slope: regression.params()[0], intercept: SquareMillimeters(regression.intercept()) };
        info!(n_samples = samples.len(), fitted.slope, ?fitted.intercept, "fitted the ampacity regression");
        Ok(fitted)
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct BusbarModel {
    /// Peak power the busbars are sized for.
    #[builder(default = Kilowatts(80.0))]
    pub target_power: Kilowatts,

    #[builder(default = Millimeters(12.0))]
    pub width: Millimeters,

    #[builder(default = Millimeters(45.0))]
    pub length: Millimeters,

    #[builder(default = Density::COPPER)]
    pub density: Density,

    #[builder(default)]
    pub ampacity: AmpacityRegression,
}

impl Default for BusbarModel {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BusbarModel {
    /// Estimate the busbars between the series groups inside each module.
    pub fn estimate(
        &self,
        nominal_pack_voltage: Volts,
        series_per_module: u32,
        n_modules: u32,
    ) -> BusbarEstimate {
        let required_current = self.target_power / nominal_pack_voltage;
        let cross_section = self.ampacity.cross_section(required_current);
        let height = cross_section / self.width;
        let volume = self.width * self.length * height;
        let mass = volume * self.density;
        let count = series_per_module.saturating_sub(1) * n_modules;
        BusbarEstimate {
            required_current,
            cross_section,
            height,
            volume,
            mass,
            count,
            total_mass: mass * f64::from(count),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BusbarEstimate {
    /// Current drawn at the target power and nominal pack voltage.
    pub required_current: Amperes,

    pub cross_section: SquareMillimeters,
    pub height: Millimeters,
    pub volume: CubicMillimeters,

    /// Mass of a single busbar.
    pub mass: Kilograms,

    pub count: u32,
    pub total_mass: Kilograms,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_estimate() {
        let model = BusbarModel::builder()
            .ampacity(AmpacityRegression { slope: 0.25, intercept: SquareMillimeters(10.0) })
            .build();
        let estimate = model.estimate(Volts(400.0), 16, 6);

        assert_abs_diff_eq!(estimate.required_current.0, 200.0);
        assert_abs_diff_eq!(estimate.cross_section.0, 60.0);
        assert_abs_diff_eq!(estimate.height.0, 5.0);
        assert_abs_diff_eq!(estimate.volume.0, 12.0 * 45.0 * 5.0);
        assert_abs_diff_eq!(estimate.mass.0, 2700.0 * 8.96e-6);
        assert_eq!(estimate.count, 90);
        assert_abs_diff_eq!(estimate.total_mass.0, 90.0 * 2700.0 * 8.96e-6, epsilon = 1e-12);
    }

    #[test]
    fn test_single_series_group_needs_no_busbars() {
        let estimate = BusbarModel::default().estimate(Volts(50.0), 1, 4);
        assert_eq!(estimate.count, 0);
        assert_abs_diff_eq!(estimate.total_mass.0, 0.0);
    }

    #[test]
    fn test_fit() -> Result {
        let samples = [(100.0, 30.0), (200.0, 50.0), (300.0, 70.0), (400.0, 90.0)].map(
            |(current, cross_section)| AmpacitySample {
                current: Amperes(current),
                cross_section: SquareMillimeters(cross_section),
            },
        );
        let regression = AmpacityRegression::try_fit(&samples)?;
        assert_abs_diff_eq!(regression.slope, 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(regression.intercept.0, 10.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_fit_path() -> Result {
        let path = std::env::temp_dir()
            .join(format!("accumulator-calc-ampacity-{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "current_amperes,cross_section_square_millimeters\n100,30\n200,50\n300,70\n",
        )?;
        let regression = AmpacityRegression::try_fit_path(&path);
        std::fs::remove_file(&path)?;

        let regression = regression?;
        assert_abs_diff_eq!(regression.slope, 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(regression.intercept.0, 10.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_fit_path_missing_column() -> Result {
        let path = std::env::temp_dir()
            .join(format!("accumulator-calc-ampacity-bad-{}.csv", std::process::id()));
        std::fs::write(&path, "current,area\n100,30\n200,50\n")?;
        let result = AmpacityRegression::try_fit_path(&path);
        std::fs::remove_file(&path)?;
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_fit_degenerate() {
        let sample =
            AmpacitySample { current: Amperes(100.0), cross_section: SquareMillimeters(30.0) };
        assert!(AmpacityRegression::try_fit(&[]).is_err());
        assert!(AmpacityRegression::try_fit(&[sample, sample]).is_err());
    }
}
