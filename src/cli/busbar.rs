//! Busbar model arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::{
    core::busbar::{AmpacityRegression, BusbarModel},
    prelude::*,
    quantity::{
        geometry::{Density, Millimeters, SquareMillimeters},
        power::Kilowatts,
    },
};

#[derive(Parser)]
pub struct BusbarArgs {
    /// Peak power the busbars are sized for.
    #[clap(
        long = "busbar-target-power-kilowatts",
        default_value = "80",
        env = "BUSBAR_TARGET_POWER_KILOWATTS"
    )]
    pub target_power: Kilowatts,

    #[clap(long = "busbar-width-millimeters", default_value = "12", env = "BUSBAR_WIDTH_MILLIMETERS")]
    pub width: Millimeters,

    #[clap(long = "busbar-length-millimeters", default_value = "45", env = "BUSBAR_LENGTH_MILLIMETERS")]
    pub length: Millimeters,

    #[clap(
        long = "busbar-density-grams-per-cubic-centimeter",
        default_value = "8.96",
        env = "BUSBAR_DENSITY_GRAMS_PER_CUBIC_CENTIMETER"
    )]
    pub density: f64,

    /// Ampacity regression slope, in square millimeters per ampere.
    #[clap(long = "ampacity-slope", default_value = "0.3", env = "AMPACITY_SLOPE")]
    pub ampacity_slope: f64,

    #[clap(
        long = "ampacity-intercept-square-millimeters",
        alias = "ampacity-intercept",
        default_value = "5",
        env = "AMPACITY_INTERCEPT_SQUARE_MILLIMETERS"
    )]
    pub ampacity_intercept: SquareMillimeters,

    /// CSV table with `current_amperes` and `cross_section_square_millimeters` columns.
    ///
    /// When given, the regression is fitted from it instead of using the slope and intercept.
    #[clap(long = "ampacity-table", env = "AMPACITY_TABLE_PATH")]
    pub ampacity_table: Option<PathBuf>,
}

impl BusbarArgs {
    pub fn model(&self) -> Result<BusbarModel> {
        let ampacity = match &self.ampacity_table {
            Some(path) => AmpacityRegression::try_fit_path(path)?,
            None => AmpacityRegression {
                slope: self.ampacity_slope,
                intercept: self.ampacity_intercept,
            },
        };
        ensure!(self.width > Millimeters(0.0), "busbar width must be positive");
        ensure!(self.length > Millimeters(0.0), "busbar length must be positive");
        ensure!(self.density > 0.0, "busbar density must be positive");
        Ok(BusbarModel::builder()
            .target_power(self.target_power)
            .width(self.width)
            .length(self.length)
            .density(Density::from_grams_per_cubic_centimeter(self.density))
            .ampacity(ampacity)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn parse(extra: &[&str]) -> Result<BusbarArgs> {
        Ok(BusbarArgs::try_parse_from(["busbar"].into_iter().chain(extra.iter().copied()))?)
    }

    #[test]
    fn test_defaults() -> Result {
        let model = parse(&[])?.model()?;
        assert_abs_diff_eq!(model.target_power.0, 80.0);
        assert_abs_diff_eq!(model.width.0, 12.0);
        assert_abs_diff_eq!(model.length.0, 45.0);
        assert_abs_diff_eq!(model.density.0, Density::COPPER.0, epsilon = 1e-18);
        assert_eq!(model.ampacity, AmpacityRegression::default());
        Ok(())
    }

    #[test]
    fn test_density_conversion() -> Result {
        let model = parse(&["--busbar-density-grams-per-cubic-centimeter", "2.7"])?.model()?;
        assert_abs_diff_eq!(model.density.0, 2.7e-6, epsilon = 1e-18);
        Ok(())
    }

    #[test]
    fn test_invalid_geometry() -> Result {
        assert!(parse(&["--busbar-width-millimeters", "0"])?.model().is_err());
        assert!(parse(&["--busbar-length-millimeters=-1"])?.model().is_err());
        assert!(parse(&["--busbar-density-grams-per-cubic-centimeter", "0"])?.model().is_err());
        Ok(())
    }
}
