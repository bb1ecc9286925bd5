use std::ops::{Div, Mul};

use crate::quantity::mass::Kilograms;

quantity!(Millimeters, f64, "mm");
quantity!(SquareMillimeters, f64, "mm²");
quantity!(CubicMillimeters, f64, "mm³");
quantity!(Liters, f64, "L");

/// Mass density in kilograms per cubic millimeter.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Density(pub f64);

impl Density {
    /// Pure copper.
    pub const COPPER: Self = Self(8.96e-6);

    pub const fn from_grams_per_cubic_centimeter(value: f64) -> Self {
        Self(value * 1e-6)
    }
}

impl Mul for Millimeters {
    type Output = SquareMillimeters;

    fn mul(self, rhs: Self) -> Self::Output {
        SquareMillimeters(self.0 * rhs.0)
    }
}

impl Mul<Millimeters> for SquareMillimeters {
    type Output = CubicMillimeters;

    fn mul(self, rhs: Millimeters) -> Self::Output {
        CubicMillimeters(self.0 * rhs.0)
    }
}

impl Div<Millimeters> for SquareMillimeters {
    type Output = Millimeters;

    fn div(self, rhs: Millimeters) -> Self::Output {
        Millimeters(self.0 / rhs.0)
    }
}

impl Mul<Density> for CubicMillimeters {
    type Output = Kilograms;

    fn mul(self, density: Density) -> Self::Output {
        Kilograms(self.0 * density.0)
    }
}
