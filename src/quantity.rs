#[macro_use]
mod macros;

pub mod electric;
pub mod energy;
pub mod geometry;
pub mod mass;
pub mod power;
mod zero;

pub use self::zero::Zero;

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::{
        electric::{AmpereHours, Amperes, Milliohms, Ohms, Volts},
        energy::{KilowattHours, Megajoules, WattHours},
        power::{Kilowatts, Watts},
    };

    #[test]
    fn test_ordering() {
        assert!(Volts(3.6) < Volts(4.2));
        assert_eq!(Volts(3.6).max(Volts(4.2)), Volts(4.2));
        assert_eq!(Volts::ZERO.min(-Volts(1.0)), Volts(-1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{:.1}", Volts(345.6)), "345.6 V");
        assert_eq!(format!("{:?}", Amperes(45.0)), "45.0A");
    }

    #[test]
    fn test_parse() -> Result<(), std::num::ParseFloatError> {
        assert_eq!("350".parse::<Volts>()?, Volts(350.0));
        Ok(())
    }

    #[test]
    fn test_electric_products() {
        let energy: KilowattHours = (Volts(3.6) * AmpereHours(5.0)).into();
        assert_abs_diff_eq!(energy.0, 0.018);

        let power: Kilowatts = (Volts(400.0) * Amperes(200.0)).into();
        assert_abs_diff_eq!(power.0, 80.0);

        assert_abs_diff_eq!((Amperes(10.0) * Ohms::from(Milliohms(20.0))).0, 0.2);
        assert_abs_diff_eq!((Kilowatts(80.0) / Volts(400.0)).0, 200.0);
    }

    #[test]
    fn test_energy_conversions() {
        assert_abs_diff_eq!(KilowattHours::from(Megajoules(6.0)).0, 6.0 / 3.6);
        assert_abs_diff_eq!(WattHours::from(KilowattHours(21.0)).0, 21_000.0);
        assert_abs_diff_eq!(Watts::from(Kilowatts(1.5)).0, 1500.0);
    }
}
