use std::ops::Mul;

use crate::quantity::{energy::WattHours, power::Watts};

quantity!(Volts, f64, "V");
quantity!(Amperes, f64, "A");
quantity!(AmpereHours, f64, "Ah");
quantity!(Ohms, f64, "Ω");
quantity!(Milliohms, f64, "mΩ");

impl From<Milliohms> for Ohms {
    fn from(milliohms: Milliohms) -> Self {
        Self(milliohms.0 * 0.001)
    }
}

impl Mul<AmpereHours> for Volts {
    type Output = WattHours;

    fn mul(self, charge: AmpereHours) -> Self::Output {
        WattHours(self.0 * charge.0)
    }
}

impl Mul<Amperes> for Volts {
    type Output = Watts;

    fn mul(self, current: Amperes) -> Self::Output {
        Watts(self.0 * current.0)
    }
}

/// Ohm's law.
impl Mul<Ohms> for Amperes {
    type Output = Volts;

    fn mul(self, resistance: Ohms) -> Self::Output {
        Volts(self.0 * resistance.0)
    }
}
