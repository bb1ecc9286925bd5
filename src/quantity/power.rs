use std::ops::Div;

use crate::quantity::electric::{Amperes, Volts};

quantity!(Watts, f64, "W");
quantity!(Kilowatts, f64, "kW");

impl From<Kilowatts> for Watts {
    fn from(kilowatts: Kilowatts) -> Self {
        Self(kilowatts.0 * 1000.0)
    }
}

impl From<Watts> for Kilowatts {
    fn from(watts: Watts) -> Self {
        Self(watts.0 / 1000.0)
    }
}

impl Div<Volts> for Kilowatts {
    type Output = Amperes;

    fn div(self, voltage: Volts) -> Self::Output {
        Amperes(Watts::from(self).0 / voltage.0)
    }
}
