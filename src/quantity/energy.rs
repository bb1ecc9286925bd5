quantity!(WattHours, f64, "Wh");
quantity!(KilowattHours, f64, "kWh");
quantity!(Megajoules, f64, "MJ");

/// One kilowatt-hour is exactly 3.6 megajoules.
const MEGAJOULES_PER_KILOWATT_HOUR: f64 = 3.6;

impl From<WattHours> for KilowattHours {
    fn from(watt_hours: WattHours) -> Self {
        Self(watt_hours.0 * 0.001)
    }
}

impl From<KilowattHours> for WattHours {
    fn from(kilowatt_hours: KilowattHours) -> Self {
        Self(kilowatt_hours.0 * 1000.0)
    }
}

impl From<Megajoules> for KilowattHours {
    fn from(megajoules: Megajoules) -> Self {
        Self(megajoules.0 / MEGAJOULES_PER_KILOWATT_HOUR)
    }
}

impl From<KilowattHours> for Megajoules {
    fn from(kilowatt_hours: KilowattHours) -> Self {
        Self(kilowatt_hours.0 * MEGAJOULES_PER_KILOWATT_HOUR)
    }
}
