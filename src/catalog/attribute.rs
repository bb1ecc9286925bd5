/// Datasheet attribute recognised in a catalog table.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Attribute {
    Manufacturer,
    NominalVoltage,
    MaxVoltage,
    NominalCapacity,
    ContinuousCurrent,
    Mass,
    Volume,
    Dcir,
}

impl Attribute {
    pub const REQUIRED: [Self; 7] = [
        Self::NominalVoltage,
        Self::MaxVoltage,
        Self::NominalCapacity,
        Self::ContinuousCurrent,
        Self::Mass,
        Self::Volume,
        Self::Dcir,
    ];

    /// Match a table label like `Nominal Voltage (V)` ignoring case, spacing and punctuation.
    pub fn recognise(label: &str) -> Option<Self> {
        let normalized: String =
            label.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect();
        match normalized.as_str() {
            "manufacturer" | "manu" | "brand" => Some(Self::Manufacturer),
            "nominalvoltagev" | "nominalvoltage" => Some(Self::NominalVoltage),
            "maxvoltagev" | "maxvoltage" | "maximumvoltagev" | "maximumvoltage"
            | "chargevoltagev" => Some(Self::MaxVoltage),
            "nominalcapacityah" | "nominalcapacity" | "capacityah" => Some(Self::NominalCapacity),
            "continuousdischargecurrenta"
            | "continuousdischargecurrent"
            | "maxcontinuousdischargecurrenta"
            | "continuouscurrenta" => Some(Self::ContinuousCurrent),
            "massg" | "mass" | "weightg" => Some(Self::Mass),
            "volumel" | "volume" => Some(Self::Volume),
            "typicaldcirmohm" | "typicaldcirmω" | "dcirmohm" | "dcirmω" | "internalresistancemohm" => {
                Some(Self::Dcir)
            }
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Manufacturer => "Manufacturer",
            Self::NominalVoltage => "Nominal Voltage (V)",
            Self::MaxVoltage => "Max Voltage (V)",
            Self::NominalCapacity => "Nominal Capacity (Ah)",
            Self::ContinuousCurrent => "Continuous Discharge Current (A)",
            Self::Mass => "Mass (g)",
            Self::Volume => "Volume (L)",
            Self::Dcir => "Typical DCIR (mOhm)",
        }
    }
}
