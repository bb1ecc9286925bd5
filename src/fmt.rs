use std::fmt::{Debug, Display, Formatter};

/// Efficiency as a percentage, or `undefined` when it could not be calculated.
pub struct FormattedEfficiency(pub Option<f64>);

impl Debug for FormattedEfficiency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedEfficiency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(efficiency) => write!(f, "{:.1}%", efficiency * 100.0),
            None => f.write_str(UNDEFINED),
        }
    }
}

/// Placeholder for a value that could not be calculated.
pub const UNDEFINED: &str = "undefined";
