//! Data-driven feasibility rules.

use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    core::{field::Field, pack::PackParameters},
    prelude::*,
};

/// Why a rule exists, so that a caller can tell regulatory failures from hardware mismatches.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    #[display("regulation")]
    Regulation,

    #[display("hardware")]
    Hardware,
}

/// Bound on a value, in the unit of the field.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum Limit {
    #[display("≤ {_0}")]
    AtMost(f64),

    #[display("≥ {_0}")]
    AtLeast(f64),
}

impl Limit {
    /// Undefined and NaN values are never admitted.
    pub fn admits(self, value: Option<f64>) -> bool {
        match (self, value) {
            (Self::AtMost(limit), Some(value)) => value <= limit,
            (Self::AtLeast(limit), Some(value)) => value >= limit,
            (_, None) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Rule {
    pub description: String,

    #[serde(default)]
    pub category: Category,

    pub field: Field,
    pub limit: Limit,
}

impl Rule {
    pub fn new(
        description: impl Into<String>,
        category: Category,
        field: Field,
        limit: Limit,
    ) -> Self {
        Self { description: description.into(), category, field, limit }
    }
}

/// Ordered rules, all of which are evaluated for every configuration.
#[must_use]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Ruleset {
    #[serde(default, rename = "rule")]
    pub rules: Vec<Rule>,
}

impl Default for Ruleset {
    /// Segment limits of the 6 MJ / 120 V accumulator regulations, the overall 600 V pack limit,
    /// and the 400 V input limit of the inverter.
    fn default() -> Self {
        Self {
            rules: vec![
                Rule::new(
                    "segment voltage must not exceed 120 V",
                    Category::Regulation,
                    Field::MaxModuleVoltage,
                    Limit::AtMost(120.0),
                ),
                Rule::new(
                    "segment energy must not exceed 6 MJ",
                    Category::Regulation,
                    Field::MaxModuleEnergy,
                    Limit::AtMost(6.0 / 3.6),
                ),
                Rule::new(
                    "segment mass must not exceed 12 kg",
                    Category::Regulation,
                    Field::ModuleMass,
                    Limit::AtMost(12.0),
                ),
                Rule::new(
                    "pack voltage must not exceed 600 V",
                    Category::Regulation,
                    Field::MaxPackVoltage,
                    Limit::AtMost(600.0),
                ),
                Rule::new(
                    "pack voltage must not exceed the 400 V inverter input",
                    Category::Hardware,
                    Field::MaxPackVoltage,
                    Limit::AtMost(400.0),
                ),
            ],
        }
    }
}

impl Ruleset {
    #[instrument(skip(path), fields(path = ?path))]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read the ruleset `{}`", path.display()))?;
        let ruleset = Self::from_toml(&text)
            .with_context(|| format!("failed to parse the ruleset `{}`", path.display()))?;
        info!(n_rules = ruleset.rules.len(), "loaded the ruleset");
        Ok(ruleset)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn evaluate(&self, parameters: &PackParameters) -> Verdict {
        let violations = self
            .rules
            .iter()
            .filter_map(|rule| {
                let value = parameters.value(rule.field);
                (!rule.limit.admits(value)).then(|| Violation { rule: rule.clone(), value })
            })
            .collect();
        Verdict { violations }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Violation {
    pub rule: Rule,

    /// Actual value, [`None`] if undefined.
    pub value: Option<f64>,
}

#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Verdict {
    pub violations: Vec<Violation>,
}

impl Verdict {
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    #[cfg(test)]
    pub fn violates(&self, field: Field, category: Category) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.rule.field == field && violation.rule.category == category)
    }
}
