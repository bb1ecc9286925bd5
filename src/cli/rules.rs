use std::path::PathBuf;

use clap::Parser;

use crate::{core::feasibility::Ruleset, prelude::*};

#[derive(Parser)]
pub struct RulesArgs {
    /// TOML ruleset replacing the built-in rules.
    #[clap(long = "rules", env = "RULES_PATH")]
    pub rules_path: Option<PathBuf>,
}

impl RulesArgs {
    pub fn ruleset(&self) -> Result<Ruleset> {
        match &self.rules_path {
            Some(path) => Ruleset::read_from(path),
            None => Ok(Ruleset::default()),
        }
    }
}

pub fn rules(args: &RulesArgs) -> Result {
    print!("{}", args.ruleset()?.to_toml()?);
    Ok(())
}
