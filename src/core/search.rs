use bon::Builder;

use crate::{
    catalog::CellRecord,
    core::{
        InputError,
        busbar::BusbarModel,
        candidate::Candidate,
        feasibility::{Ruleset, Verdict},
        generator::Generator,
        pack::PackParameters,
    },
    prelude::*,
};

/// Candidate together with its calculated parameters and the verdict.
#[must_use]
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub candidate: Candidate,
    pub parameters: PackParameters,
    pub verdict: Verdict,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.verdict.is_feasible()
    }
}

/// Generate, calculate, and filter in one go.
#[derive(Builder)]
pub struct Search<'a> {
    generator: &'a Generator<'a>,
    busbar: &'a BusbarModel,
    ruleset: &'a Ruleset,
}

impl Search<'_> {
    /// Evaluate every generated candidate for the cell, keeping the generator order.
    ///
    /// A candidate that fails to evaluate is logged and skipped, it never aborts the sweep.
    #[instrument(skip_all, fields(cell = %cell.name))]
    pub fn run(&self, cell: &CellRecord) -> Vec<Evaluation> {
        let candidates = self.generator.generate(cell);
        let n_candidates = candidates.len();
        let evaluations: Vec<_> = candidates
            .into_iter()
            .filter_map(|candidate| match self.evaluate(cell, candidate) {
                Ok(evaluation) => Some(evaluation),
                Err(error) => {
                    warn!(%error, "skipping the candidate");
                    None
                }
            })
            .collect();
        let n_feasible = evaluations.iter().filter(|evaluation| evaluation.is_feasible()).count();
        info!(n_candidates, n_feasible, "evaluated");
        evaluations
    }

    pub fn evaluate(
        &self,
        cell: &CellRecord,
        candidate: Candidate,
    ) -> Result<Evaluation, InputError> {
        let parameters = PackParameters::calculate(cell, &candidate, self.busbar)?;
        let verdict = self.ruleset.evaluate(&parameters);
        if !verdict.is_feasible() {
            debug!(
                %candidate,
                n_violations = verdict.violations.len(),
                first = %verdict.violations[0].rule.description,
                "rejected"
            );
        }
        Ok(Evaluation { candidate, parameters, verdict })
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::{
        catalog::tests::cell_21700,
        quantity::{electric::Volts, energy::KilowattHours},
    };

    #[test]
    fn test_run() {
        let generator = Generator::builder()
            .target_voltage(Volts(300.0))
            .voltage_tolerance(Volts(10.0))
            .target_energy(KilowattHours(7.5))
            .energy_tolerance(KilowattHours(0.5))
            .build();
        let busbar = BusbarModel::default();
        let ruleset = Ruleset::default();
        let search = Search::builder().generator(&generator).busbar(&busbar).ruleset(&ruleset).build();

        let evaluations = search.run(&cell_21700());
        let all = evaluations.iter().map(|evaluation| evaluation.candidate.to_string()).collect_vec();
        assert_eq!(all, ["84s5p-4m", "84s5p-6m", "84s5p-7m", "85s5p-5m"]);

        let feasible = evaluations
            .iter()
            .filter(|evaluation| evaluation.is_feasible())
            .map(|evaluation| evaluation.candidate.to_string())
            .collect_vec();
        assert_eq!(feasible, ["84s5p-6m", "84s5p-7m"]);
    }

    #[test]
    fn test_evaluate_rejects_malformed_candidate() {
        let generator = Generator::builder()
            .target_voltage(Volts(300.0))
            .voltage_tolerance(Volts(10.0))
            .target_energy(KilowattHours(7.5))
            .energy_tolerance(KilowattHours(0.5))
            .build();
        let busbar = BusbarModel::default();
        let ruleset = Ruleset::default();
        let search = Search::builder().generator(&generator).busbar(&busbar).ruleset(&ruleset).build();

        let candidate =
            Candidate { cell_name: "P45B".to_owned(), n_series: 85, n_parallel: 5, n_modules: 4 };
        assert!(matches!(
            search.evaluate(&cell_21700(), candidate),
            Err(InputError::NotDivisible { n_series: 85, n_modules: 4 }),
        ));
    }
}
