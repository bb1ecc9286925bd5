//! Append-only CSV output of accepted configurations.

use std::{
    fmt::Debug,
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use itertools::Itertools;

use crate::{
    core::{field::Field, search::Evaluation},
    fmt::UNDEFINED,
    prelude::*,
};

#[must_use]
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Open the file for appending, creating it if needed.
    ///
    /// The header is only written into an empty file.
    #[instrument(skip(path), fields(path = ?path))]
    pub fn append_to<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;
        let is_empty = file.metadata()?.len() == 0;
        debug!(is_empty, "opened the sink");
        Self::new(file, is_empty)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, write_header: bool) -> Result<Self> {
        let mut this = Self { writer: csv::WriterBuilder::new().from_writer(inner) };
        if write_header {
            this.writer.write_record(Self::header())?;
        }
        Ok(this)
    }

    pub fn header() -> Vec<&'static str> {
        ["Cell", "Configuration"].into_iter().chain(Field::all().map(Field::header)).collect()
    }

    pub fn append(&mut self, evaluation: &Evaluation) -> Result {
        let values = Field::all().map(|field| {
            evaluation
                .parameters
                .value(field)
                .map_or_else(|| UNDEFINED.to_owned(), |value| value.to_string())
        });
        let record = [evaluation.candidate.cell_name.clone(), evaluation.candidate.to_string()]
            .into_iter()
            .chain(values)
            .collect_vec();
        self.writer.write_record(&record)?;
        Ok(())
    }

    /// Append the feasible evaluations, skipping the rest.
    ///
    /// Returns the number of appended rows.
    pub fn append_feasible(&mut self, evaluations: &[Evaluation]) -> Result<usize> {
        let mut n_appended = 0;
        for evaluation in evaluations.iter().filter(|evaluation| evaluation.is_feasible()) {
            self.append(evaluation)?;
            n_appended += 1;
        }
        self.writer.flush()?;
        debug!(n_appended, "appended");
        Ok(n_appended)
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|error| anyhow!("failed to flush the sink: {}", error.error()))
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::*;
    use crate::{
        catalog::tests::cell_21700,
        core::{
            busbar::BusbarModel,
            candidate::Candidate,
            feasibility::{Ruleset, Verdict},
            generator::Generator,
            pack::PackParameters,
            search::Search,
        },
        quantity::{electric::Volts, energy::KilowattHours},
    };

    fn evaluations() -> Vec<Evaluation> {
        let generator = Generator::builder()
            .target_voltage(Volts(300.0))
            .voltage_tolerance(Volts(10.0))
            .target_energy(KilowattHours(7.5))
            .energy_tolerance(KilowattHours(0.5))
            .build();
        let busbar = BusbarModel::default();
        let ruleset = Ruleset::default();
        Search::builder()
            .generator(&generator)
            .busbar(&busbar)
            .ruleset(&ruleset)
            .build()
            .run(&cell_21700())
    }

    #[test]
    fn test_append_feasible() -> Result {
        let mut sink = CsvSink::new(Vec::new(), true)?;
        assert_eq!(sink.append_feasible(&evaluations())?, 2);
        let text = String::from_utf8(sink.into_inner()?)?;

        let lines = text.lines().collect_vec();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Cell,Configuration,Series per module,Capacity (Ah),"));
        assert!(lines[1].starts_with("P45B,84s5p-6m,14,25,"));
        assert!(lines[2].starts_with("P45B,84s5p-7m,12,25,"));
        assert_eq!(lines[1].split(',').count(), 2 + Field::all().count());
        Ok(())
    }

    #[test]
    fn test_undefined_value() -> Result {
        let candidate =
            Candidate { cell_name: "P45B".to_owned(), n_series: 84, n_parallel: 5, n_modules: 7 };
        let parameters =
            PackParameters::calculate(&cell_21700(), &candidate, &BusbarModel::default())?;
        let evaluation = Evaluation {
            candidate,
            parameters: PackParameters { efficiency: None, ..parameters },
            verdict: Verdict::default(),
        };

        let mut sink = CsvSink::new(Vec::new(), false)?;
        sink.append(&evaluation)?;
        let text = String::from_utf8(sink.into_inner()?)?;
        assert_eq!(text.matches("undefined").count(), 1);
        assert!(!text.starts_with("Cell"));
        Ok(())
    }

    #[test]
    fn test_header_is_written_once() -> Result {
        let path = env::temp_dir().join(format!("accumulator-calc-sink-{}.csv", std::process::id()));
        let _ = fs::remove_file(&path);

        let evaluations = evaluations();
        CsvSink::append_to(&path)?.append_feasible(&evaluations)?;
        CsvSink::append_to(&path)?.append_feasible(&evaluations)?;

        let text = fs::read_to_string(&path)?;
        fs::remove_file(&path)?;
        assert_eq!(text.matches("Cell,Configuration").count(), 1);
        assert_eq!(text.lines().count(), 5);
        Ok(())
    }
}
