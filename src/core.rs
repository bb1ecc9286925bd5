pub mod busbar;
pub mod candidate;
pub mod feasibility;
pub mod field;
pub mod generator;
pub mod pack;
pub mod search;

/// Rejected input that aborts a single candidate but not the whole sweep.
#[derive(Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    #[display("unknown cell `{name}`")]
    UnknownCell { name: String },

    #[display("candidate `{candidate}` is built for `{expected}`, not for `{actual}`")]
    CellMismatch { candidate: String, expected: String, actual: String },

    #[display("candidate `{candidate}` has a zero count")]
    ZeroCount { candidate: String },

    #[display("{n_series} series cells cannot be split evenly into {n_modules} modules")]
    NotDivisible { n_series: u32, n_modules: u32 },
}
