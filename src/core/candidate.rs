/// Series, parallel, and module counts for a given cell type.
#[must_use]
#[derive(Clone, Debug, Eq, Hash, PartialEq, derive_more::Display)]
#[display("{n_series}s{n_parallel}p-{n_modules}m")]
pub struct Candidate {
    pub cell_name: String,

    /// Number of series-connected cell groups in the whole pack.
    pub n_series: u32,

    /// Number of cells connected in parallel in each group.
    pub n_parallel: u32,

    /// Number of modules (segments) the pack is split into.
    pub n_modules: u32,
}

impl Candidate {
    pub const fn n_cells(&self) -> u32 {
        self.n_series * self.n_parallel
    }
}
