use std::path::PathBuf;

use clap::Parser;

use crate::{
    catalog::{CatalogLoader, CellCatalog},
    prelude::*,
};

#[derive(Copy, Clone, clap::ValueEnum)]
pub enum Delimiter {
    Tab,
    Comma,
    Semicolon,
}

impl Delimiter {
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Tab => b'\t',
            Self::Comma => b',',
            Self::Semicolon => b';',
        }
    }
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Cell datasheet table, with either cells or attributes as rows.
    #[clap(long = "cells-path", env = "CELLS_PATH", default_value = "cells.tsv")]
    pub cells_path: PathBuf,

    #[clap(long = "delimiter", env = "CELLS_DELIMITER", value_enum, default_value = "tab")]
    pub delimiter: Delimiter,
}

impl CatalogArgs {
    pub fn load(&self) -> Result<CellCatalog> {
        let catalog = CatalogLoader::with_delimiter(self.delimiter.as_byte()).load_path(&self.cells_path)?;
        ensure!(!catalog.is_empty(), "the cell catalog `{}` is empty", self.cells_path.display());
        Ok(catalog)
    }
}
