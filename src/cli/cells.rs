use clap::Parser;

use crate::{cli::catalog::CatalogArgs, prelude::*, tables::build_catalog_table};

#[derive(Parser)]
pub struct CellsArgs {
    #[clap(flatten)]
    pub catalog: CatalogArgs,
}

pub fn cells(args: &CellsArgs) -> Result {
    println!("{}", build_catalog_table(&args.catalog.load()?));
    Ok(())
}
