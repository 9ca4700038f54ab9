use clap::{Args, ValueEnum};
use serde_json::Value;

use climaterix_core::catalog::{
    default_bundles, financial_catalog, operations_catalog, InitiativeCatalog,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CatalogVariant {
    /// All six reduction levers
    Operations,
    /// The four capital-investment levers
    Financial,
}

/// Arguments for catalog inspection
#[derive(Args)]
pub struct CatalogArgs {
    /// Which catalog variant to show
    #[arg(long, value_enum, default_value = "operations")]
    pub variant: CatalogVariant,

    /// Show the predefined scenario bundles instead of the initiatives
    #[arg(long)]
    pub bundles: bool,
}

pub fn run_catalog(args: CatalogArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.bundles {
        let bundles: Vec<_> = default_bundles().iter().cloned().collect();
        return Ok(serde_json::to_value(bundles)?);
    }

    let catalog: InitiativeCatalog = match args.variant {
        CatalogVariant::Operations => operations_catalog(),
        CatalogVariant::Financial => financial_catalog(),
    };
    let initiatives: Vec<_> = catalog.iter().cloned().collect();
    Ok(serde_json::to_value(initiatives)?)
}
