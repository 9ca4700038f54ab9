use clap::{Args, ValueEnum};
use serde_json::Value;

use climaterix_core::lca::materials::{self, MaterialCategory};
use climaterix_core::lca::{self, LcaInput};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryFilter {
    Metals,
    Plastics,
    Electronics,
    Concrete,
    Packaging,
}

impl From<CategoryFilter> for MaterialCategory {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::Metals => MaterialCategory::Metals,
            CategoryFilter::Plastics => MaterialCategory::Plastics,
            CategoryFilter::Electronics => MaterialCategory::Electronics,
            CategoryFilter::Concrete => MaterialCategory::Concrete,
            CategoryFilter::Packaging => MaterialCategory::Packaging,
        }
    }
}

/// Arguments for the LCA calculator
#[derive(Args)]
pub struct LcaArgs {
    /// Path to a JSON or YAML file with the full assessment input
    /// (product, materials, energy, transport legs)
    #[arg(long)]
    pub input: Option<String>,

    /// Search the material library by name substring instead of running
    /// an assessment
    #[arg(long)]
    pub search: Option<String>,

    /// Restrict a material search to one category
    #[arg(long, value_enum)]
    pub category: Option<CategoryFilter>,
}

pub fn run_lca(args: LcaArgs) -> Result<Value, Box<dyn std::error::Error>> {
    // Library search is a standalone mode: no assessment input involved.
    if args.search.is_some() || args.category.is_some() {
        let library = materials::material_library();
        let hits = materials::search(
            &library,
            args.category.map(Into::into),
            args.search.as_deref(),
        );
        return Ok(serde_json::to_value(hits)?);
    }

    let lca_input: LcaInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("Provide --input <file>, pipe JSON on stdin, or use --search".into());
    };

    let result = lca::assess(&lca_input)?;
    Ok(serde_json::to_value(&result)?)
}
