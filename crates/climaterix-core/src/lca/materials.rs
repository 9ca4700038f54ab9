use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClimaterixError;
use crate::ClimaterixResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Metals,
    Plastics,
    Electronics,
    Concrete,
    Packaging,
}

impl MaterialCategory {
    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Metals => "Metals (Steel, Aluminum, Copper)",
            MaterialCategory::Plastics => "Plastics & Polymers",
            MaterialCategory::Electronics => "Electronics & PCB Components",
            MaterialCategory::Concrete => "Concrete & Cement",
            MaterialCategory::Packaging => "Packaging Materials",
        }
    }
}

/// One library entry: a material with its GWP factor and source database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub name: String,
    pub category: MaterialCategory,
    /// kg CO2e per `unit`.
    pub gwp_per_unit: Decimal,
    /// Reference unit the factor is quoted against ("kg", "piece").
    pub unit: String,
    /// Source LCI database the factor was taken from.
    pub database: String,
}

/// A material chosen for a product, with quantity and derived total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub material: String,
    pub category: MaterialCategory,
    pub unit: String,
    pub quantity: Decimal,
    pub gwp_per_unit: Decimal,
    /// `gwp_per_unit * quantity`, fixed at construction.
    pub total_gwp: Decimal,
}

impl MaterialLine {
    pub fn new(record: &MaterialRecord, quantity: Decimal) -> ClimaterixResult<Self> {
        if quantity < Decimal::ZERO {
            return Err(ClimaterixError::InvalidInput {
                field: "quantity".into(),
                reason: format!("Quantity for '{}' cannot be negative", record.name),
            });
        }
        Ok(MaterialLine {
            material: record.name.clone(),
            category: record.category,
            unit: record.unit.clone(),
            quantity,
            gwp_per_unit: record.gwp_per_unit,
            total_gwp: record.gwp_per_unit * quantity,
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The built-in sample library. Factors are representative values in kg CO2e
/// per reference unit, not live database lookups.
pub fn material_library() -> Vec<MaterialRecord> {
    fn record(
        name: &str,
        category: MaterialCategory,
        gwp_per_unit: Decimal,
        unit: &str,
        database: &str,
    ) -> MaterialRecord {
        MaterialRecord {
            name: name.to_string(),
            category,
            gwp_per_unit,
            unit: unit.to_string(),
            database: database.to_string(),
        }
    }

    vec![
        record(
            "Steel, low-alloyed, hot rolled",
            MaterialCategory::Metals,
            dec!(2.1),
            "kg",
            "Ecoinvent",
        ),
        record(
            "Aluminum, primary, ingot",
            MaterialCategory::Metals,
            dec!(11.5),
            "kg",
            "Ecoinvent",
        ),
        record(
            "Copper, primary, at refinery",
            MaterialCategory::Metals,
            dec!(3.8),
            "kg",
            "Ecoinvent",
        ),
        record(
            "Polystyrene, high impact",
            MaterialCategory::Plastics,
            dec!(3.2),
            "kg",
            "Ecoinvent",
        ),
        record(
            "Polyethylene, high density",
            MaterialCategory::Plastics,
            dec!(1.9),
            "kg",
            "Ecoinvent",
        ),
        record(
            "ABS copolymer",
            MaterialCategory::Plastics,
            dec!(3.5),
            "kg",
            "Ecoinvent",
        ),
        record(
            "Printed circuit board, surface mounted",
            MaterialCategory::Electronics,
            dec!(15.2),
            "kg",
            "Ecoinvent",
        ),
        record(
            "Integrated circuit, logic type",
            MaterialCategory::Electronics,
            dec!(0.45),
            "piece",
            "Ecoinvent",
        ),
        record(
            "Capacitor, surface mounted",
            MaterialCategory::Electronics,
            dec!(0.02),
            "piece",
            "Ecoinvent",
        ),
        record(
            "Concrete, normal, at plant",
            MaterialCategory::Concrete,
            dec!(0.15),
            "kg",
            "Ecoinvent",
        ),
        record(
            "Portland cement",
            MaterialCategory::Concrete,
            dec!(0.92),
            "kg",
            "US LCI",
        ),
        record(
            "Corrugated board",
            MaterialCategory::Packaging,
            dec!(0.55),
            "kg",
            "Ecoinvent",
        ),
        record(
            "Polyethylene film",
            MaterialCategory::Packaging,
            dec!(2.1),
            "kg",
            "Ecoinvent",
        ),
    ]
}

/// Filter the library by optional category and case-insensitive name
/// substring. No filter returns everything; an unmatched query returns an
/// empty list, not an error.
pub fn search<'a>(
    library: &'a [MaterialRecord],
    category: Option<MaterialCategory>,
    query: Option<&str>,
) -> Vec<&'a MaterialRecord> {
    let query_lower = query.map(str::to_lowercase);
    library
        .iter()
        .filter(|record| category.map_or(true, |c| record.category == c))
        .filter(|record| {
            query_lower
                .as_deref()
                .map_or(true, |q| record.name.to_lowercase().contains(q))
        })
        .collect()
}

/// Sum of line totals, in kg CO2e. An empty list is a zero-materials product.
pub fn materials_impact(lines: &[MaterialLine]) -> Decimal {
    lines.iter().map(|line| line.total_gwp).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
