//! Product life-cycle assessment: per-stage impact calculators and the
//! five-step assessment wizard. All impacts are kg CO2e per functional unit.

pub mod energy;
pub mod materials;
pub mod transport;
pub mod wizard;

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::types::{with_metadata, ComputationOutput};
use crate::ClimaterixResult;

use self::energy::EnergyInputs;
use self::materials::MaterialLine;
use self::transport::TransportLeg;
use self::wizard::{LcaResults, ProductInfo, Wizard, WizardAction};

/// One-shot assessment input: every step's data supplied up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LcaInput {
    pub product: ProductInfo,
    pub materials: Vec<MaterialLine>,
    pub energy: EnergyInputs,
    pub inbound: TransportLeg,
    pub outbound: TransportLeg,
}

/// Run a full assessment in one call by driving the wizard through all five
/// steps. Batch callers (CLI, bindings) use this; interactive callers hold a
/// [`Wizard`] and advance it step by step.
pub fn assess(input: &LcaInput) -> ClimaterixResult<ComputationOutput<LcaResults>> {
    let start = Instant::now();

    let mut wizard = Wizard::new();
    wizard.set_product(input.product.clone())?;
    wizard.apply(WizardAction::Advance)?;
    wizard.set_materials(input.materials.clone())?;
    wizard.apply(WizardAction::Advance)?;
    wizard.set_energy(&input.energy)?;
    wizard.apply(WizardAction::Advance)?;
    wizard.set_transport(&input.inbound, &input.outbound)?;
    wizard.apply(WizardAction::Advance)?;

    let (results, warnings) = wizard.results()?;

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "use_phase": "30% of manufacturing energy impact",
        "end_of_life": "5% of materials impact",
        "transport_factor_unit": "kg CO2e per tonne-km",
        "benchmark_unit": "kg CO2e per functional unit",
    });

    Ok(with_metadata(
        "Cradle-to-Grave Product LCA (Simplified)",
        &assumptions,
        warnings,
        elapsed,
        results,
    ))
}
