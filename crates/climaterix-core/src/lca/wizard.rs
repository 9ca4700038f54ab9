use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClimaterixError;
use crate::ClimaterixResult;

use super::energy::{energy_footprint, EnergyBreakdown, EnergyInputs};
use super::materials::{materials_impact, MaterialLine};
use super::transport::{transport_impact, TransportBreakdown, TransportLeg};

/// Use-phase impact is estimated as this share of the manufacturing energy
/// impact (simplified model, no per-product use profile).
pub const USE_PHASE_FACTOR: Decimal = dec!(0.3);
/// End-of-life impact is estimated as this share of the materials impact.
pub const END_OF_LIFE_FACTOR: Decimal = dec!(0.05);

/// Benchmark totals in kg CO2e per functional unit.
pub const INDUSTRY_AVERAGE: Decimal = dec!(320);
pub const BEST_IN_CLASS: Decimal = dec!(180);
pub const REGULATORY_LIMIT: Decimal = dec!(400);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The five assessment steps, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ProductInfo,
    Materials,
    Energy,
    Transport,
    Results,
}

impl WizardStep {
    /// 1-based step number, matching the "Step N of 5" progression.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::ProductInfo => 1,
            WizardStep::Materials => 2,
            WizardStep::Energy => 3,
            WizardStep::Transport => 4,
            WizardStep::Results => 5,
        }
    }

    fn successor(&self) -> Option<WizardStep> {
        match self {
            WizardStep::ProductInfo => Some(WizardStep::Materials),
            WizardStep::Materials => Some(WizardStep::Energy),
            WizardStep::Energy => Some(WizardStep::Transport),
            WizardStep::Transport => Some(WizardStep::Results),
            WizardStep::Results => None,
        }
    }
}

/// Step 1 answers. All three fields are required to advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub category: String,
    /// The declared unit the whole assessment is normalized to ("1 unit",
    /// "1 year of service").
    pub functional_unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "target")]
pub enum WizardAction {
    /// Move to the next step; requires the current step's data present.
    Advance,
    /// Return to any strictly earlier step. Accumulated data is kept.
    Back(WizardStep),
    /// Start over: back to step 1 with all data cleared.
    Reset,
}

/// One stage of the EPD lifecycle breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Materials,
    Manufacturing,
    Transport,
    UsePhase,
    EndOfLife,
}

impl LifecycleStage {
    /// EN 15804 module label for reporting.
    pub fn epd_module(&self) -> &'static str {
        match self {
            LifecycleStage::Materials => "A1-A3",
            LifecycleStage::Manufacturing => "A3",
            LifecycleStage::Transport => "A4",
            LifecycleStage::UsePhase => "B1",
            LifecycleStage::EndOfLife => "C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageImpact {
    pub stage: LifecycleStage,
    pub impact: Decimal,
    /// Share of the total, 0-100. Zero when the total itself is zero.
    pub share_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub total_impact: Decimal,
    pub industry_average: Decimal,
    pub best_in_class: Decimal,
    pub regulatory_limit: Decimal,
    /// total / industry average * 100.
    pub vs_industry_pct: Decimal,
    pub within_regulatory_limit: bool,
}

/// Final cradle-to-grave results, computed at the Results step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LcaResults {
    pub product: ProductInfo,
    pub materials_impact: Decimal,
    pub energy_impact: Decimal,
    pub transport_impact: Decimal,
    pub use_phase_impact: Decimal,
    pub end_of_life_impact: Decimal,
    pub total_impact: Decimal,
    pub stages: Vec<StageImpact>,
    pub benchmark: BenchmarkComparison,
}

/// The assessment state machine. Owned by the caller's session layer and
/// advanced through explicit actions; it never advances itself.
///
/// Data for a step can only be set while that step is current, and a forward
/// transition requires the current step's data to be present, so reaching
/// `Results` guarantees every stage input exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wizard {
    step: WizardStep,
    product: Option<ProductInfo>,
    materials: Option<Vec<MaterialLine>>,
    energy: Option<EnergyBreakdown>,
    transport: Option<TransportBreakdown>,
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::ProductInfo
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Record step 1 answers. All fields must be non-blank.
    pub fn set_product(&mut self, product: ProductInfo) -> ClimaterixResult<()> {
        self.require_step(WizardStep::ProductInfo)?;
        for (field, value) in [
            ("name", &product.name),
            ("category", &product.category),
            ("functional_unit", &product.functional_unit),
        ] {
            if value.trim().is_empty() {
                return Err(ClimaterixError::InvalidInput {
                    field: field.into(),
                    reason: "Product info fields cannot be blank".into(),
                });
            }
        }
        self.product = Some(product);
        Ok(())
    }

    /// Record step 2 answers. An empty list is a valid zero-materials
    /// product (software, services).
    pub fn set_materials(&mut self, materials: Vec<MaterialLine>) -> ClimaterixResult<()> {
        self.require_step(WizardStep::Materials)?;
        self.materials = Some(materials);
        Ok(())
    }

    /// Record step 3 answers; the footprint is computed and stored, so the
    /// Results step never re-validates energy inputs.
    pub fn set_energy(&mut self, inputs: &EnergyInputs) -> ClimaterixResult<()> {
        self.require_step(WizardStep::Energy)?;
        self.energy = Some(energy_footprint(inputs)?);
        Ok(())
    }

    /// Record step 4 answers as computed inbound and outbound impacts.
    pub fn set_transport(
        &mut self,
        inbound: &TransportLeg,
        outbound: &TransportLeg,
    ) -> ClimaterixResult<()> {
        self.require_step(WizardStep::Transport)?;
        self.transport = Some(transport_impact(inbound, outbound)?);
        Ok(())
    }

    /// The `(state, action) -> new state` transition function. Returns the
    /// new current step; an invalid transition leaves the wizard unchanged.
    pub fn apply(&mut self, action: WizardAction) -> ClimaterixResult<WizardStep> {
        match action {
            WizardAction::Advance => {
                let next = self.step.successor().ok_or_else(|| {
                    ClimaterixError::InvalidTransition(
                        "Results is the final step; use Back or Reset".into(),
                    )
                })?;
                self.require_current_data()?;
                self.step = next;
            }
            WizardAction::Back(target) => {
                if target >= self.step {
                    return Err(ClimaterixError::InvalidTransition(format!(
                        "Cannot go back from step {} to step {}",
                        self.step.number(),
                        target.number()
                    )));
                }
                self.step = target;
            }
            WizardAction::Reset => {
                *self = Wizard::new();
            }
        }
        Ok(self.step)
    }

    /// Compute the cradle-to-grave results. Only valid at the Results step.
    /// Also returns advisory warnings (benchmark exceedances).
    pub fn results(&self) -> ClimaterixResult<(LcaResults, Vec<String>)> {
        self.require_step(WizardStep::Results)?;

        let product = self
            .product
            .clone()
            .ok_or_else(|| ClimaterixError::InsufficientData("Product info missing".into()))?;
        let materials = self
            .materials
            .as_deref()
            .ok_or_else(|| ClimaterixError::InsufficientData("Materials missing".into()))?;
        let energy = self
            .energy
            .as_ref()
            .ok_or_else(|| ClimaterixError::InsufficientData("Energy data missing".into()))?;
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| ClimaterixError::InsufficientData("Transport data missing".into()))?;

        let materials_total = materials_impact(materials);
        let energy_total = energy.total;
        let transport_total = transport.total;
        let use_phase = energy_total * USE_PHASE_FACTOR;
        let end_of_life = materials_total * END_OF_LIFE_FACTOR;
        let total = materials_total + energy_total + transport_total + use_phase + end_of_life;

        let stages = vec![
            stage_impact(LifecycleStage::Materials, materials_total, total),
            stage_impact(LifecycleStage::Manufacturing, energy_total, total),
            stage_impact(LifecycleStage::Transport, transport_total, total),
            stage_impact(LifecycleStage::UsePhase, use_phase, total),
            stage_impact(LifecycleStage::EndOfLife, end_of_life, total),
        ];

        let vs_industry_pct = total / INDUSTRY_AVERAGE * dec!(100);
        let within_limit = total <= REGULATORY_LIMIT;
        let benchmark = BenchmarkComparison {
            total_impact: total,
            industry_average: INDUSTRY_AVERAGE,
            best_in_class: BEST_IN_CLASS,
            regulatory_limit: REGULATORY_LIMIT,
            vs_industry_pct,
            within_regulatory_limit: within_limit,
        };

        let mut warnings = Vec::new();
        if !within_limit {
            warnings.push(format!(
                "Total footprint of {total} kg CO2e exceeds the regulatory limit of {REGULATORY_LIMIT}"
            ));
        } else if total > INDUSTRY_AVERAGE {
            warnings.push(format!(
                "Total footprint of {total} kg CO2e is above the industry average of {INDUSTRY_AVERAGE}"
            ));
        }

        let results = LcaResults {
            product,
            materials_impact: materials_total,
            energy_impact: energy_total,
            transport_impact: transport_total,
            use_phase_impact: use_phase,
            end_of_life_impact: end_of_life,
            total_impact: total,
            stages,
            benchmark,
        };
        Ok((results, warnings))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn require_step(&self, expected: WizardStep) -> ClimaterixResult<()> {
        if self.step != expected {
            return Err(ClimaterixError::InvalidTransition(format!(
                "Action belongs to step {}, but the wizard is at step {}",
                expected.number(),
                self.step.number()
            )));
        }
        Ok(())
    }

    fn require_current_data(&self) -> ClimaterixResult<()> {
        let present = match self.step {
            WizardStep::ProductInfo => self.product.is_some(),
            WizardStep::Materials => self.materials.is_some(),
            WizardStep::Energy => self.energy.is_some(),
            WizardStep::Transport => self.transport.is_some(),
            WizardStep::Results => true,
        };
        if !present {
            return Err(ClimaterixError::InvalidTransition(format!(
                "Step {} inputs must be provided before advancing",
                self.step.number()
            )));
        }
        Ok(())
    }
}

fn stage_impact(stage: LifecycleStage, impact: Decimal, total: Decimal) -> StageImpact {
    let share_pct = if total.is_zero() {
        Decimal::ZERO
    } else {
        impact / total * dec!(100)
    };
    StageImpact {
        stage,
        impact,
        share_pct,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
