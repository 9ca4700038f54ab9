use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use climaterix_core::lca::energy::EnergyInputs;
use climaterix_core::lca::materials::{material_library, MaterialLine};
use climaterix_core::lca::transport::{TransportLeg, TransportMode};
use climaterix_core::lca::wizard::{
    LifecycleStage, ProductInfo, Wizard, WizardAction, WizardStep, REGULATORY_LIMIT,
};
use climaterix_core::lca::{assess, LcaInput};
use climaterix_core::ClimaterixError;

// ===========================================================================
// Fixtures
// ===========================================================================

fn firewall_product() -> ProductInfo {
    ProductInfo {
        name: "Quantum Firewall 5800".into(),
        category: "Network Appliance".into(),
        functional_unit: "1 unit".into(),
    }
}

fn firewall_materials() -> Vec<MaterialLine> {
    let library = material_library();
    let steel = library
        .iter()
        .find(|m| m.name.starts_with("Steel"))
        .unwrap();
    let pcb = library
        .iter()
        .find(|m| m.name.starts_with("Printed circuit"))
        .unwrap();
    vec![
        MaterialLine::new(steel, dec!(8)).unwrap(),
        MaterialLine::new(pcb, dec!(1.2)).unwrap(),
    ]
}

fn firewall_energy() -> EnergyInputs {
    EnergyInputs {
        electricity_kwh: dec!(150),
        grid_factor: dec!(0.45),
        renewable_pct: dec!(25),
        natural_gas_kwh: dec!(50),
        diesel_liters: dec!(2),
        process_heat_mj: dec!(500),
    }
}

fn firewall_input() -> LcaInput {
    LcaInput {
        product: firewall_product(),
        materials: firewall_materials(),
        energy: firewall_energy(),
        inbound: TransportLeg {
            mode: TransportMode::Truck,
            distance_km: dec!(500),
            weight_kg: dec!(50),
        },
        outbound: TransportLeg {
            mode: TransportMode::Air,
            distance_km: dec!(2000),
            weight_kg: dec!(25),
        },
    }
}

// ===========================================================================
// End-to-end assessment
// ===========================================================================

#[test]
fn test_full_assessment_stage_totals() {
    let output = assess(&firewall_input()).unwrap();
    let results = &output.result;

    // Materials: 8 * 2.1 + 1.2 * 15.2 = 16.8 + 18.24 = 35.04
    assert_eq!(results.materials_impact, dec!(35.04));
    // Energy: 150*0.45*0.75 + 50*0.2 + 2*2.7 + 500*0.06 = 96.025
    assert_eq!(results.energy_impact, dec!(96.025));
    // Transport: 1.55 inbound + 30.1 outbound
    assert_eq!(results.transport_impact, dec!(31.65));
    // Use phase 30% of energy, end of life 5% of materials.
    assert_eq!(results.use_phase_impact, dec!(28.8075));
    assert_eq!(results.end_of_life_impact, dec!(1.752));
    assert_eq!(
        results.total_impact,
        dec!(35.04) + dec!(96.025) + dec!(31.65) + dec!(28.8075) + dec!(1.752)
    );
}

#[test]
fn test_assessment_stage_shares_sum_to_100() {
    let output = assess(&firewall_input()).unwrap();
    let results = &output.result;

    assert_eq!(results.stages.len(), 5);
    let share_sum: Decimal = results.stages.iter().map(|s| s.share_pct).sum();
    assert!((share_sum - dec!(100)).abs() < dec!(0.0001));

    // The breakdown names every lifecycle stage exactly once.
    for stage in [
        LifecycleStage::Materials,
        LifecycleStage::Manufacturing,
        LifecycleStage::Transport,
        LifecycleStage::UsePhase,
        LifecycleStage::EndOfLife,
    ] {
        assert_eq!(
            results.stages.iter().filter(|s| s.stage == stage).count(),
            1
        );
    }
}

#[test]
fn test_assessment_benchmark_fields() {
    let output = assess(&firewall_input()).unwrap();
    let benchmark = &output.result.benchmark;

    assert_eq!(benchmark.industry_average, dec!(320));
    assert_eq!(benchmark.best_in_class, dec!(180));
    assert_eq!(benchmark.regulatory_limit, dec!(400));
    assert_eq!(benchmark.total_impact, output.result.total_impact);
    assert!(benchmark.within_regulatory_limit);
}

#[test]
fn test_assessment_rejects_invalid_energy() {
    let mut input = firewall_input();
    input.energy.renewable_pct = dec!(150);
    assert!(matches!(
        assess(&input),
        Err(ClimaterixError::InvalidInput { .. })
    ));
}

#[test]
fn test_software_product_with_no_materials() {
    let mut input = firewall_input();
    input.materials = Vec::new();
    let output = assess(&input).unwrap();
    let results = &output.result;
    assert_eq!(results.materials_impact, Decimal::ZERO);
    assert_eq!(results.end_of_life_impact, Decimal::ZERO);
    assert!(results.total_impact > Decimal::ZERO);
}

// ===========================================================================
// Wizard progression, driven the way a session layer would
// ===========================================================================

#[test]
fn test_interactive_walk_with_revisions() {
    let mut wizard = Wizard::new();
    wizard.set_product(firewall_product()).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    wizard.set_materials(firewall_materials()).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    wizard.set_energy(&firewall_energy()).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();

    // User goes back to tweak the materials, then returns.
    wizard
        .apply(WizardAction::Back(WizardStep::Materials))
        .unwrap();
    wizard.set_materials(firewall_materials()).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    assert_eq!(wizard.step(), WizardStep::Energy);
    // Energy data from the first pass is still there.
    wizard.apply(WizardAction::Advance).unwrap();

    wizard
        .set_transport(
            &TransportLeg {
                mode: TransportMode::Ship,
                distance_km: dec!(8000),
                weight_kg: dec!(25),
            },
            &TransportLeg {
                mode: TransportMode::Truck,
                distance_km: dec!(300),
                weight_kg: dec!(25),
            },
        )
        .unwrap();
    wizard.apply(WizardAction::Advance).unwrap();

    let (results, warnings) = wizard.results().unwrap();
    assert!(results.total_impact < REGULATORY_LIMIT);
    assert!(warnings.is_empty());
}

#[test]
fn test_wizard_cannot_jump_to_results() {
    let mut wizard = Wizard::new();
    wizard.set_product(firewall_product()).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    // Only one step forward per Advance, and step 2 data is still missing.
    assert!(wizard.apply(WizardAction::Advance).is_err());
    assert_eq!(wizard.step(), WizardStep::Materials);
    assert!(wizard.results().is_err());
}

#[test]
fn test_wizard_reset_from_results() {
    let input = firewall_input();
    let mut wizard = Wizard::new();
    wizard.set_product(input.product.clone()).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    wizard.set_materials(input.materials.clone()).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    wizard.set_energy(&input.energy).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    wizard.set_transport(&input.inbound, &input.outbound).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    assert_eq!(wizard.step(), WizardStep::Results);

    wizard.apply(WizardAction::Reset).unwrap();
    assert_eq!(wizard.step(), WizardStep::ProductInfo);
    assert!(wizard.results().is_err());
    assert!(wizard.apply(WizardAction::Advance).is_err());
}

// ===========================================================================
// Serialization: wizard state survives a session-store round trip
// ===========================================================================

#[test]
fn test_wizard_state_round_trips_through_json() {
    let mut wizard = Wizard::new();
    wizard.set_product(firewall_product()).unwrap();
    wizard.apply(WizardAction::Advance).unwrap();
    wizard.set_materials(firewall_materials()).unwrap();

    let stored = serde_json::to_string(&wizard).unwrap();
    let mut restored: Wizard = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored.step(), WizardStep::Materials);

    // The restored session continues where it left off.
    restored.apply(WizardAction::Advance).unwrap();
    assert_eq!(restored.step(), WizardStep::Energy);
}
