use medsim_core::loan::{amortization_schedule, amortize_annual};
use medsim_core::simulation::{rate_cash_flow, simulate, CashFlowRating};
use medsim_core::types::SimulationInput;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization contract
// ===========================================================================

#[test]
fn test_amortize_no_debt_no_payment() {
    assert_eq!(amortize_annual(Decimal::ZERO, dec!(0.05), dec!(10)), Decimal::ZERO);
    assert_eq!(amortize_annual(dec!(-1), dec!(0.05), dec!(10)), Decimal::ZERO);
}

#[test]
fn test_amortize_degenerate_term() {
    assert_eq!(amortize_annual(dec!(250000), dec!(0.05), Decimal::ZERO), dec!(250000));
    assert_eq!(amortize_annual(dec!(250000), dec!(0.05), dec!(-1)), dec!(250000));
}

#[test]
fn test_amortize_zero_rate() {
    assert_eq!(amortize_annual(dec!(1000), Decimal::ZERO, dec!(5)), dec!(200));
}

#[test]
fn test_amortize_reference_loan() {
    // 100k at 3.5% over 7 years: annuity ~16,354
    let payment = amortize_annual(dec!(100000), dec!(0.035), dec!(7));
    assert!(payment > Decimal::ZERO);
    assert!(
        (payment - dec!(16354)).abs() < dec!(5),
        "expected ~16,354, got {payment}"
    );
}

#[test]
fn test_schedule_matches_annuity() {
    let principal = dec!(100000);
    let schedule = amortization_schedule(principal, dec!(0.035), dec!(7));

    let repaid: Decimal = schedule.iter().map(|row| row.principal).sum();
    assert_eq!(repaid, principal);
    assert_eq!(schedule.last().unwrap().closing_balance, Decimal::ZERO);
}

// ===========================================================================
// KPI engine, default input set
// ===========================================================================

#[test]
fn test_default_simulation_is_clean() {
    let result = simulate(&SimulationInput::default());

    assert!(result.errors.is_empty());
    assert!(result.kpis.investment_gross > Decimal::ZERO);
    assert!(result.kpis.investment_net >= Decimal::ZERO);
    assert!(result.kpis.total_tenant_rents > Decimal::ZERO);
    assert!(result.kpis.break_even_occupancy >= Decimal::ZERO);
    assert!(result.ensure_valid().is_ok());
}

#[test]
fn test_default_cash_flow_is_positive() {
    // Defaults describe a viable project: rents comfortably above charges
    let kpis = simulate(&SimulationInput::default()).kpis;
    assert!(kpis.cash_flow > Decimal::ZERO, "cash flow {}", kpis.cash_flow);
    assert_eq!(
        rate_cash_flow(kpis.cash_flow, kpis.total_tenant_rents),
        CashFlowRating::Green
    );
}

#[test]
fn test_oversized_pru_clamps_net_investment() {
    let mut input = SimulationInput::default();
    input.pru.amount = dec!(1000000);

    let result = simulate(&input);
    assert_eq!(result.kpis.investment_net, Decimal::ZERO);
    assert!(result.warnings.iter().any(|w| w.contains("clamped")));
}

#[test]
fn test_share_sum_violation_reports_error() {
    let mut input = SimulationInput::default();
    input.tenants.high.share_percent = dec!(10);

    let result = simulate(&input);
    assert!(!result.errors.is_empty());
    assert!(result.ensure_valid().is_err());
}

#[test]
fn test_simulate_pure_and_idempotent() {
    let input = SimulationInput::default();
    assert_eq!(simulate(&input), simulate(&input));

    // The engine never touches the input snapshot
    assert_eq!(input, SimulationInput::default());
}

// ===========================================================================
// Serde surface
// ===========================================================================

#[test]
fn test_result_serializes_with_findings() {
    let mut input = SimulationInput::default();
    input.tenants.low.occupancy_percent = dec!(30);

    let result = simulate(&input);
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("warnings"));
    assert!(json.contains("low"));

    let back: medsim_core::simulation::SimulationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);
}

#[test]
fn test_input_round_trips_through_json() {
    let input = SimulationInput::default();
    let json = serde_json::to_string(&input).unwrap();
    let back: SimulationInput = serde_json::from_str(&json).unwrap();
    assert_eq!(simulate(&input), simulate(&back));
}
