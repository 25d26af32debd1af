use rust_decimal::Decimal;
use std::time::Instant;

use crate::decision::model::{DecisionResult, EquityDecisionInput, EquityDecisionModel};
use crate::types::{with_metadata, ComputationOutput};
use crate::EquityEquationResult;

/// Validate the inputs, evaluate the allocation and wrap the result in the
/// standard computation envelope.
///
/// Warnings never change the verdict. They flag a negative remaining pool
/// and an estimated uplift that falls short of the required return.
pub fn evaluate_equity_decision(
    input: &EquityDecisionInput,
) -> EquityEquationResult<ComputationOutput<DecisionResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let model = EquityDecisionModel::from_input(input)?;
    let (result, required) = model.evaluate_unrounded()?;

    if result.available_equity_pool_after_investment < Decimal::ZERO {
        warnings.push(format!(
            "Proposed equity allocation ({}%) exceeds the total equity pool ({}%); \
             remaining pool is {}%",
            result.proposed_equity_alloc,
            result.total_equity_pool,
            result.available_equity_pool_after_investment
        ));
    }
    if result.estimated_valuation_increase < required {
        warnings.push(format!(
            "Estimated valuation increase ({}%) is below the {}% increase required to offset dilution",
            result.estimated_valuation_increase, result.required_return_percentage
        ));
    }
    for w in &warnings {
        tracing::warn!("{}", w);
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Investor Equity Equation (required return = 1 / (1 - allocation) - 1)",
        &serde_json::json!({
            "total_equity_pool": input.total_equity_pool.to_string(),
            "proposed_equity_alloc": input.proposed_equity_alloc.to_string(),
            "estimated_valuation_increase": input.estimated_valuation_increase.to_string(),
            "pre_money_valuation": input.pre_money_valuation.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::model::Decision;
    use crate::error::EquityEquationError;
    use rust_decimal_macros::dec;

    fn input(pool: Decimal, alloc: Decimal) -> EquityDecisionInput {
        EquityDecisionInput {
            total_equity_pool: pool,
            proposed_equity_alloc: alloc,
            estimated_valuation_increase: dec!(20),
            pre_money_valuation: dec!(10_000_000),
        }
    }

    #[test]
    fn test_envelope_carries_result_and_assumptions() {
        let out = evaluate_equity_decision(&input(dec!(100), dec!(10))).unwrap();
        assert_eq!(out.result.decision, Decision::Accept);
        assert_eq!(out.result.required_return_percentage, dec!(11.11));
        assert_eq!(out.assumptions["proposed_equity_alloc"], "10");
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert!(out.methodology.contains("Equity Equation"));
    }

    #[test]
    fn test_negative_remaining_pool_warns() {
        let out = evaluate_equity_decision(&input(dec!(20), dec!(10.5))).unwrap();
        assert!(out.warnings.is_empty());

        let out = evaluate_equity_decision(&input(dec!(5), dec!(10))).unwrap();
        assert_eq!(out.result.available_equity_pool_after_investment, dec!(-5));
        assert!(out.warnings.iter().any(|w| w.contains("exceeds the total equity pool")));
    }

    #[test]
    fn test_uplift_below_required_return_warns_without_changing_verdict() {
        let out = evaluate_equity_decision(&input(dec!(100), dec!(50))).unwrap();
        assert_eq!(out.result.required_return_percentage, dec!(100));
        assert_eq!(out.result.decision, Decision::Accept);
        assert!(out.warnings.iter().any(|w| w.contains("below the 100")));
    }

    #[test]
    fn test_uplift_warning_compares_unrounded_required_return() {
        // Required return is 11.111..., reported as 11.11.
        let mut inp = input(dec!(100), dec!(10));
        inp.estimated_valuation_increase = dec!(11.111);
        let out = evaluate_equity_decision(&inp).unwrap();
        assert_eq!(out.result.required_return_percentage, dec!(11.11));
        assert!(out.warnings.iter().any(|w| w.contains("below the 11.11")));

        inp.estimated_valuation_increase = dec!(11.112);
        let out = evaluate_equity_decision(&inp).unwrap();
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    }

    #[test]
    fn test_invalid_input_propagates() {
        let err = evaluate_equity_decision(&input(dec!(100), dec!(100))).unwrap_err();
        assert!(matches!(err, EquityEquationError::InvalidInput { .. }));
    }
}
