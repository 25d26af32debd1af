use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::decision::validation::{
    self, ESTIMATED_VALUATION_INCREASE, PRE_MONEY_VALUATION, PROPOSED_EQUITY_ALLOC,
    TOTAL_EQUITY_POOL,
};
use crate::error::EquityEquationError;
use crate::types::{percent_to_rate, Money, Percent, ONE_HUNDRED};
use crate::EquityEquationResult;

/// Decimal places used when presenting the required return.
pub const REQUIRED_RETURN_DP: u32 = 2;

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Verdict on a proposed equity allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn is_accept(self) -> bool {
        matches!(self, Decision::Accept)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accept => write!(f, "Accept"),
            Decision::Reject => write!(f, "Reject"),
        }
    }
}

// ─── Structs ─────────────────────────────────────────────────────────────────

/// Raw, unvalidated inputs as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityDecisionInput {
    /// Total equity pool, in percent (e.g. 100).
    pub total_equity_pool: Percent,
    /// Equity offered to the investor, in percent (e.g. 7).
    pub proposed_equity_alloc: Percent,
    /// Expected uplift in company value from the investment, in percent (e.g. 7.5).
    pub estimated_valuation_increase: Percent,
    /// Company valuation before the investment (e.g. 20,000,000).
    pub pre_money_valuation: Money,
}

impl EquityDecisionInput {
    /// Build an input record from a JSON object, reporting missing or
    /// non-numeric fields as `InvalidInput` against the field name.
    pub fn from_value(value: &Value) -> EquityEquationResult<Self> {
        let map = value.as_object().ok_or_else(|| EquityEquationError::InvalidInput {
            field: "input".into(),
            value: value.to_string(),
            reason: "Expected an object with the four equity decision fields".into(),
        })?;

        let field = |name: &str| -> EquityEquationResult<Decimal> {
            match map.get(name) {
                Some(Value::Number(n)) => validation::parse_decimal(name, &n.to_string()),
                Some(Value::String(s)) => validation::parse_decimal(name, s),
                Some(other) => Err(EquityEquationError::InvalidInput {
                    field: name.into(),
                    value: other.to_string(),
                    reason: "Value is not numeric".into(),
                }),
                None => Err(EquityEquationError::InvalidInput {
                    field: name.into(),
                    value: "<missing>".into(),
                    reason: "A numeric value is required".into(),
                }),
            }
        };

        Ok(EquityDecisionInput {
            total_equity_pool: field(TOTAL_EQUITY_POOL)?,
            proposed_equity_alloc: field(PROPOSED_EQUITY_ALLOC)?,
            estimated_valuation_increase: field(ESTIMATED_VALUATION_INCREASE)?,
            pre_money_valuation: field(PRE_MONEY_VALUATION)?,
        })
    }

    pub fn from_json_str(json: &str) -> EquityEquationResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }
}

/// A validated investor equity allocation.
///
/// Fields are private and only set through validation, so an instance is
/// always within range. Use the `with_*` methods to derive a modified model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EquityDecisionInput")]
pub struct EquityDecisionModel {
    total_equity_pool: Percent,
    proposed_equity_alloc: Percent,
    estimated_valuation_increase: Percent,
    pre_money_valuation: Money,
    available_equity_pool_after_investment: Percent,
}

/// Everything a report renderer needs from one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub total_equity_pool: Percent,
    pub proposed_equity_alloc: Percent,
    /// May be negative when the allocation exceeds the pool.
    pub available_equity_pool_after_investment: Percent,
    pub estimated_valuation_increase: Percent,
    pub pre_money_valuation: Money,
    /// Rounded to two decimal places.
    pub required_return_percentage: Percent,
    pub estimated_company_value_after_investment: Money,
    pub decision: Decision,
}

// ─── Model ───────────────────────────────────────────────────────────────────

impl EquityDecisionModel {
    pub fn new(
        total_equity_pool: Percent,
        proposed_equity_alloc: Percent,
        estimated_valuation_increase: Percent,
        pre_money_valuation: Money,
    ) -> EquityEquationResult<Self> {
        let total_equity_pool = validation::validate_total_equity_pool(total_equity_pool)?;
        let proposed_equity_alloc =
            validation::validate_proposed_equity_alloc(proposed_equity_alloc)?;
        let estimated_valuation_increase =
            validation::validate_estimated_valuation_increase(estimated_valuation_increase)?;
        let pre_money_valuation = validation::validate_pre_money_valuation(pre_money_valuation)?;

        let available_equity_pool_after_investment = total_equity_pool - proposed_equity_alloc;

        Ok(EquityDecisionModel {
            total_equity_pool,
            proposed_equity_alloc,
            estimated_valuation_increase,
            pre_money_valuation,
            available_equity_pool_after_investment,
        })
    }

    /// Construct from floating-point inputs. NaN and infinities are rejected
    /// as non-numeric; range errors carry the float as received.
    pub fn from_f64(
        total_equity_pool: f64,
        proposed_equity_alloc: f64,
        estimated_valuation_increase: f64,
        pre_money_valuation: f64,
    ) -> EquityEquationResult<Self> {
        Self::new(
            validation::decimal_from_f64(TOTAL_EQUITY_POOL, total_equity_pool)?,
            validation::decimal_from_f64(PROPOSED_EQUITY_ALLOC, proposed_equity_alloc)?,
            validation::decimal_from_f64(
                ESTIMATED_VALUATION_INCREASE,
                estimated_valuation_increase,
            )?,
            validation::decimal_from_f64(PRE_MONEY_VALUATION, pre_money_valuation)?,
        )
    }

    pub fn from_input(input: &EquityDecisionInput) -> EquityEquationResult<Self> {
        Self::new(
            input.total_equity_pool,
            input.proposed_equity_alloc,
            input.estimated_valuation_increase,
            input.pre_money_valuation,
        )
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn total_equity_pool(&self) -> Percent {
        self.total_equity_pool
    }

    pub fn proposed_equity_alloc(&self) -> Percent {
        self.proposed_equity_alloc
    }

    pub fn estimated_valuation_increase(&self) -> Percent {
        self.estimated_valuation_increase
    }

    pub fn pre_money_valuation(&self) -> Money {
        self.pre_money_valuation
    }

    pub fn available_equity_pool_after_investment(&self) -> Percent {
        self.available_equity_pool_after_investment
    }

    pub fn to_input(&self) -> EquityDecisionInput {
        EquityDecisionInput {
            total_equity_pool: self.total_equity_pool,
            proposed_equity_alloc: self.proposed_equity_alloc,
            estimated_valuation_increase: self.estimated_valuation_increase,
            pre_money_valuation: self.pre_money_valuation,
        }
    }

    // ── Rebuilds ─────────────────────────────────────────────────────

    pub fn with_total_equity_pool(&self, value: Percent) -> EquityEquationResult<Self> {
        Self::from_input(&EquityDecisionInput {
            total_equity_pool: value,
            ..self.to_input()
        })
    }

    pub fn with_proposed_equity_alloc(&self, value: Percent) -> EquityEquationResult<Self> {
        Self::from_input(&EquityDecisionInput {
            proposed_equity_alloc: value,
            ..self.to_input()
        })
    }

    pub fn with_estimated_valuation_increase(&self, value: Percent) -> EquityEquationResult<Self> {
        Self::from_input(&EquityDecisionInput {
            estimated_valuation_increase: value,
            ..self.to_input()
        })
    }

    pub fn with_pre_money_valuation(&self, value: Money) -> EquityEquationResult<Self> {
        Self::from_input(&EquityDecisionInput {
            pre_money_valuation: value,
            ..self.to_input()
        })
    }

    // ── Computations ─────────────────────────────────────────────────

    /// Value multiple existing holders need to break even after ceding the
    /// allocation: `1 / (1 - f)` with `f` the allocation as a fraction.
    pub fn compute_decision_ratio(&self) -> EquityEquationResult<Decimal> {
        let fraction = percent_to_rate(self.proposed_equity_alloc);
        let retained = Decimal::ONE - fraction;
        if retained.is_zero() {
            return Err(EquityEquationError::DivisionByZero {
                context: "decision ratio: proposed equity allocation cannot be 100%".into(),
            });
        }
        let ratio = Decimal::ONE
            .checked_div(retained)
            .ok_or_else(|| EquityEquationError::ArithmeticOverflow {
                context: "decision ratio".into(),
            })?;
        tracing::info!(decision_ratio = %ratio, "required investor value computed");
        Ok(ratio)
    }

    /// Minimum company value increase, in percent, that justifies the
    /// allocation. Unrounded.
    ///
    /// Allocations within roughly 1e-26 of 100 (e.g.
    /// `99.99999999999999999999999999`) push the result past the 96-bit
    /// decimal range and return `ArithmeticOverflow`.
    pub fn compute_required_return(&self) -> EquityEquationResult<Percent> {
        let ratio = self.compute_decision_ratio()?;
        (ratio - Decimal::ONE)
            .checked_mul(ONE_HUNDRED)
            .ok_or_else(|| EquityEquationError::ArithmeticOverflow {
                context: "required return percentage".into(),
            })
    }

    /// Company value after applying the estimated uplift to the pre-money
    /// valuation. Excludes the new money itself.
    pub fn compute_estimated_company_value(&self) -> EquityEquationResult<Money> {
        let growth = Decimal::ONE + percent_to_rate(self.estimated_valuation_increase);
        let value = self
            .pre_money_valuation
            .checked_mul(growth)
            .ok_or_else(|| EquityEquationError::ArithmeticOverflow {
                context: "estimated company value after investment".into(),
            })?;
        tracing::info!(estimated_company_value = %value, "estimated company value computed");
        Ok(value)
    }

    /// Accept when the required return, in percent, is at least the equity
    /// percentage being ceded.
    pub fn decide(&self) -> EquityEquationResult<Decision> {
        Ok(self.decide_from(self.compute_required_return()?))
    }

    fn decide_from(&self, required: Percent) -> Decision {
        let decision = if required >= self.proposed_equity_alloc {
            Decision::Accept
        } else {
            Decision::Reject
        };
        tracing::info!(%decision, required_return = %required, "decision made");
        decision
    }

    pub fn evaluate(&self) -> EquityEquationResult<DecisionResult> {
        self.evaluate_unrounded().map(|(result, _)| result)
    }

    /// `evaluate` plus the unrounded required return it was decided on.
    pub(crate) fn evaluate_unrounded(&self) -> EquityEquationResult<(DecisionResult, Percent)> {
        let required = self.compute_required_return()?;
        let estimated_company_value_after_investment = self.compute_estimated_company_value()?;
        let decision = self.decide_from(required);

        let result = DecisionResult {
            total_equity_pool: self.total_equity_pool,
            proposed_equity_alloc: self.proposed_equity_alloc,
            available_equity_pool_after_investment: self.available_equity_pool_after_investment,
            estimated_valuation_increase: self.estimated_valuation_increase,
            pre_money_valuation: self.pre_money_valuation,
            required_return_percentage: required.round_dp(REQUIRED_RETURN_DP),
            estimated_company_value_after_investment,
            decision,
        };
        Ok((result, required))
    }
}

impl TryFrom<EquityDecisionInput> for EquityDecisionModel {
    type Error = EquityEquationError;

    fn try_from(input: EquityDecisionInput) -> Result<Self, Self::Error> {
        Self::from_input(&input)
    }
}
