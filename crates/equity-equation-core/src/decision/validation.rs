use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::EquityEquationError;
use crate::types::{Money, Percent, ONE_HUNDRED};
use crate::EquityEquationResult;

pub const TOTAL_EQUITY_POOL: &str = "total_equity_pool";
pub const PROPOSED_EQUITY_ALLOC: &str = "proposed_equity_alloc";
pub const ESTIMATED_VALUATION_INCREASE: &str = "estimated_valuation_increase";
pub const PRE_MONEY_VALUATION: &str = "pre_money_valuation";

fn invalid(field: &str, value: impl ToString, reason: &str) -> EquityEquationError {
    let err = EquityEquationError::InvalidInput {
        field: field.into(),
        value: value.to_string(),
        reason: reason.into(),
    };
    tracing::warn!(field, error = %err, "input rejected");
    err
}

/// Valid interval for a field. Every field is exclusive at zero; only the
/// percentages of the company carry an upper bound.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    upper: Option<Decimal>,
    upper_inclusive: bool,
    reason: &'static str,
}

impl Bounds {
    fn for_field(field: &str) -> Bounds {
        match field {
            TOTAL_EQUITY_POOL => Bounds {
                upper: Some(ONE_HUNDRED),
                upper_inclusive: true,
                reason: "Total equity pool must be greater than 0 and at most 100 (range (0, 100])",
            },
            PROPOSED_EQUITY_ALLOC => Bounds {
                upper: Some(ONE_HUNDRED),
                upper_inclusive: false,
                reason: "Proposed equity allocation must be greater than 0 and less than 100 \
                         (range (0, 100))",
            },
            ESTIMATED_VALUATION_INCREASE => Bounds {
                upper: None,
                upper_inclusive: false,
                reason: "Estimated valuation increase must be greater than 0 (range (0, ∞))",
            },
            PRE_MONEY_VALUATION => Bounds {
                upper: None,
                upper_inclusive: false,
                reason: "Pre-money valuation must be greater than 0 (range (0, ∞))",
            },
            _ => Bounds {
                upper: None,
                upper_inclusive: false,
                reason: "Value must be greater than 0",
            },
        }
    }

    fn contains(&self, value: Decimal) -> bool {
        value > Decimal::ZERO
            && match self.upper {
                None => true,
                Some(upper) if self.upper_inclusive => value <= upper,
                Some(upper) => value < upper,
            }
    }

    fn contains_f64(&self, value: f64) -> bool {
        value > 0.0
            && match self.upper.and_then(|u| u.to_f64()) {
                None => true,
                Some(upper) if self.upper_inclusive => value <= upper,
                Some(upper) => value < upper,
            }
    }
}

fn check(field: &str, value: Decimal) -> EquityEquationResult<Decimal> {
    let bounds = Bounds::for_field(field);
    if !bounds.contains(value) {
        return Err(invalid(field, value, bounds.reason));
    }
    tracing::debug!(field, value = %value, "validated");
    Ok(value)
}

/// Convert a float to Decimal for `field`.
///
/// The range is checked on the float itself, so errors report the value
/// actually received. A float inside the range whose decimal form lands on
/// or past a bound (e.g. `1e-30` rounding to `0`) is rejected as not
/// representable rather than silently moved across the bound.
pub fn decimal_from_f64(field: &str, value: f64) -> EquityEquationResult<Decimal> {
    if !value.is_finite() {
        return Err(invalid(field, value, "Value is not a finite number"));
    }
    let bounds = Bounds::for_field(field);
    if !bounds.contains_f64(value) {
        return Err(invalid(field, value, bounds.reason));
    }
    [Decimal::from_f64(value), Decimal::from_f64_retain(value)]
        .into_iter()
        .flatten()
        .find(|d| bounds.contains(*d))
        .ok_or_else(|| {
            invalid(
                field,
                value,
                "Value is not representable at decimal precision inside the valid range",
            )
        })
}

/// Parse user-supplied text (plain or scientific notation) into a Decimal.
pub fn parse_decimal(field: &str, raw: &str) -> EquityEquationResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, "<empty>", "A numeric value is required"));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| {
            let numeric = trimmed.parse::<f64>().is_ok_and(|v| !v.is_nan())
                && trimmed.bytes().any(|b| b.is_ascii_digit());
            if numeric {
                invalid(
                    field,
                    trimmed,
                    "Value is outside the representable decimal range",
                )
            } else {
                invalid(field, trimmed, "Value is not numeric")
            }
        })
}

/// Total equity pool must lie in (0, 100].
pub fn validate_total_equity_pool(value: Percent) -> EquityEquationResult<Percent> {
    check(TOTAL_EQUITY_POOL, value)
}

/// Proposed allocation must lie in (0, 100). 100 would make the decision
/// ratio divide by zero.
pub fn validate_proposed_equity_alloc(value: Percent) -> EquityEquationResult<Percent> {
    check(PROPOSED_EQUITY_ALLOC, value)
}

pub fn validate_estimated_valuation_increase(value: Percent) -> EquityEquationResult<Percent> {
    check(ESTIMATED_VALUATION_INCREASE, value)
}

pub fn validate_pre_money_valuation(value: Money) -> EquityEquationResult<Money> {
    check(PRE_MONEY_VALUATION, value)
}
