use napi::Result as NapiResult;
use napi_derive::napi;

use equity_equation_core::decision::{self, EquityDecisionInput};
use equity_equation_core::report;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Evaluate an allocation; returns the JSON computation envelope.
#[napi]
pub fn evaluate_equity_decision(input_json: String) -> NapiResult<String> {
    let input = EquityDecisionInput::from_json_str(&input_json).map_err(to_napi_error)?;
    let output = decision::evaluate_equity_decision(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Evaluate an allocation and return the labelled report layout, including
/// the suggested verdict colour.
#[napi]
pub fn build_equity_report(input_json: String) -> NapiResult<String> {
    let input = EquityDecisionInput::from_json_str(&input_json).map_err(to_napi_error)?;
    let output = decision::evaluate_equity_decision(&input).map_err(to_napi_error)?;
    let layout = report::build_report(&output.result);
    let verdict_color = layout.verdict_color();
    let value = serde_json::json!({
        "report": layout,
        "verdict_color": verdict_color,
        "warnings": output.warnings,
    });
    serde_json::to_string(&value).map_err(to_napi_error)
}
