pub mod evaluation;
pub mod model;
pub mod validation;

pub use evaluation::evaluate_equity_decision;
pub use model::{Decision, DecisionResult, EquityDecisionInput, EquityDecisionModel};
