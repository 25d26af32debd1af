use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::PathBuf;

use equity_equation_core::decision::validation::{
    self, ESTIMATED_VALUATION_INCREASE, PRE_MONEY_VALUATION, PROPOSED_EQUITY_ALLOC,
    TOTAL_EQUITY_POOL,
};
use equity_equation_core::decision::{self, EquityDecisionInput};
use equity_equation_core::report::build_report;

use crate::input;
use crate::report;

/// Arguments for evaluating an investor equity allocation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EvaluateArgs {
    /// Total equity pool in percent (e.g. 100)
    #[arg(long)]
    pub total_equity_pool: Option<String>,

    /// Equity offered to the investor in percent (e.g. 7)
    #[arg(long)]
    pub proposed_equity_alloc: Option<String>,

    /// Expected increase in company valuation in percent (e.g. 7.5)
    #[arg(long)]
    pub estimated_valuation_increase: Option<String>,

    /// Company valuation before the investment (e.g. 20000000)
    #[arg(long)]
    pub pre_money_valuation: Option<String>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Prompt for each value on the terminal
    #[arg(short, long)]
    pub interactive: bool,

    /// Also write the report as CSV to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let eq_input = resolve_input(&args)?;
    let result = decision::evaluate_equity_decision(&eq_input)?;

    if let Some(ref path) = args.report {
        report::write_csv_report(path, &build_report(&result.result))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(serde_json::to_value(result)?)
}

fn resolve_input(args: &EvaluateArgs) -> Result<EquityDecisionInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        let value = input::file::read_input_value(path)?;
        return Ok(EquityDecisionInput::from_value(&value)?);
    }
    if args.interactive {
        return input::prompt::prompt_terminal();
    }
    if let Some(value) = input::stdin::read_stdin()? {
        return Ok(EquityDecisionInput::from_value(&value)?);
    }
    from_flags(args)
}

fn from_flags(args: &EvaluateArgs) -> Result<EquityDecisionInput, Box<dyn std::error::Error>> {
    let flag = |value: &Option<String>,
                field: &str,
                name: &str|
     -> Result<Decimal, Box<dyn std::error::Error>> {
        let raw = value
            .as_deref()
            .ok_or_else(|| format!("{} is required (or provide --input / --interactive)", name))?;
        Ok(validation::parse_decimal(field, raw)?)
    };

    Ok(EquityDecisionInput {
        total_equity_pool: flag(
            &args.total_equity_pool,
            TOTAL_EQUITY_POOL,
            "--total-equity-pool",
        )?,
        proposed_equity_alloc: flag(
            &args.proposed_equity_alloc,
            PROPOSED_EQUITY_ALLOC,
            "--proposed-equity-alloc",
        )?,
        estimated_valuation_increase: flag(
            &args.estimated_valuation_increase,
            ESTIMATED_VALUATION_INCREASE,
            "--estimated-valuation-increase",
        )?,
        pre_money_valuation: flag(
            &args.pre_money_valuation,
            PRE_MONEY_VALUATION,
            "--pre-money-valuation",
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flag_args() -> EvaluateArgs {
        EvaluateArgs {
            total_equity_pool: Some("100".into()),
            proposed_equity_alloc: Some("50".into()),
            estimated_valuation_increase: Some("30".into()),
            pre_money_valuation: Some("5000000".into()),
            input: None,
            interactive: false,
            report: None,
        }
    }

    #[test]
    fn test_from_flags() {
        let input = from_flags(&flag_args()).unwrap();
        assert_eq!(input.proposed_equity_alloc, dec!(50));
        assert_eq!(input.pre_money_valuation, dec!(5_000_000));
    }

    #[test]
    fn test_missing_flag_is_reported() {
        let mut args = flag_args();
        args.pre_money_valuation = None;
        let err = from_flags(&args).unwrap_err();
        assert!(err.to_string().contains("--pre-money-valuation"), "{err}");
    }

    #[test]
    fn test_non_numeric_flag_names_field() {
        let mut args = flag_args();
        args.total_equity_pool = Some("lots".into());
        let err = from_flags(&args).unwrap_err();
        assert!(err.to_string().contains("total_equity_pool"), "{err}");
    }

    #[test]
    fn test_input_file_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("deal.json");
        std::fs::write(
            &input_path,
            r#"{"total_equity_pool": 100, "proposed_equity_alloc": 10,
                "estimated_valuation_increase": 20, "pre_money_valuation": 10000000}"#,
        )
        .unwrap();
        let report_path = dir.path().join("equity_equation.csv");

        let args = EvaluateArgs {
            input: Some(input_path.to_str().unwrap().to_string()),
            report: Some(report_path.clone()),
            ..flag_args()
        };
        let value = run_evaluate(args).unwrap();

        assert_eq!(value["result"]["decision"], "Accept");
        assert_eq!(value["result"]["required_return_percentage"], "11.11");
        let written = std::fs::read_to_string(report_path).unwrap();
        assert!(written.contains("Total Equity Pool,100,Accept"), "{written}");
    }

    #[test]
    fn test_out_of_range_file_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("deal.json");
        std::fs::write(
            &input_path,
            r#"{"total_equity_pool": 100, "proposed_equity_alloc": 100,
                "estimated_valuation_increase": 20, "pre_money_valuation": 10000000}"#,
        )
        .unwrap();
        let args = EvaluateArgs {
            input: Some(input_path.to_str().unwrap().to_string()),
            ..flag_args()
        };
        let err = run_evaluate(args).unwrap_err();
        assert!(err.to_string().contains("proposed_equity_alloc"), "{err}");
    }
}
