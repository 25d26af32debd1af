use std::io::{self, BufRead, Write};

use equity_equation_core::decision::validation::{
    self, ESTIMATED_VALUATION_INCREASE, PRE_MONEY_VALUATION, PROPOSED_EQUITY_ALLOC,
    TOTAL_EQUITY_POOL,
};
use equity_equation_core::decision::EquityDecisionInput;
use rust_decimal::Decimal;

const PROMPTS: [(&str, &str); 4] = [
    (
        TOTAL_EQUITY_POOL,
        "Total equity pool as a percentage (greater than 0, at most 100)",
    ),
    (
        PROPOSED_EQUITY_ALLOC,
        "Equity percentage offered to the investor in return for the investment \
         (greater than 0, less than 100)",
    ),
    (
        ESTIMATED_VALUATION_INCREASE,
        "Expected percentage increase in company valuation as a result of the investment",
    ),
    (
        PRE_MONEY_VALUATION,
        "Company valuation before the investment (pre-money valuation)",
    ),
];

/// Ask for the four inputs on the terminal. Prompts go to stderr so stdout
/// carries only the result.
pub fn prompt_terminal() -> Result<EquityDecisionInput, Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stderr();
    prompt_for_input(&mut reader, &mut writer)
}

/// Read one answer per prompt. The first malformed answer aborts with an
/// `InvalidInput` error naming the field.
pub fn prompt_for_input<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<EquityDecisionInput, Box<dyn std::error::Error>> {
    let mut answers: Vec<Decimal> = Vec::with_capacity(PROMPTS.len());

    for (field, question) in PROMPTS {
        write!(writer, "{} [{}]: ", question, field)?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(format!("Input ended before a value for {} was given", field).into());
        }
        answers.push(validation::parse_decimal(field, &line)?);
    }

    Ok(EquityDecisionInput {
        total_equity_pool: answers[0],
        proposed_equity_alloc: answers[1],
        estimated_valuation_increase: answers[2],
        pre_money_valuation: answers[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reads_four_answers() {
        let mut reader = "100\n7\n7.5\n20000000\n".as_bytes();
        let mut prompts = Vec::new();
        let input = prompt_for_input(&mut reader, &mut prompts).unwrap();

        assert_eq!(input.total_equity_pool, dec!(100));
        assert_eq!(input.proposed_equity_alloc, dec!(7));
        assert_eq!(input.estimated_valuation_increase, dec!(7.5));
        assert_eq!(input.pre_money_valuation, dec!(20_000_000));

        let shown = String::from_utf8(prompts).unwrap();
        assert!(shown.contains("[total_equity_pool]"));
        assert!(shown.contains("[pre_money_valuation]"));
    }

    #[test]
    fn test_non_numeric_answer_names_field() {
        let mut reader = "100\nseven\n".as_bytes();
        let err = prompt_for_input(&mut reader, &mut io::sink()).unwrap_err();
        assert!(err.to_string().contains("proposed_equity_alloc"), "{err}");
    }

    #[test]
    fn test_truncated_input() {
        let mut reader = "100\n7\n".as_bytes();
        let err = prompt_for_input(&mut reader, &mut io::sink()).unwrap_err();
        assert!(err.to_string().contains("estimated_valuation_increase"), "{err}");
    }
}
