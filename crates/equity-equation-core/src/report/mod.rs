//! Labelled layout of an evaluated allocation, independent of any output
//! medium. Renderers decide how to draw it; they must not reinterpret the
//! verdict.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decision::{Decision, DecisionResult};

pub const REPORT_TITLE: &str = "Investor Equity Equation";

pub const REPORT_HEADERS: [&str; 3] = [
    "Investor Equity Calculation Parameters",
    "Investor Equity Calculation Values",
    "Accept?",
];

pub const ACCEPT_COLOR: &str = "008000";
pub const REJECT_COLOR: &str = "FF0000";

/// One labelled value in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub decision: Decision,
}

impl Report {
    /// Hex RGB fill suggested for the verdict cell.
    pub fn verdict_color(&self) -> &'static str {
        verdict_color(self.decision)
    }

    /// Rows as text records, the verdict placed in the third column of the
    /// first row. Header row first.
    pub fn to_records(&self) -> Vec<[String; 3]> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(self.headers_array());
        for (i, row) in self.rows.iter().enumerate() {
            let verdict = if i == 0 {
                self.decision.to_string()
            } else {
                String::new()
            };
            records.push([row.label.clone(), row.value.to_string(), verdict]);
        }
        records
    }

    fn headers_array(&self) -> [String; 3] {
        let mut out: [String; 3] = Default::default();
        for (slot, h) in out.iter_mut().zip(self.headers.iter()) {
            *slot = h.clone();
        }
        out
    }
}

pub fn verdict_color(decision: Decision) -> &'static str {
    match decision {
        Decision::Accept => ACCEPT_COLOR,
        Decision::Reject => REJECT_COLOR,
    }
}

/// Lay out a decision result in worksheet order.
pub fn build_report(result: &DecisionResult) -> Report {
    let row = |label: &str, value: Decimal| ReportRow {
        label: label.into(),
        value,
    };

    Report {
        title: REPORT_TITLE.into(),
        headers: REPORT_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: vec![
            row("Total Equity Pool", result.total_equity_pool),
            row(
                "Proposed Equity Allocation to Investor",
                result.proposed_equity_alloc,
            ),
            row(
                "Remaining Equity Pool After Investment",
                result.available_equity_pool_after_investment,
            ),
            row(
                "Estimated Valuation Increase as a Result of Investment",
                result.estimated_valuation_increase,
            ),
            row(
                "Percentage Increase in Company Value Required to Justify Investment",
                result.required_return_percentage,
            ),
            row("Premoney Valuation", result.pre_money_valuation),
            row(
                "Estimated Increase/Decrease in Company Value After Investment \
                 (not including new money in)",
                result.estimated_company_value_after_investment,
            ),
        ],
        decision: result.decision,
    }
}
