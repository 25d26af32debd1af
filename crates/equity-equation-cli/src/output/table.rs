use colored::Colorize;
use serde_json::Value;
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

use equity_equation_core::decision::Decision;
use equity_equation_core::report::verdict_color;

use super::{format_value, result_object};

/// Field/value table of the result, then warnings, methodology and the
/// verdict in its report colour.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result = result_object(value);

    match result {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                builder.push_record([key.as_str(), &format_value(val)]);
            }
            writeln!(out, "{}", Table::from(builder))?;
        }
        other => writeln!(out, "{}", format_value(other))?,
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings.iter().filter_map(Value::as_str) {
                writeln!(out, "  - {}", w)?;
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        writeln!(out, "\nMethodology: {}", meth)?;
    }

    if let Some(decision) = result
        .get("decision")
        .and_then(|d| serde_json::from_value::<Decision>(d.clone()).ok())
    {
        let (r, g, b) = hex_to_rgb(verdict_color(decision));
        writeln!(
            out,
            "\nDecision: {}",
            decision.to_string().truecolor(r, g, b).bold()
        )?;
    }

    Ok(())
}

fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    (channel(0), channel(2), channel(4))
}
