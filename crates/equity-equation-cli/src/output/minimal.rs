use serde_json::Value;
use std::io::{self, Write};

use super::{format_value, result_object};

/// Print just the verdict, falling back to the first result field.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result = result_object(value);

    if let Value::Object(map) = result {
        if let Some(decision) = map.get("decision").filter(|v| !v.is_null()) {
            return writeln!(out, "{}", format_value(decision));
        }
        if let Some((key, val)) = map.iter().next() {
            return writeln!(out, "{}: {}", key, format_value(val));
        }
    }

    writeln!(out, "{}", format_value(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prints_decision_only() {
        let value = serde_json::json!({
            "result": { "total_equity_pool": "100", "decision": "Reject" },
            "warnings": []
        });
        let mut buf = Vec::new();
        write_minimal(&mut buf, &value).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Reject\n");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let value = serde_json::json!({ "result": { "alpha": 1 } });
        let mut buf = Vec::new();
        write_minimal(&mut buf, &value).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "alpha: 1\n");
    }
}
