use serde_json::Value;
use std::io::{self, Write};

use super::{format_value, result_object};

/// Two-column `field,value` CSV of the result object.
pub fn write_csv<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["field", "value"])?;

    match result_object(value) {
        Value::Object(map) => {
            for (key, val) in map {
                wtr.write_record([key.as_str(), &format_value(val)])?;
            }
        }
        other => {
            wtr.write_record(["value", &format_value(other)])?;
        }
    }

    wtr.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_rows() {
        let value = serde_json::json!({
            "result": { "decision": "Accept", "required_return_percentage": "11.11" }
        });
        let mut buf = Vec::new();
        write_csv(&mut buf, &value).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("field,value\n"));
        assert!(text.contains("decision,Accept\n"));
        assert!(text.contains("required_return_percentage,11.11\n"));
    }
}
