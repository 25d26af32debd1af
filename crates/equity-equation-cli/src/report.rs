use std::fs::File;
use std::io::Write;
use std::path::Path;

use equity_equation_core::report::Report;

/// Write the report as CSV to a caller-supplied path, creating or truncating it.
pub fn write_csv_report(path: &Path, report: &Report) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create report '{}': {}", path.display(), e))?;
    write_csv(file, report)
}

pub fn write_csv<W: Write>(writer: W, report: &Report) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in report.to_records() {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
