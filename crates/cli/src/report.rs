//! Report CSV rendering for external export collaborators.

use std::io;

use camcheck_engine::model::MatchReport;

/// Write the report as a CSV table: original model, count, match type,
/// matched reference model, compatibility type, minimum firmware, notes.
pub fn write_report_csv<W: io::Write>(report: &MatchReport, writer: W) -> Result<(), String> {
    let mut w = csv::Writer::from_writer(writer);

    w.write_record([
        "Original Model",
        "Count",
        "Match Type",
        "Matched Reference Model",
        "Compatibility Type",
        "Minimum Firmware",
        "Notes",
    ])
    .map_err(|e| e.to_string())?;

    for r in &report.results {
        let firmware = r
            .reference
            .as_ref()
            .map(|e| e.minimum_firmware.as_str())
            .unwrap_or("");
        let notes = r.reference.as_ref().map(|e| e.notes.as_str()).unwrap_or("");
        let count = format_count(r.count);
        let match_type = r.match_type.to_string();
        let compatibility = r.compatibility.map(|c| c.to_string()).unwrap_or_default();
        w.write_record([
            r.model.as_str(),
            count.as_str(),
            match_type.as_str(),
            r.matched_with.as_deref().unwrap_or(""),
            compatibility.as_str(),
            firmware,
            notes,
        ])
        .map_err(|e| e.to_string())?;
    }

    w.flush().map_err(|e| e.to_string())
}

/// Whole counts print without a trailing `.0`.
pub fn format_count(count: f64) -> String {
    if count.fract() == 0.0 && count.abs() < i64::MAX as f64 {
        format!("{}", count as i64)
    } else {
        format!("{count}")
    }
}
