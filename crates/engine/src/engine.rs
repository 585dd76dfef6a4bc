use crate::aggregate::aggregate_rows;
use crate::column_scan::scan_columns;
use crate::config::{CatalogColumns, RunConfig};
use crate::error::EngineError;
use crate::matcher::{match_label, CleanedCatalog};
use crate::model::{MatchReport, MatchSummary, MatchType, RawTable, ReferenceEntry, ReportMeta};
use crate::vocab::ManufacturerVocabulary;

/// Run the full pipeline: aggregate inventory rows, clean and match every
/// distinct label against the catalog, classify, summarize.
///
/// The catalog is read-only for the run; an empty catalog is a valid
/// steady state that classifies everything as `none` (callers surface the
/// warning). Results come back sorted by descending count, ties in
/// first-seen row order.
pub fn run(
    config: &RunConfig,
    catalog: &[ReferenceEntry],
    table: &RawTable,
) -> Result<MatchReport, EngineError> {
    let model_idx = resolve_column(&table.headers, &config.columns.model)?;
    let count_idx = config
        .columns
        .count
        .as_deref()
        .map(|name| resolve_column(&table.headers, name))
        .transpose()?;

    let vocab = ManufacturerVocabulary::build(catalog);
    let cleaned_catalog = CleanedCatalog::build(catalog, &vocab);

    let aggregated = aggregate_rows(table, model_idx, count_idx)?;

    let mut results: Vec<_> = aggregated
        .iter()
        .map(|m| match_label(&m.raw_label, m.count, &vocab, &cleaned_catalog, &config.thresholds))
        .collect();
    results.sort_by(|a, b| b.count.total_cmp(&a.count));

    let mut summary = MatchSummary {
        total_models: results.len(),
        total_devices: 0.0,
        exact: 0,
        potential: 0,
        none: 0,
    };
    for r in &results {
        summary.total_devices += r.count;
        match r.match_type {
            MatchType::Exact => summary.exact += 1,
            MatchType::Potential => summary.potential += 1,
            MatchType::None => summary.none += 1,
        }
    }

    Ok(MatchReport {
        meta: ReportMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            catalog_size: catalog.len(),
        },
        summary,
        column_warnings: scan_columns(table),
        results,
    })
}

fn resolve_column(headers: &[String], name: &str) -> Result<usize, EngineError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| EngineError::MissingColumn {
            column: name.to_string(),
        })
}

/// Load catalog CSV into reference entries, applying the column mapping.
///
/// This is the reference external loader: records whose model cell is
/// empty are filtered out here, upholding the engine's non-empty
/// `model_name` contract.
pub fn load_catalog_csv(
    csv_data: &str,
    columns: &CatalogColumns,
) -> Result<Vec<ReferenceEntry>, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let manufacturer_idx = resolve_column(&headers, &columns.manufacturer)?;
    let model_idx = resolve_column(&headers, &columns.model)?;
    let firmware_idx = columns
        .firmware
        .as_deref()
        .map(|name| resolve_column(&headers, name))
        .transpose()?;
    let notes_idx = columns
        .notes
        .as_deref()
        .map(|name| resolve_column(&headers, name))
        .transpose()?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EngineError::Csv(e.to_string()))?;
        let model_name = record.get(model_idx).unwrap_or("").trim();
        if model_name.is_empty() {
            continue;
        }
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };
        entries.push(ReferenceEntry {
            manufacturer: field(Some(manufacturer_idx)),
            model_name: model_name.to_string(),
            minimum_firmware: field(firmware_idx),
            notes: field(notes_idx),
        });
    }

    Ok(entries)
}

/// Load an inventory CSV into a header-aligned table. Ragged rows are
/// kept as-is; missing cells read as absent downstream.
pub fn load_table_csv(csv_data: &str) -> Result<RawTable, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EngineError::Csv(e.to_string()))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}
