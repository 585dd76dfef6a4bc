use std::collections::HashMap;

use crate::error::EngineError;
use crate::model::{AggregatedModel, RawTable};

/// Group rows by the exact (case-sensitive, untrimmed) model-cell string.
///
/// Rows with an empty or missing model cell are skipped. With a count
/// column selected, each row contributes its parsed cell value
/// (unparseable content contributes 0); otherwise each row counts 1.
/// Output preserves first-seen label order; callers sort by count.
///
/// Out-of-range column indices are a caller precondition violation and
/// fail fast rather than silently mis-indexing.
pub fn aggregate_rows(
    table: &RawTable,
    model_idx: usize,
    count_idx: Option<usize>,
) -> Result<Vec<AggregatedModel>, EngineError> {
    let width = table.headers.len();
    if model_idx >= width {
        return Err(EngineError::ColumnOutOfRange {
            index: model_idx,
            width,
        });
    }
    if let Some(idx) = count_idx {
        if idx >= width {
            return Err(EngineError::ColumnOutOfRange { index: idx, width });
        }
    }

    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for row in &table.rows {
        let label = match row.get(model_idx) {
            Some(cell) if !cell.is_empty() => cell,
            _ => continue,
        };

        let increment = match count_idx {
            Some(idx) => row.get(idx).map(|cell| parse_count(cell)).unwrap_or(0.0),
            None => 1.0,
        };

        if !totals.contains_key(label) {
            order.push(label.clone());
        }
        *totals.entry(label.clone()).or_insert(0.0) += increment;
    }

    Ok(order
        .into_iter()
        .map(|raw_label| {
            let count = totals[&raw_label];
            AggregatedModel { raw_label, count }
        })
        .collect())
}

/// Standard decimal text; anything else (including non-finite forms)
/// coerces to 0.
fn parse_count(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}
