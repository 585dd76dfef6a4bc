use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single reference catalog record for a known-compatible device model.
///
/// `model_name` is required non-empty; the catalog loader filters out
/// records that lack it. Duplicates are tolerated.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceEntry {
    pub manufacturer: String,
    pub model_name: String,
    pub minimum_firmware: String,
    pub notes: String,
}

/// Header-aligned tabular input from an external ingestion collaborator.
///
/// Header uniqueness is not enforced here; rows may be ragged (missing
/// trailing cells read as empty).
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Rows grouped by the exact (case-sensitive, untrimmed) model-cell string.
///
/// `count` is the occurrence count, or the sum of parsed count-column
/// values when a count column is selected.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedModel {
    pub raw_label: String,
    pub count: f64,
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Why a token was stripped from a raw label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoiseKind {
    #[serde(rename = "IP")]
    Ip,
    #[serde(rename = "MAC")]
    Mac,
    Date,
    Manufacturer,
    #[serde(rename = "Common word")]
    CommonWord,
    Punctuation,
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip => write!(f, "IP"),
            Self::Mac => write!(f, "MAC"),
            Self::Date => write!(f, "Date"),
            Self::Manufacturer => write!(f, "Manufacturer"),
            Self::CommonWord => write!(f, "Common word"),
            Self::Punctuation => write!(f, "Punctuation"),
        }
    }
}

/// One stripped token with its tagged reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedElement {
    pub kind: NoiseKind,
    pub value: String,
}

impl fmt::Display for RemovedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}

/// Audit trail of one cleaning pass. Derived per call, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningResult {
    pub original: String,
    pub cleaned: String,
    pub removed: Vec<RemovedElement>,
}

impl CleaningResult {
    pub fn empty() -> Self {
        Self {
            original: String::new(),
            cleaned: String::new(),
            removed: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Potential,
    None,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Potential => write!(f, "potential"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Integration classification derived from catalog notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompatibilityType {
    #[serde(rename = "RTSP")]
    Rtsp,
    #[serde(rename = "ONVIF-S")]
    OnvifS,
}

impl fmt::Display for CompatibilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rtsp => write!(f, "RTSP"),
            Self::OnvifS => write!(f, "ONVIF-S"),
        }
    }
}

/// Classification of one aggregated model against the catalog.
///
/// Invariants: `compatibility` is present iff `reference` is present;
/// `similarity` is present iff `match_type` is not `None`.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub model: String,
    pub cleaned_model: String,
    pub count: f64,
    pub match_type: MatchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_with: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    pub removed: Vec<RemovedElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<CompatibilityType>,
}

// ---------------------------------------------------------------------------
// Column scan
// ---------------------------------------------------------------------------

/// What a whole column is suspected of holding.
///
/// Kept distinct from [`NoiseKind`]: the column scanner's pattern set is a
/// looser legacy variant of the token cleaner's and the two are not
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnNoise {
    Serial,
    Ip,
    Mac,
    Date,
}

impl fmt::Display for ColumnNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => write!(f, "serial"),
            Self::Ip => write!(f, "ip"),
            Self::Mac => write!(f, "mac"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// A column flagged as likely holding serials/IPs/MACs/dates.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSuspicion {
    pub index: usize,
    pub header: String,
    pub kind: ColumnNoise,
    /// Fraction of non-empty cells matching the suspected pattern.
    pub ratio: f64,
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub total_models: usize,
    pub total_devices: f64,
    pub exact: usize,
    pub potential: usize,
    pub none: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub catalog_size: usize,
}

/// Full engine output: one `MatchResult` per distinct raw label, sorted by
/// descending count.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub meta: ReportMeta,
    pub summary: MatchSummary,
    pub column_warnings: Vec<ColumnSuspicion>,
    pub results: Vec<MatchResult>,
}
