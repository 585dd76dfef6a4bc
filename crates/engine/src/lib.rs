//! `camcheck-engine` — inventory-to-catalog camera model matching engine.
//!
//! Pure engine crate: receives a pre-loaded reference catalog and tabular
//! inventory rows, returns classified match results with a cleaning audit
//! trail. No CLI or file IO dependencies.

pub mod aggregate;
pub mod clean;
pub mod column_scan;
pub mod compat;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod similarity;
pub mod vocab;

pub use config::RunConfig;
pub use engine::run;
pub use error::EngineError;
pub use model::{MatchReport, MatchResult, RawTable, ReferenceEntry};
