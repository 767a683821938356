//! Arena Log Analyzer Library
//!
//! Offline aggregation of a robot arena's AI telemetry. Two independent
//! single-pass reporters share this library:
//!
//! - **Brain summaries**: free-form log lines tagged `[SWEEPER-BRAIN-SUMMARY]`,
//!   tallied into movement-mode, direction, escape-cause, knowledge-bucket
//!   and stuck totals
//! - **Run statistics**: a per-run CSV table, tallied into win/loss,
//!   kill/death, accuracy and cause-of-death totals
//!
//! The library reads and aggregates; it never prints. Report rendering lives
//! in the application layer (arena-log-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use arena_log_analyzer::{analyze_runs_file, AnalyzerConfig, RunSummary};
//! use std::path::Path;
//!
//! let config = AnalyzerConfig::new().with_alive_sentinel("alive");
//! let totals = analyze_runs_file(Path::new("reaper_only_stats.csv"), &config).unwrap();
//! let summary = RunSummary::from_totals(&totals);
//! println!("Win rate: {:.2}%", summary.win_rate);
//! ```

// Public modules
pub mod brain;
pub mod config;
pub mod runs;
pub mod summary;
pub mod types;

// Re-export main types for convenience
pub use brain::{analyze_brain_file, analyze_brain_reader, parse_brain_line, BrainTotals};
pub use config::{AnalyzerConfig, ArityPolicy};
pub use runs::{analyze_runs_file, analyze_runs_reader, RunTotals};
pub use summary::{BrainSummary, CauseShare, Ratio, RunSummary};
pub use types::{
    AnalyzerError, BrainSummaryRecord, ParseError, Result, RunRecord, ESCAPE_CAUSE_NAMES,
    KNOWN_BUCKET_NAMES, MODE_NAMES,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
