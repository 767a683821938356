//! Core types for the arena log analyzer library
//!
//! This module defines the record types produced by the parsers, the error
//! types, and the fixed label tables used when reporting. Records are
//! ephemeral: each one is folded into a totals struct as soon as it is parsed.

use serde::{Deserialize, Serialize};

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Number of AI behavioral modes
pub const MODE_COUNT: usize = 5;
/// Number of direction buckets (dir 0..8)
pub const DIRECTION_COUNT: usize = 9;
/// Number of escape trigger conditions
pub const ESCAPE_CAUSE_COUNT: usize = 4;
/// Number of knowledge buckets
pub const KNOWN_BUCKET_COUNT: usize = 3;

/// Mode names, in the order the brain summary reports them
pub const MODE_NAMES: [&str; MODE_COUNT] = ["ESC", "EXP", "HUNT", "REPOS", "DRIFT"];

/// Escape cause names, in log order
pub const ESCAPE_CAUSE_NAMES: [&str; ESCAPE_CAUSE_COUNT] = ["close", "flame", "rail", "damage"];

/// Knowledge bucket names, in log order
pub const KNOWN_BUCKET_NAMES: [&str; KNOWN_BUCKET_COUNT] = ["low", "mid", "high"];

/// Fatal errors that abort an analysis pass
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read run table: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Reasons a brain-summary line is rejected
///
/// These never abort a pass. The read loop logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has non-integer value '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("adding field '{0}' would overflow the running total")]
    TotalOverflow(&'static str),

    #[error("field '{field}' has {actual} values, expected {expected}")]
    ArityMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// One game's brain summary, as parsed from a single log line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainSummaryRecord {
    /// Moves taken in each mode
    pub moves_by_mode: [u64; MODE_COUNT],
    /// Turns spent standing still in each mode
    pub stays_by_mode: [u64; MODE_COUNT],
    /// How often each direction was chosen
    pub dir_counts: [u64; DIRECTION_COUNT],
    /// How often each condition triggered ESCAPE
    pub escape_causes: [u64; ESCAPE_CAUSE_COUNT],
    /// Knowledge level at decision time
    pub known_buckets: [u64; KNOWN_BUCKET_COUNT],
    /// Number of times the bot got stuck
    pub times_stuck: u64,
}

/// One row of the per-run statistics table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// How the run ended; the alive sentinel means the bot survived
    pub cause_of_death: String,
    pub won: bool,
    pub kills: i64,
    pub shots_fired: i64,
    pub shots_hit: i64,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub rounds_survived: i64,
    pub times_stuck: i64,
}

impl RunRecord {
    /// True if this run ended in a death
    pub fn is_death(&self, alive_sentinel: &str) -> bool {
        self.cause_of_death != alive_sentinel
    }
}
