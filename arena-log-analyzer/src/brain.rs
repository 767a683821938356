//! Brain-summary log parser
//!
//! The sweeper bot writes one `[SWEEPER-BRAIN-SUMMARY]` line per game into a
//! free-form log. Fields are whitespace-separated `label(...)=v1,v2,...`
//! tokens located by label, so added or reordered fields are tolerated as
//! long as the required labels are present.
//!
//! Example line:
//!
//! ```text
//! [SWEEPER-BRAIN-SUMMARY] game=12 movesByMode(ESC,EXP,HUNT,REPOS,DRIFT)=4,10,7,1,0
//!     staysByMode(ESC,EXP,HUNT,REPOS,DRIFT)=0,2,5,0,1 dirCounts(0..8)=1,2,3,4,0,5,6,1,0
//!     escapeCauses(close,flame,rail,damage)=1,0,2,1 knownBuckets(low,mid,high)=3,8,11
//!     timesStuck=2
//! ```

use crate::config::{AnalyzerConfig, ArityPolicy};
use crate::types::{
    BrainSummaryRecord, ParseError, Result, DIRECTION_COUNT, ESCAPE_CAUSE_COUNT,
    KNOWN_BUCKET_COUNT, MODE_COUNT,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Field labels as they appear in the log
///
/// List fields carry their `(` so `movesByMode=...` does not count as
/// `movesByMode(...)=...`.
pub const MOVES_BY_MODE: &str = "movesByMode(";
pub const STAYS_BY_MODE: &str = "staysByMode(";
pub const DIR_COUNTS: &str = "dirCounts(";
pub const ESCAPE_CAUSES: &str = "escapeCauses(";
pub const KNOWN_BUCKETS: &str = "knownBuckets(";
pub const TIMES_STUCK: &str = "timesStuck";

/// Running totals over every accepted brain-summary line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainTotals {
    /// Number of accepted lines (one per game)
    pub games: u64,
    pub moves_by_mode: [u64; MODE_COUNT],
    pub stays_by_mode: [u64; MODE_COUNT],
    pub dir_counts: [u64; DIRECTION_COUNT],
    pub escape_causes: [u64; ESCAPE_CAUSE_COUNT],
    pub known_buckets: [u64; KNOWN_BUCKET_COUNT],
    pub times_stuck: u64,
}

impl BrainTotals {
    /// Create zeroed totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one game into the totals
    ///
    /// Either every slot is updated or, if any slot would overflow, none is.
    pub fn add(&mut self, record: &BrainSummaryRecord) -> std::result::Result<(), ParseError> {
        let next = Self {
            games: checked("games", self.games, 1)?,
            moves_by_mode: add_slots(MOVES_BY_MODE, &self.moves_by_mode, &record.moves_by_mode)?,
            stays_by_mode: add_slots(STAYS_BY_MODE, &self.stays_by_mode, &record.stays_by_mode)?,
            dir_counts: add_slots(DIR_COUNTS, &self.dir_counts, &record.dir_counts)?,
            escape_causes: add_slots(ESCAPE_CAUSES, &self.escape_causes, &record.escape_causes)?,
            known_buckets: add_slots(KNOWN_BUCKETS, &self.known_buckets, &record.known_buckets)?,
            times_stuck: checked(TIMES_STUCK, self.times_stuck, record.times_stuck)?,
        };
        *self = next;
        Ok(())
    }

    /// Sum of moves across all modes
    pub fn total_moves(&self) -> u128 {
        self.moves_by_mode.iter().map(|&m| u128::from(m)).sum()
    }

    /// Sum of all direction choices
    pub fn total_directions(&self) -> u128 {
        self.dir_counts.iter().map(|&d| u128::from(d)).sum()
    }
}

fn checked(field: &'static str, total: u64, value: u64) -> std::result::Result<u64, ParseError> {
    total.checked_add(value).ok_or(ParseError::TotalOverflow(field))
}

fn add_slots<const N: usize>(
    field: &'static str,
    totals: &[u64; N],
    values: &[u64; N],
) -> std::result::Result<[u64; N], ParseError> {
    let mut sums = [0u64; N];
    for ((sum, &total), &value) in sums.iter_mut().zip(totals).zip(values) {
        *sum = checked(field, total, value)?;
    }
    Ok(sums)
}

/// Parse a single log line
///
/// Returns `Ok(None)` if the line is not a brain summary at all, and an error
/// if it is one but a required field is missing or malformed. Callers are
/// expected to skip rejected lines.
pub fn parse_brain_line(
    line: &str,
    config: &AnalyzerConfig,
) -> std::result::Result<Option<BrainSummaryRecord>, ParseError> {
    let line = line.trim();
    if !line.starts_with(config.brain_tag.as_str()) {
        return Ok(None);
    }

    let fields = index_fields(line);

    // Presence is checked for every field before any value is parsed
    for label in [
        MOVES_BY_MODE,
        STAYS_BY_MODE,
        DIR_COUNTS,
        ESCAPE_CAUSES,
        KNOWN_BUCKETS,
        TIMES_STUCK,
    ] {
        if !fields.contains_key(label) {
            return Err(ParseError::MissingField(label));
        }
    }

    let policy = config.arity;
    Ok(Some(BrainSummaryRecord {
        moves_by_mode: parse_counts(&fields, MOVES_BY_MODE, policy)?,
        stays_by_mode: parse_counts(&fields, STAYS_BY_MODE, policy)?,
        dir_counts: parse_counts(&fields, DIR_COUNTS, policy)?,
        escape_causes: parse_counts(&fields, ESCAPE_CAUSES, policy)?,
        known_buckets: parse_counts(&fields, KNOWN_BUCKETS, policy)?,
        times_stuck: parse_scalar(&fields, TIMES_STUCK)?,
    }))
}

/// Build a label -> value map in one pass over the tokens
///
/// The label is the token text up to and including the first `(`, or the
/// whole text before `=` when there is no `(`. Tokens without `=` are
/// ignored and the first occurrence of a label wins.
fn index_fields(line: &str) -> HashMap<&str, &str> {
    let mut fields = HashMap::new();
    for token in line.split_whitespace() {
        let Some((head, value)) = token.split_once('=') else {
            continue;
        };
        let label = match head.find('(') {
            Some(idx) => &head[..=idx],
            None => head,
        };
        fields.entry(label).or_insert(value);
    }
    fields
}

fn parse_number(field: &'static str, raw: &str) -> std::result::Result<u64, ParseError> {
    raw.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn parse_scalar(
    fields: &HashMap<&str, &str>,
    field: &'static str,
) -> std::result::Result<u64, ParseError> {
    let raw = fields.get(field).ok_or(ParseError::MissingField(field))?;
    parse_number(field, raw)
}

fn parse_counts<const N: usize>(
    fields: &HashMap<&str, &str>,
    field: &'static str,
    policy: ArityPolicy,
) -> std::result::Result<[u64; N], ParseError> {
    let raw = fields.get(field).ok_or(ParseError::MissingField(field))?;
    let values = raw
        .split(',')
        .map(|v| parse_number(field, v))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if values.len() != N {
        match policy {
            ArityPolicy::Strict => {
                return Err(ParseError::ArityMismatch {
                    field,
                    expected: N,
                    actual: values.len(),
                });
            }
            ArityPolicy::Lenient => {
                log::trace!(
                    "Field '{}' has {} values, expected {}; using the first {}",
                    field,
                    values.len(),
                    N,
                    N.min(values.len())
                );
            }
        }
    }

    let mut counts = [0u64; N];
    for (slot, value) in counts.iter_mut().zip(values) {
        *slot = value;
    }
    Ok(counts)
}

/// Aggregate every brain-summary line from a reader
///
/// Lines are decoded lossily so stray non-UTF-8 bytes in the free-form log
/// only affect the line they appear on.
pub fn analyze_brain_reader<R: Read>(reader: R, config: &AnalyzerConfig) -> Result<BrainTotals> {
    config.validate()?;

    let mut reader = BufReader::new(reader);
    let mut totals = BrainTotals::new();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        match parse_brain_line(&line, config) {
            Ok(Some(record)) => match totals.add(&record) {
                Ok(()) => log::trace!("Line {}: accepted brain summary", line_no),
                Err(e) => log::debug!("Line {}: skipping brain summary: {}", line_no, e),
            },
            Ok(None) => {}
            Err(e) => log::debug!("Line {}: skipping brain summary: {}", line_no, e),
        }
    }

    Ok(totals)
}

/// Open a brain-summary log and aggregate it
pub fn analyze_brain_file(path: &Path, config: &AnalyzerConfig) -> Result<BrainTotals> {
    log::info!("Reading brain-summary log: {:?}", path);
    let file = File::open(path)?;
    let totals = analyze_brain_reader(file, config)?;
    log::info!("Parsed {} brain-summary lines from {:?}", totals.games, path);
    Ok(totals)
}
