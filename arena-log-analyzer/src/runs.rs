//! Per-run statistics table parser
//!
//! Reads the run CSV (header row required) and folds each row into
//! [`RunTotals`]. Columns are looked up by name. Numeric cells that are
//! missing or not integers count as zero, so a row never fails.

use crate::config::AnalyzerConfig;
use crate::types::{Result, RunRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column names expected in the header row
pub const COL_CAUSE_OF_DEATH: &str = "causeOfDeath";
pub const COL_WON: &str = "won";
pub const COL_KILLS: &str = "kills";
pub const COL_SHOTS_FIRED: &str = "shotsFired";
pub const COL_SHOTS_HIT: &str = "shotsHit";
pub const COL_DAMAGE_DEALT: &str = "damageDealt";
pub const COL_DAMAGE_TAKEN: &str = "damageTaken";
pub const COL_ROUNDS_SURVIVED: &str = "roundsSurvived";
pub const COL_TIMES_STUCK: &str = "timesStuck";

/// Every column the run reporter reads
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_CAUSE_OF_DEATH,
    COL_WON,
    COL_KILLS,
    COL_SHOTS_FIRED,
    COL_SHOTS_HIT,
    COL_DAMAGE_DEALT,
    COL_DAMAGE_TAKEN,
    COL_ROUNDS_SURVIVED,
    COL_TIMES_STUCK,
];

/// Running totals over every row of the run table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub rows: u64,
    pub deaths: u64,
    pub wins: u64,
    // Per-row cells are i64; sums are kept wide so they cannot overflow
    pub kills: i128,
    pub shots_fired: i128,
    pub shots_hit: i128,
    pub damage_dealt: i128,
    pub damage_taken: i128,
    pub rounds_survived: i128,
    pub times_stuck: i128,
    /// Death count per cause (never contains the alive sentinel)
    pub cause_counts: HashMap<String, u64>,
}

impl RunTotals {
    /// Create zeroed totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run into the totals
    pub fn add(&mut self, record: &RunRecord, alive_sentinel: &str) {
        self.rows += 1;
        if record.won {
            self.wins += 1;
        }
        self.kills += i128::from(record.kills);
        self.shots_fired += i128::from(record.shots_fired);
        self.shots_hit += i128::from(record.shots_hit);
        self.damage_dealt += i128::from(record.damage_dealt);
        self.damage_taken += i128::from(record.damage_taken);
        self.rounds_survived += i128::from(record.rounds_survived);
        self.times_stuck += i128::from(record.times_stuck);

        if record.is_death(alive_sentinel) {
            self.deaths += 1;
            *self
                .cause_counts
                .entry(record.cause_of_death.clone())
                .or_insert(0) += 1;
        }
    }

    /// Runs that were not wins
    pub fn losses(&self) -> u64 {
        self.rows.saturating_sub(self.wins)
    }
}

/// Coerce a cell to an integer; anything unparseable is zero
pub fn to_int(cell: Option<&str>) -> i64 {
    cell.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Header positions of the columns the reporter reads
#[derive(Debug, Clone, Default)]
pub struct RunColumns {
    positions: HashMap<&'static str, usize>,
}

impl RunColumns {
    /// Find each required column in the header row
    ///
    /// Missing columns are logged and read as empty cells.
    pub fn locate(headers: &csv::StringRecord) -> Self {
        let mut positions = HashMap::new();
        for name in REQUIRED_COLUMNS {
            match headers.iter().position(|h| h == name) {
                Some(idx) => {
                    positions.insert(name, idx);
                }
                None => log::warn!("Run table has no '{}' column; treating it as empty", name),
            }
        }
        Self { positions }
    }

    /// True if every required column is present
    pub fn is_complete(&self) -> bool {
        self.positions.len() == REQUIRED_COLUMNS.len()
    }

    fn cell<'r>(&self, record: &'r csv::StringRecord, name: &str) -> Option<&'r str> {
        self.positions.get(name).and_then(|&idx| record.get(idx))
    }

    /// Build a run record from one data row
    pub fn read_record(&self, record: &csv::StringRecord) -> RunRecord {
        RunRecord {
            cause_of_death: self
                .cell(record, COL_CAUSE_OF_DEATH)
                .unwrap_or_default()
                .to_string(),
            won: to_int(self.cell(record, COL_WON)) != 0,
            kills: to_int(self.cell(record, COL_KILLS)),
            shots_fired: to_int(self.cell(record, COL_SHOTS_FIRED)),
            shots_hit: to_int(self.cell(record, COL_SHOTS_HIT)),
            damage_dealt: to_int(self.cell(record, COL_DAMAGE_DEALT)),
            damage_taken: to_int(self.cell(record, COL_DAMAGE_TAKEN)),
            rounds_survived: to_int(self.cell(record, COL_ROUNDS_SURVIVED)),
            times_stuck: to_int(self.cell(record, COL_TIMES_STUCK)),
        }
    }
}

/// Aggregate every row of a run table from a reader
pub fn analyze_runs_reader<R: Read>(reader: R, config: &AnalyzerConfig) -> Result<RunTotals> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = RunColumns::locate(csv_reader.headers()?);
    if !columns.is_complete() {
        log::debug!("Run table header is incomplete: {:?}", csv_reader.headers()?);
    }

    let mut totals = RunTotals::new();
    for row in csv_reader.records() {
        let row = row?;
        let record = columns.read_record(&row);
        log::trace!("Row {}: {:?}", totals.rows + 1, record);
        totals.add(&record, &config.alive_sentinel);
    }

    Ok(totals)
}

/// Open a run table and aggregate it
pub fn analyze_runs_file(path: &Path, config: &AnalyzerConfig) -> Result<RunTotals> {
    log::info!("Reading run table: {:?}", path);
    let file = File::open(path)?;
    let totals = analyze_runs_reader(file, config)?;
    log::info!(
        "Parsed {} runs ({} deaths) from {:?}",
        totals.rows,
        totals.deaths,
        path
    );
    Ok(totals)
}
