//! Derived metrics
//!
//! Turns final totals into the figures the reports print: percent
//! distributions, ratios, averages and the ranked cause-of-death table.
//! Division by zero never happens here; it is folded into [`Ratio`] or a
//! zero value.

use crate::brain::BrainTotals;
use crate::runs::RunTotals;
use serde::{Deserialize, Serialize};

/// A ratio that may have no finite value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ratio {
    Value(f64),
    /// Non-zero numerator over a zero denominator
    Infinite,
    /// Nothing to divide
    Undefined,
}

impl Ratio {
    /// The finite value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// `100 * part / whole`, or zero when `whole` is zero
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        100.0 * part / whole
    }
}

/// `sum / count`, or zero when `count` is zero
pub fn average(sum: i128, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Everything the brain-summary report shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainSummary {
    pub totals: BrainTotals,
    /// Share of moves per mode; `None` when no moves were recorded
    pub move_percentages: Option<Vec<f64>>,
    /// Share of each direction; `None` when no directions were recorded
    pub direction_percentages: Option<Vec<f64>>,
}

impl BrainSummary {
    pub fn from_totals(totals: BrainTotals) -> Self {
        let move_percentages = distribution(&totals.moves_by_mode);
        let direction_percentages = distribution(&totals.dir_counts);
        Self {
            totals,
            move_percentages,
            direction_percentages,
        }
    }
}

fn distribution(counts: &[u64]) -> Option<Vec<f64>> {
    let total: u128 = counts.iter().map(|&c| u128::from(c)).sum();
    if total == 0 {
        return None;
    }
    Some(
        counts
            .iter()
            .map(|&c| percent(c as f64, total as f64))
            .collect(),
    )
}

/// One row of the cause-of-death table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseShare {
    pub cause: String,
    pub count: u64,
    /// Percent of all deaths
    pub percent: f64,
}

/// Everything the run-stats report shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rows: u64,
    pub deaths: u64,
    pub wins: u64,
    pub losses: u64,
    pub kills: i128,
    pub shots_fired: i128,
    pub shots_hit: i128,
    pub kd_ratio: Ratio,
    pub win_loss_ratio: Ratio,
    pub win_rate: f64,
    pub accuracy: f64,
    pub avg_kills: f64,
    pub avg_damage_dealt: f64,
    pub avg_damage_taken: f64,
    pub avg_rounds_survived: f64,
    pub avg_times_stuck: f64,
    /// Sorted by count, most frequent first
    pub causes: Vec<CauseShare>,
}

impl RunSummary {
    pub fn from_totals(totals: &RunTotals) -> Self {
        let rows = totals.rows;
        let losses = totals.losses();

        let kd_ratio = if totals.deaths > 0 {
            Ratio::Value(totals.kills as f64 / totals.deaths as f64)
        } else {
            Ratio::Undefined
        };

        let win_loss_ratio = if losses > 0 {
            Ratio::Value(totals.wins as f64 / losses as f64)
        } else if totals.wins > 0 {
            Ratio::Infinite
        } else {
            Ratio::Undefined
        };

        Self {
            rows,
            deaths: totals.deaths,
            wins: totals.wins,
            losses,
            kills: totals.kills,
            shots_fired: totals.shots_fired,
            shots_hit: totals.shots_hit,
            kd_ratio,
            win_loss_ratio,
            win_rate: percent(totals.wins as f64, rows as f64),
            accuracy: percent(totals.shots_hit as f64, totals.shots_fired as f64),
            avg_kills: average(totals.kills, rows),
            avg_damage_dealt: average(totals.damage_dealt, rows),
            avg_damage_taken: average(totals.damage_taken, rows),
            avg_rounds_survived: average(totals.rounds_survived, rows),
            avg_times_stuck: average(totals.times_stuck, rows),
            causes: rank_causes(totals),
        }
    }
}

fn rank_causes(totals: &RunTotals) -> Vec<CauseShare> {
    let mut causes: Vec<CauseShare> = totals
        .cause_counts
        .iter()
        .map(|(cause, &count)| CauseShare {
            cause: cause.clone(),
            count,
            percent: percent(count as f64, totals.deaths as f64),
        })
        .collect();

    // HashMap order is random; break ties by name so output is stable
    causes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.cause.cmp(&b.cause)));
    causes
}
