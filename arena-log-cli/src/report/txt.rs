//! Text report generator
//!
//! Plain aligned columns, two decimal places everywhere.

use arena_log_analyzer::{
    BrainSummary, Ratio, RunSummary, ESCAPE_CAUSE_NAMES, KNOWN_BUCKET_NAMES, MODE_NAMES,
};
use std::io::{self, Write};

const KD_UNDEFINED: &str = "N/A (no deaths)";
const WL_INFINITE: &str = "∞ (no losses)";
const WL_UNDEFINED: &str = "N/A";
const UNSPECIFIED_CAUSE: &str = "(unspecified)";

/// Write the brain-summary report
pub fn write_brain_report<W: Write + ?Sized>(
    out: &mut W,
    summary: &BrainSummary,
) -> io::Result<()> {
    let totals = &summary.totals;

    writeln!(out, "Parsed {} brain-summary lines\n", totals.games)?;

    writeln!(out, "Moves + stays by mode:")?;
    for (i, name) in MODE_NAMES.iter().enumerate() {
        writeln!(
            out,
            "  {:<6}  moves={:>6}  stays={:>6}",
            name, totals.moves_by_mode[i], totals.stays_by_mode[i]
        )?;
    }

    if let Some(percentages) = &summary.move_percentages {
        writeln!(out, "\nMove mode percentages (by moves only):")?;
        for (name, pct) in MODE_NAMES.iter().zip(percentages) {
            writeln!(out, "  {:<6}  {:>6.2}%", name, pct)?;
        }
    }

    writeln!(out, "\nDirection choice counts (dir 0..8):")?;
    for (dir, count) in totals.dir_counts.iter().enumerate() {
        writeln!(out, "  dir {}: {}", dir, count)?;
    }

    if let Some(percentages) = &summary.direction_percentages {
        writeln!(out, "\nDirection percentages (by chosen move dir):")?;
        for (dir, pct) in percentages.iter().enumerate() {
            writeln!(out, "  dir {}: {:>6.2}%", dir, pct)?;
        }
    }

    writeln!(
        out,
        "\nEscape causes (times ESCAPE was triggered by each condition):"
    )?;
    for (name, count) in ESCAPE_CAUSE_NAMES.iter().zip(&totals.escape_causes) {
        writeln!(out, "  {:<6}: {}", name, count)?;
    }

    writeln!(out, "\nKnowledge bucket counts at decision time:")?;
    for (name, count) in KNOWN_BUCKET_NAMES.iter().zip(&totals.known_buckets) {
        writeln!(out, "  {:<6}: {}", name, count)?;
    }

    writeln!(
        out,
        "\nTotal timesStuck across all games: {}",
        totals.times_stuck
    )
}

fn format_ratio(ratio: Ratio, infinite: &str, undefined: &str) -> String {
    match ratio {
        Ratio::Value(v) => format!("{:.2}", v),
        Ratio::Infinite => infinite.to_string(),
        Ratio::Undefined => undefined.to_string(),
    }
}

/// Write the run-stats report
pub fn write_run_report<W: Write + ?Sized>(
    out: &mut W,
    summary: &RunSummary,
) -> io::Result<()> {
    writeln!(out, "Total runs (rows): {}", summary.rows)?;
    writeln!(out, "Total deaths     : {}", summary.deaths)?;
    writeln!(out, "Total wins       : {}", summary.wins)?;
    writeln!(out, "Total kills      : {}", summary.kills)?;
    writeln!(out)?;

    // A K/D ratio cannot be infinite: no deaths means no ratio
    let kd = format_ratio(summary.kd_ratio, KD_UNDEFINED, KD_UNDEFINED);
    writeln!(out, "K/D ratio        : {}", kd)?;

    let wl = format_ratio(summary.win_loss_ratio, WL_INFINITE, WL_UNDEFINED);
    writeln!(out, "Win/Loss ratio   : {}", wl)?;
    writeln!(out, "Win rate         : {:5.2}%", summary.win_rate)?;
    writeln!(out)?;

    writeln!(out, "Aggregate performance:")?;
    writeln!(
        out,
        "  Shot accuracy        : {:5.2}% ({} / {})",
        summary.accuracy, summary.shots_hit, summary.shots_fired
    )?;
    writeln!(out, "  Avg kills per run    : {:5.2}", summary.avg_kills)?;
    writeln!(out, "  Avg dmg dealt / run  : {:7.2}", summary.avg_damage_dealt)?;
    writeln!(out, "  Avg dmg taken / run  : {:7.2}", summary.avg_damage_taken)?;
    writeln!(out, "  Avg rounds survived  : {:7.2}", summary.avg_rounds_survived)?;
    writeln!(out, "  Avg times stuck / run: {:7.2}", summary.avg_times_stuck)?;
    writeln!(out)?;

    writeln!(out, "Cause-of-death summary:")?;
    writeln!(out, "{:<40} {:>8} {:>12}", "Cause of Death", "Count", "% of deaths")?;
    for share in &summary.causes {
        let cause = if share.cause.is_empty() {
            UNSPECIFIED_CAUSE
        } else {
            share.cause.as_str()
        };
        writeln!(out, "{:<40} {:>8} {:>12.2}", cause, share.count, share.percent)?;
    }

    Ok(())
}
