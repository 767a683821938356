// End-to-end passes over on-disk fixtures
use arena_log_analyzer::{
    analyze_brain_file, analyze_runs_file, AnalyzerConfig, AnalyzerError, ArityPolicy,
    BrainSummary, Ratio, RunSummary,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const BRAIN_LOG: &str = "\
[ARENA] round 1 begins
[SWEEPER-BRAIN-SUMMARY] movesByMode(ESC,EXP,HUNT,REPOS,DRIFT)=2,4,6,0,0 staysByMode(ESC,EXP,HUNT,REPOS,DRIFT)=1,0,0,0,1 dirCounts(0..8)=1,1,1,1,1,1,1,1,4 escapeCauses(close,flame,rail,damage)=1,0,0,1 knownBuckets(low,mid,high)=2,2,2 timesStuck=1
[SWEEPER-BRAIN-SUMMARY] movesByMode(ESC,EXP,HUNT,REPOS,DRIFT)=1,1,1,1,1 staysByMode(ESC,EXP,HUNT,REPOS,DRIFT)=0,0,0,0,0 dirCounts(0..8)=0,0,0,0,5,0,0,0,0
[SWEEPER-BRAIN-SUMMARY] timesStuck=3 knownBuckets(low,mid,high)=1,0,0 escapeCauses(close,flame,rail,damage)=0,2,0,0 dirCounts(0..8)=0,0,0,0,0,0,0,0,8 staysByMode(ESC,EXP,HUNT,REPOS,DRIFT)=0,0,1,1,0 movesByMode(ESC,EXP,HUNT,REPOS,DRIFT)=0,0,0,8,0
[SWEEPER-BRAIN-SUMMARY] movesByMode(ESC,EXP,HUNT,REPOS,DRIFT)=1,1 staysByMode(ESC,EXP,HUNT,REPOS,DRIFT)=0,0,0,0,0 dirCounts(0..8)=2,0,0,0,0,0,0,0,0 escapeCauses(close,flame,rail,damage)=0,0,0,0 knownBuckets(low,mid,high)=0,0,0 timesStuck=0
";

#[test]
fn brain_log_lenient() {
    let fixture = write_fixture(BRAIN_LOG);
    let totals = analyze_brain_file(fixture.path(), &AnalyzerConfig::new()).unwrap();

    // The line without timesStuck contributes nothing
    assert_eq!(totals.games, 3);
    assert_eq!(totals.moves_by_mode, [3, 5, 6, 8, 0]);
    assert_eq!(totals.stays_by_mode, [1, 0, 1, 1, 1]);
    assert_eq!(totals.dir_counts, [3, 1, 1, 1, 1, 1, 1, 1, 12]);
    assert_eq!(totals.escape_causes, [1, 2, 0, 1]);
    assert_eq!(totals.known_buckets, [3, 2, 2]);
    assert_eq!(totals.times_stuck, 4);

    let summary = BrainSummary::from_totals(totals);
    let pct = summary.move_percentages.unwrap();
    assert!((pct.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    assert!((pct[3] - 100.0 * 8.0 / 22.0).abs() < 1e-9);
}

#[test]
fn brain_log_strict() {
    let fixture = write_fixture(BRAIN_LOG);
    let config = AnalyzerConfig::new().with_arity_policy(ArityPolicy::Strict);
    let totals = analyze_brain_file(fixture.path(), &config).unwrap();

    // The short movesByMode list is rejected as well
    assert_eq!(totals.games, 2);
    assert_eq!(totals.moves_by_mode, [2, 4, 6, 8, 0]);
}

#[test]
fn brain_log_empty_tag_is_rejected() {
    let fixture = write_fixture(BRAIN_LOG);
    let config = AnalyzerConfig::new().with_brain_tag("  ");
    let result = analyze_brain_file(fixture.path(), &config);
    assert!(matches!(result, Err(AnalyzerError::ConfigError(_))));
}

#[test]
fn run_table_summary() {
    let fixture = write_fixture(
        "causeOfDeath,won,kills,shotsFired,shotsHit,damageDealt,damageTaken,roundsSurvived,timesStuck\n\
         alive,1,4,20,10,300,50,40,0\n\
         railgun,0,3,10,2,120,100,25,1\n\
         flamethrower,0,2,10,3,80,100,18,2\n\
         railgun,0,1,0,0,0,100,3,3\n",
    );
    let totals = analyze_runs_file(fixture.path(), &AnalyzerConfig::new()).unwrap();
    let summary = RunSummary::from_totals(&totals);

    assert_eq!(summary.rows, 4);
    assert_eq!(summary.deaths, 3);
    assert_eq!(summary.wins, 1);
    assert_eq!(summary.kills, 10);
    assert_eq!(summary.kd_ratio.value().map(|v| format!("{:.2}", v)), Some("3.33".to_string()));
    assert_eq!(summary.win_loss_ratio.value().map(|v| format!("{:.2}", v)), Some("0.33".to_string()));
    assert_eq!(summary.win_rate, 25.0);
    assert_eq!(summary.accuracy, 37.5);
    assert_eq!(summary.avg_kills, 2.5);
    assert_eq!(summary.avg_times_stuck, 1.5);

    assert_eq!(summary.causes.len(), 2);
    assert_eq!(summary.causes[0].cause, "railgun");
    assert_eq!(summary.causes[0].count, 2);
    assert!((summary.causes[0].percent - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn run_table_all_survivors() {
    let fixture = write_fixture("causeOfDeath,won,kills\nalive,1,2\nalive,1,1\n");
    let totals = analyze_runs_file(fixture.path(), &AnalyzerConfig::new()).unwrap();
    let summary = RunSummary::from_totals(&totals);

    assert_eq!(summary.kd_ratio, Ratio::Undefined);
    assert_eq!(summary.win_loss_ratio, Ratio::Infinite);
    assert!(summary.causes.is_empty());
}

#[test]
fn missing_files_are_fatal() {
    let config = AnalyzerConfig::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reaper_stats.csv");

    assert!(matches!(analyze_brain_file(&path, &config), Err(AnalyzerError::IoError(_))));
    assert!(matches!(analyze_runs_file(&path, &config), Err(AnalyzerError::IoError(_))));
}
