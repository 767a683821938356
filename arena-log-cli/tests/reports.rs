// Runs the built binary against fixture files in a scratch directory
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const BRAIN_LOG: &str = r#"[ARENA] round 1 begins
[SWEEPER-BRAIN-SUMMARY] game=1 movesByMode(ESC,EXP,HUNT,REPOS,DRIFT)=1,1,2,0,0 staysByMode(ESC,EXP,HUNT,REPOS,DRIFT)=0,3,0,0,12 dirCounts(0..8)=0,0,0,0,3,0,0,0,0 escapeCauses(close,flame,rail,damage)=1,0,0,2 knownBuckets(low,mid,high)=5,6,7 timesStuck=9
[SWEEPER-BRAIN-SUMMARY] game=2 movesByMode(ESC,EXP,HUNT,REPOS,DRIFT)=4,4,4,4,4
[SWEEPER-BRAIN-SUMMARY] game=3 movesByMode(ESC,EXP,HUNT,REPOS,DRIFT)=2,0,1,3,0 staysByMode(ESC,EXP,HUNT,REPOS,DRIFT)=1,1,1,1,1 dirCounts(0..8)=1,0,2,0,3,0,0,0,0 escapeCauses(close,flame,rail,damage)=0,3,1,0 knownBuckets(low,mid,high)=1,1,1 timesStuck=2
"#;

const RUN_TABLE: &str = r#"causeOfDeath,won,kills,shotsFired,shotsHit,damageDealt,damageTaken,roundsSurvived,timesStuck
alive,1,4,20,10,300,50,40,0
railgun,0,3,10,2,120,100,25,1
flamethrower,0,2,10,3,80,100,18,2
railgun,0,1,0,0,0,100,3,3
"#;

const BRAIN_REPORT: &str = r#"Parsed 2 brain-summary lines

Moves + stays by mode:
  ESC     moves=     3  stays=     1
  EXP     moves=     1  stays=     4
  HUNT    moves=     3  stays=     1
  REPOS   moves=     3  stays=     1
  DRIFT   moves=     0  stays=    13

Move mode percentages (by moves only):
  ESC      30.00%
  EXP      10.00%
  HUNT     30.00%
  REPOS    30.00%
  DRIFT     0.00%

Direction choice counts (dir 0..8):
  dir 0: 1
  dir 1: 0
  dir 2: 2
  dir 3: 0
  dir 4: 6
  dir 5: 0
  dir 6: 0
  dir 7: 0
  dir 8: 0

Direction percentages (by chosen move dir):
  dir 0:  11.11%
  dir 1:   0.00%
  dir 2:  22.22%
  dir 3:   0.00%
  dir 4:  66.67%
  dir 5:   0.00%
  dir 6:   0.00%
  dir 7:   0.00%
  dir 8:   0.00%

Escape causes (times ESCAPE was triggered by each condition):
  close : 1
  flame : 3
  rail  : 1
  damage: 2

Knowledge bucket counts at decision time:
  low   : 6
  mid   : 7
  high  : 8

Total timesStuck across all games: 11
"#;

const RUN_REPORT: &str = r#"Total runs (rows): 4
Total deaths     : 3
Total wins       : 1
Total kills      : 10

K/D ratio        : 3.33
Win/Loss ratio   : 0.33
Win rate         : 25.00%

Aggregate performance:
  Shot accuracy        : 37.50% (15 / 40)
  Avg kills per run    :  2.50
  Avg dmg dealt / run  :  125.00
  Avg dmg taken / run  :   87.50
  Avg rounds survived  :   21.50
  Avg times stuck / run:    1.50

Cause-of-death summary:
Cause of Death                              Count  % of deaths
railgun                                         2        66.67
flamethrower                                    1        33.33
"#;

fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("reaper_stats.csv"), BRAIN_LOG).unwrap();
    fs::write(dir.path().join("reaper_only_stats.csv"), RUN_TABLE).unwrap();
    dir
}

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_arena-log-cli"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn brain_subcommand_prints_default_report() {
    let dir = fixture_dir();
    let output = run_cli(dir.path(), &["brain"]);
    assert_eq!(stdout_of(&output), BRAIN_REPORT);
}

#[test]
fn runs_subcommand_prints_default_report() {
    let dir = fixture_dir();
    let output = run_cli(dir.path(), &["runs"]);
    assert_eq!(stdout_of(&output), RUN_REPORT);
}

#[test]
fn report_can_go_to_a_file() {
    let dir = fixture_dir();
    let output = run_cli(dir.path(), &["-q", "runs", "--output", "report.txt"]);
    assert_eq!(stdout_of(&output), "");
    let written = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert_eq!(written, RUN_REPORT);
}

#[test]
fn json_format() {
    let dir = fixture_dir();
    let output = run_cli(dir.path(), &["brain", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(value["totals"]["games"], 2);
    assert_eq!(value["totals"]["times_stuck"], 11);
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["runs"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("reaper_only_stats.csv"));
}
