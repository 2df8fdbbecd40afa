use super::support::{ScriptedStatus, Step};
use batbench::core::recorder::{LogStyle, Recorder};
use batbench::core::session::{run_drain, DrainConfig};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn config(dir: &TempDir) -> DrainConfig {
    DrainConfig {
        log_path: dir.path().join("output.log"),
    }
}

#[test]
fn test_drain_arms_and_ends_at_thresholds() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);

    // Idle poll at 46, arming reading at 45, one draining sample, then the end
    let mut sampler = ScriptedStatus::new(vec![
        Step::Ok(46, false),
        Step::Ok(45, false),
        Step::Ok(44, false),
        Step::Ok(43, false),
    ]);
    let mut recorder = Recorder::with_style(LogStyle::Drain);
    let mut sleeps: Vec<Duration> = Vec::new();

    run_drain(&mut sampler, &mut recorder, &cfg, |d| sleeps.push(d)).unwrap();

    let messages: Vec<&str> = recorder
        .records()
        .iter()
        .map(|r| r.message.as_str())
        .collect();
    assert_eq!(messages, vec!["Test Started!", "Running...", "Test ended!"]);

    // One idle sleep plus one draining sleep; the arming reading and the
    // terminal reading do not sleep
    assert_eq!(sleeps, vec![Duration::from_secs(10), Duration::from_secs(10)]);
}

#[test]
fn test_drain_ignores_arming_percentage_on_ac() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);

    let mut sampler = ScriptedStatus::new(vec![
        Step::Ok(45, true),
        Step::Ok(45, false),
        Step::Ok(43, false),
    ]);
    let mut recorder = Recorder::with_style(LogStyle::Drain);

    run_drain(&mut sampler, &mut recorder, &cfg, |_| {}).unwrap();

    // The on-AC reading must not arm the test
    assert_eq!(recorder.records()[0].message, "Test Started!");
    assert_eq!(recorder.records()[0].battery, 45);
    assert!(!recorder.records()[0].ac_connected);
}

#[test]
fn test_drain_ends_exactly_once_on_first_threshold_reading() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);

    let mut sampler = ScriptedStatus::new(vec![
        Step::Ok(45, false),
        Step::Ok(44, false),
        Step::Ok(43, false),
        // Anything past the terminal reading must never be polled
        Step::Ok(42, false),
    ]);
    let mut recorder = Recorder::with_style(LogStyle::Drain);

    run_drain(&mut sampler, &mut recorder, &cfg, |_| {}).unwrap();

    let ended = recorder
        .records()
        .iter()
        .filter(|r| r.message == "Test ended!")
        .count();
    assert_eq!(ended, 1);
    assert_eq!(recorder.last().unwrap().battery, 43);
}

#[test]
fn test_drain_log_rows_match_record_count() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);

    let mut sampler = ScriptedStatus::new(vec![
        Step::Ok(45, false),
        Step::Ok(44, false),
        Step::Ok(44, false),
        Step::Ok(43, false),
    ]);
    let mut recorder = Recorder::with_style(LogStyle::Drain);

    run_drain(&mut sampler, &mut recorder, &cfg, |_| {}).unwrap();

    let contents = fs::read_to_string(&cfg.log_path).unwrap();
    assert_eq!(contents.lines().count(), recorder.len());
    assert_eq!(recorder.len(), 4);
}

#[test]
fn test_drain_sample_error_is_fatal() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);

    let mut sampler = ScriptedStatus::new(vec![Step::Fail]);
    let mut recorder = Recorder::with_style(LogStyle::Drain);

    let result = run_drain(&mut sampler, &mut recorder, &cfg, |_| {});
    assert!(result.is_err());
    assert!(recorder.is_empty());
    assert!(!cfg.log_path.exists());
}
