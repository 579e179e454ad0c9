//! Log output of a simulation run, captured through the `log` facade.
//!
//! Kept in its own test binary: it installs the process-wide logger.
use holdem_odds::{new_table, parse_cards, Simulator};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

struct Capture(Mutex<Vec<(Level, String)>>);

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = self.0.lock() {
            lines.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

#[test]
fn test_run_log_levels() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut table = new_table(3, "full").unwrap();
    table.add_to_hand(1, &parse_cards("Jc Jd").unwrap()).unwrap();
    Simulator::new(4, 50).unwrap().with_seed(6).run(&table).unwrap();

    let lines = CAPTURE.0.lock().unwrap();
    let per_sample: Vec<_> = lines
        .iter()
        .filter(|(_, msg)| msg.starts_with("outer sample"))
        .collect();
    assert_eq!(per_sample.len(), 4, "one line per outer sample: {lines:?}");
    assert!(per_sample.iter().all(|(level, _)| *level == Level::Debug));

    let summaries = lines.iter().filter(|(level, _)| *level == Level::Info).count();
    assert_eq!(summaries, 1, "one summary per run: {lines:?}");
}
