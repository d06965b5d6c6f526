//! Whole-file scan and summary report
//!
//! This module provides the single pass over every event in a file:
//! - [`scan_events`] classifies each event and collects its timestamp
//! - [`FileSummary`] derives the fractions, file duration and average rate
//! - [`append_summary`] appends the labeled text block to the results file

use crate::analysis::coincidence::{
    fiber_trigger, is_double_paddle, is_one_big_paddle, is_single_paddle,
    is_single_paddle_or_more, is_two_big_paddle,
};
use crate::common::CategoryTally;
use crate::parsing::{EventLog, ParseError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Result of scanning every event in one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileScan {
    /// Per-category event counts.
    pub tally: CategoryTally,
    /// Per-event timestamps in file order, seconds.
    pub timestamps: Vec<f64>,
}

/// Classifies every event in the log in a single pass.
///
/// Each event is decoded once, run through all five paddle predicates plus
/// the fiber trigger, and its timestamp recorded for the rate statistics.
/// The first decode failure aborts the scan; nothing partial is reported.
pub fn scan_events(log: &EventLog) -> Result<FileScan, ParseError> {
    let mut tally = CategoryTally::default();
    let mut timestamps = Vec::with_capacity(log.event_count());

    for event in 0..log.event_count() {
        let record = log.parse_event(event)?;
        let hit = &record.paddles;
        if is_two_big_paddle(hit) {
            tally.two_big_paddle += 1;
        }
        if is_one_big_paddle(hit) {
            tally.one_big_paddle += 1;
        }
        if is_single_paddle(hit) {
            tally.single_paddle += 1;
        }
        if is_single_paddle_or_more(hit) {
            tally.single_paddle_or_more += 1;
        }
        if is_double_paddle(hit) {
            tally.double_paddle += 1;
        }
        if fiber_trigger(&record.fiber) {
            tally.fiber_trigger += 1;
        }
        timestamps.push(record.timestamp);
    }

    Ok(FileScan { tally, timestamps })
}

/// Summary statistics for one analyzed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub file_name: String,
    pub event_count: usize,
    pub tally: CategoryTally,
    /// Time from the first to the last event, minutes.
    pub duration_min: f64,
    /// Events per second over the whole file.
    pub average_rate_hz: f64,
}

impl FileSummary {
    /// Derives the summary statistics from a completed scan.
    pub fn from_scan(file_name: &str, scan: &FileScan) -> Self {
        let event_count = scan.timestamps.len();
        let duration_min = match (scan.timestamps.first(), scan.timestamps.last()) {
            (Some(first), Some(last)) => (last - first) / 60.0,
            _ => 0.0,
        };
        // A one-event file has no measurable span; report a zero rate
        // rather than dividing by it.
        let average_rate_hz = if duration_min > 0.0 {
            event_count as f64 / (duration_min * 60.0)
        } else {
            0.0
        };
        Self {
            file_name: file_name.to_string(),
            event_count,
            tally: scan.tally,
            duration_min,
            average_rate_hz,
        }
    }

    fn fraction(&self, count: u64) -> f64 {
        if self.event_count == 0 {
            0.0
        } else {
            count as f64 / self.event_count as f64
        }
    }

    /// Renders the labeled text block that goes into the results file.
    pub fn format_block(&self) -> String {
        format!(
            "file name: {}\n\
             number of events: {}\n\
             fraction of events with double paddle: {:.5}\n\
             fraction of events with two big paddle hits: {:.5}\n\
             fraction of events with one big paddle hit: {:.5}\n\
             fraction of events with single paddle: {:.5}\n\
             fraction of events with at least a single paddle: {:.5}\n\
             fraction of events satisfying the fiber trigger: {:.5}\n\
             file time in minutes: {:.1}\n\
             average rate (Hz) in entire file: {:.1}\n",
            self.file_name,
            self.event_count,
            self.fraction(self.tally.double_paddle),
            self.fraction(self.tally.two_big_paddle),
            self.fraction(self.tally.one_big_paddle),
            self.fraction(self.tally.single_paddle),
            self.fraction(self.tally.single_paddle_or_more),
            self.fraction(self.tally.fiber_trigger),
            self.duration_min,
            self.average_rate_hz,
        )
    }
}

/// Appends one summary block to the results file, creating it on first use.
///
/// The sink is append-only; prior runs are never truncated. A blank line
/// separates consecutive blocks.
pub fn append_summary(path: &Path, summary: &FileSummary) -> std::io::Result<()> {
    let mut sink = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(sink, "{}", summary.format_block())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_data::{render_log, EventSpec};
    use crate::layout::RecordLayout;
    use crate::parsing::EventLog;

    fn scan(events: &[EventSpec]) -> FileScan {
        let log = EventLog::from_lines(render_log(events), RecordLayout::default()).unwrap();
        scan_events(&log).unwrap()
    }

    #[test]
    fn classifies_reference_scenario() {
        // Event 0: outer paddle 1 with its front inner paddle 2.
        // Event 1: outer paddles 1 and 2, both front pairs firing.
        let events = [
            EventSpec::quiet(1000).with_outer_hit(1).with_inner_hit(2),
            EventSpec::quiet(1060)
                .with_outer_hit(1)
                .with_outer_hit(2)
                .with_inner_hit(1)
                .with_inner_hit(4),
        ];
        let scan = scan(&events);
        assert_eq!(scan.tally.one_big_paddle, 1);
        assert_eq!(scan.tally.two_big_paddle, 1);
        assert_eq!(scan.tally.single_paddle, 1);
        assert_eq!(scan.tally.single_paddle_or_more, 2);
        assert_eq!(scan.tally.double_paddle, 1);
        assert_eq!(scan.tally.fiber_trigger, 0);
        assert_eq!(scan.timestamps, vec![1000.0, 1060.0]);
    }

    #[test]
    fn tallies_respect_category_refinements() {
        let events = [
            EventSpec::quiet(0).with_outer_hit(3).with_inner_hit(5),
            EventSpec::quiet(10).with_outer_hit(3).with_inner_hit(11),
            EventSpec::quiet(20)
                .with_outer_hit(4)
                .with_outer_hit(6)
                .with_inner_hit(8)
                .with_inner_hit(12),
            EventSpec::quiet(30),
        ];
        let tally = scan(&events).tally;
        assert!(tally.double_paddle <= tally.two_big_paddle);
        assert!(tally.single_paddle <= tally.one_big_paddle);
        assert!(tally.single_paddle <= tally.single_paddle_or_more);
        assert!(tally.one_big_paddle + tally.two_big_paddle <= events.len() as u64);
    }

    #[test]
    fn counts_fiber_trigger_events() {
        let events = [
            EventSpec::quiet(0).with_fiber([1, 0, 0, 1]),
            EventSpec::quiet(10).with_fiber([0, 2, 3, 0]),
            EventSpec::quiet(20).with_fiber([1, 1, 0, 0]),
            EventSpec::quiet(30).with_fiber([0, 0, 5, 5]),
        ];
        assert_eq!(scan(&events).tally.fiber_trigger, 2);
    }

    #[test]
    fn summary_reports_duration_and_rate() {
        // 120 s between first and last of 3 events: 2.0 min, 0.025 Hz.
        let events = [
            EventSpec::quiet(500),
            EventSpec::quiet(560),
            EventSpec::quiet(620),
        ];
        let summary = FileSummary::from_scan("run-01.dat", &scan(&events));
        assert_eq!(summary.event_count, 3);
        assert!((summary.duration_min - 2.0).abs() < 1e-12);
        assert!((summary.average_rate_hz - 0.025).abs() < 1e-12);
    }

    #[test]
    fn fractions_are_formatted_to_five_decimals() {
        let events = [
            EventSpec::quiet(0).with_outer_hit(1).with_inner_hit(2),
            EventSpec::quiet(30),
            EventSpec::quiet(60),
        ];
        let summary = FileSummary::from_scan("run-02.dat", &scan(&events));
        let block = summary.format_block();
        assert!(block.contains("file name: run-02.dat"));
        assert!(block.contains("number of events: 3"));
        assert!(block.contains("fraction of events with single paddle: 0.33333"));
        assert!(block.contains("fraction of events with double paddle: 0.00000"));
        assert!(block.contains("file time in minutes: 1.0"));
        assert!(block.contains("average rate (Hz) in entire file: 0.1"));
    }

    #[test]
    fn every_fraction_stays_within_unit_interval() {
        let events = [
            EventSpec::quiet(0)
                .with_outer_hit(1)
                .with_inner_hit(1)
                .with_fiber([1, 0, 1, 0]),
            EventSpec::quiet(10)
                .with_outer_hit(2)
                .with_outer_hit(3)
                .with_inner_hit(4)
                .with_inner_hit(6),
        ];
        let summary = FileSummary::from_scan("run-03.dat", &scan(&events));
        let tallies = [
            summary.tally.two_big_paddle,
            summary.tally.one_big_paddle,
            summary.tally.single_paddle,
            summary.tally.single_paddle_or_more,
            summary.tally.double_paddle,
            summary.tally.fiber_trigger,
        ];
        for tally in tallies {
            let fraction = summary.fraction(tally);
            assert!((0.0..=1.0).contains(&fraction));
        }
    }

    #[test]
    fn append_never_truncates_prior_runs() {
        let dir = tempfile::tempdir().unwrap();
        let sink = dir.path().join("paddle-summary.out");

        let events = [EventSpec::quiet(0), EventSpec::quiet(60)];
        let summary = FileSummary::from_scan("run-04.dat", &scan(&events));
        append_summary(&sink, &summary).unwrap();
        append_summary(&sink, &summary).unwrap();

        let contents = std::fs::read_to_string(&sink).unwrap();
        assert_eq!(contents.matches("file name: run-04.dat").count(), 2);
        // Blocks are separated by a blank line.
        assert!(contents.contains("entire file: 0.0\n\nfile name:"));
    }
}
