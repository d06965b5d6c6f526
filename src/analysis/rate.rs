//! Event-rate histogram over the file's time span
//!
//! Bins every event's offset from the first event into a fixed number of
//! equal-width bins. The trailing bin only ever sees the boundary event(s)
//! at the very end of the span, so it is excised from the returned
//! histogram rather than reported with a misleading count.

use tabled::{Table, Tabled};
use thiserror::Error;

/// Errors raised when a histogram cannot be built.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistogramError {
    #[error("At least 2 bins are required to bin event rates, got {0}")]
    TooFewBins(usize),

    #[error("Cannot bin events over an empty or zero-width time span")]
    ZeroSpan,
}

type Result<T> = core::result::Result<T, HistogramError>;

/// One histogram bin: events falling in `[start_secs, start_secs + width)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateBin {
    /// Lower edge of the bin, seconds after the first event.
    pub start_secs: f64,
    /// Number of events in the bin.
    pub count: u64,
}

/// Event counts against elapsed time, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct RateHistogram {
    pub bins: Vec<RateBin>,
    /// Width of every bin in seconds.
    pub bin_width_secs: f64,
}

/// Builds the event-rate histogram.
///
/// The span from the first to the last timestamp is divided into
/// `bin_count` equal-width bins; each event increments the bin holding its
/// offset from the first event. The final bin catches the boundary event
/// sitting exactly at the end of the span and is dropped from the result,
/// so the returned histogram holds `bin_count - 1` bins.
///
/// # Arguments
/// * `timestamps` - Per-event times in seconds, file order
/// * `bin_count` - Number of equal-width bins to partition the span into
///
/// # Returns
/// * `Ok(RateHistogram)` - Histogram with the unreliable trailing bin removed
/// * `Err(HistogramError)` - Fewer than 2 bins requested, or the span is
///   empty or has zero width
pub fn bin_event_rate(timestamps: &[f64], bin_count: usize) -> Result<RateHistogram> {
    if bin_count < 2 {
        return Err(HistogramError::TooFewBins(bin_count));
    }
    let (first, last) = match (timestamps.first(), timestamps.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(HistogramError::ZeroSpan),
    };
    let span = last - first;
    if span <= 0.0 {
        return Err(HistogramError::ZeroSpan);
    }

    let bin_width_secs = span / bin_count as f64;
    let mut counts = vec![0u64; bin_count];
    for &timestamp in timestamps {
        // The boundary event at exactly `span` lands one past the end;
        // it belongs to the trailing bin that is dropped below.
        let bin = (((timestamp - first) / bin_width_secs) as usize).min(bin_count - 1);
        counts[bin] += 1;
    }
    counts.truncate(bin_count - 1);

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| RateBin {
            start_secs: index as f64 * bin_width_secs,
            count,
        })
        .collect();
    Ok(RateHistogram {
        bins,
        bin_width_secs,
    })
}

/// Formats the histogram as an ASCII table.
///
/// # Arguments
/// * `histogram` - The histogram to format
/// * `title` - Optional title printed above the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_rate_table(histogram: &RateHistogram, title: Option<&str>) -> String {
    #[derive(Tabled)]
    struct RateRow {
        #[tabled(rename = "Bin start (s)")]
        start: String,
        #[tabled(rename = "Events")]
        count: u64,
    }

    let rows: Vec<RateRow> = histogram
        .bins
        .iter()
        .map(|bin| RateRow {
            start: format!("{:.3}", bin.start_secs),
            count: bin.count,
        })
        .collect();
    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
