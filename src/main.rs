mod analysis;
mod common;
mod layout;
mod parsing;

use analysis::rate::HistogramError;
use analysis::{append_summary, bin_event_rate, format_rate_table, scan_events, FileSummary};
use argh::FromArgs;
use layout::RecordLayout;
use parsing::{EventLog, LogError, ParseError};
use std::path::PathBuf;
use thiserror::Error;

/// Coincidence statistics for paddle hodoscope data files
#[derive(FromArgs, Debug)]
pub struct Args {
    /// data file to analyze
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// results file the summary is appended to (default: paddle-summary.out)
    #[argh(option, short = 'o', default = "PathBuf::from(\"paddle-summary.out\")")]
    output: PathBuf,

    /// raw readout value below which a paddle counts as hit (default: 1200)
    #[argh(option, short = 't', default = "1200")]
    threshold: i32,

    /// number of fixed header lines before the first event block (default: 25)
    #[argh(option, default = "25")]
    header_lines: usize,

    /// also print an event-rate histogram with this many bins
    #[argh(option, short = 'b')]
    rate_bins: Option<usize>,
}

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Malformed data file: {0}")]
    Log(#[from] LogError),

    #[error("Event decode error: {0}")]
    Parse(#[from] ParseError),

    #[error("Rate histogram error: {0}")]
    Histogram(#[from] HistogramError),

    #[error("Failed to write results: {0}")]
    ReportWrite(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, AnalysisError>;

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    // Check if input file exists
    if !args.input.exists() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(1);
    }

    let layout = RecordLayout {
        hit_threshold: args.threshold,
        header_lines: args.header_lines,
        ..RecordLayout::default()
    };

    // Load the file and classify every event in one pass
    let log = EventLog::from_path(&args.input, layout)?;
    let scan = scan_events(&log)?;

    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());
    let summary = FileSummary::from_scan(&file_name, &scan);

    // Append to the results sink, then echo the same block to the operator
    append_summary(&args.output, &summary)?;
    print!("{}", summary.format_block());

    if let Some(bins) = args.rate_bins {
        let histogram = bin_event_rate(&scan.timestamps, bins)?;
        let title = format!(
            "Event Rate Over File Time ({:.3} s bins)",
            histogram.bin_width_secs
        );
        println!();
        println!("{}", format_rate_table(&histogram, Some(&title)));
    }

    Ok(())
}
