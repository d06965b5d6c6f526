//! Loading and decoding of hodoscope data files
//!
//! This module handles the two fallible stages in front of the analysis:
//! - [`EventLog::from_path`] reads a file and validates its block structure
//! - [`EventLog::parse_event`] decodes one event block into an [`EventRecord`]
//!
//! Both failure kinds are fatal for the whole run; there is no per-event
//! recovery in this tool.

use crate::common::{EventRecord, FiberLayerCounts, PaddleHit};
use crate::layout::RecordLayout;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a data file, before any event is decoded.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error(
        "File holds {total_lines} lines, which is not a {header_lines}-line \
         header plus a whole number of {lines_per_event}-line event blocks"
    )]
    BlockMismatch {
        total_lines: usize,
        header_lines: usize,
        lines_per_event: usize,
    },

    #[error("File holds no event blocks after the {0}-line header")]
    NoEvents(usize),
}

/// Errors raised while decoding a single event block.
///
/// Line numbers are 1-based, as an operator would count them in an editor.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Line {0} is missing from the file")]
    MissingLine(usize),

    #[error("Line {line}: expected {expected} whitespace-separated fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: field '{token}' is not an integer")]
    BadInteger { line: usize, token: String },
}

type Result<T> = core::result::Result<T, ParseError>;

/// A loaded data file whose block structure has been validated.
#[derive(Debug, Clone)]
pub struct EventLog {
    lines: Vec<String>,
    layout: RecordLayout,
    event_count: usize,
}

impl EventLog {
    /// Reads a data file and validates its block structure.
    ///
    /// # Arguments
    /// * `path` - Path to the data file
    /// * `layout` - Record geometry to decode the file with
    ///
    /// # Returns
    /// * `Ok(EventLog)` - File read and block invariant satisfied
    /// * `Err(LogError)` - I/O failure, ragged block structure, or no events
    pub fn from_path(path: &Path, layout: RecordLayout) -> core::result::Result<Self, LogError> {
        let content = fs::read_to_string(path)?;
        Self::from_lines(content.lines().map(str::to_owned).collect(), layout)
    }

    /// Validates and wraps an already-loaded set of lines.
    ///
    /// The line count must be the header plus a whole number of event
    /// blocks, with at least one block present.
    pub fn from_lines(
        lines: Vec<String>,
        layout: RecordLayout,
    ) -> core::result::Result<Self, LogError> {
        let total_lines = lines.len();
        if total_lines < layout.header_lines + layout.lines_per_event {
            return Err(LogError::NoEvents(layout.header_lines));
        }
        let payload = total_lines - layout.header_lines;
        if payload % layout.lines_per_event != 0 {
            return Err(LogError::BlockMismatch {
                total_lines,
                header_lines: layout.header_lines,
                lines_per_event: layout.lines_per_event,
            });
        }
        Ok(Self {
            lines,
            layout,
            event_count: payload / layout.lines_per_event,
        })
    }

    /// Number of event blocks in the file.
    pub fn event_count(&self) -> usize {
        self.event_count
    }

    /// Decodes one event block.
    ///
    /// # Arguments
    /// * `event` - Event index in `[0, event_count)`
    ///
    /// # Returns
    /// * `Ok(EventRecord)` - Paddle hit sets, fiber layer counts and timestamp
    /// * `Err(ParseError)` - A required line is missing or malformed
    pub fn parse_event(&self, event: usize) -> Result<EventRecord> {
        debug_assert!(event < self.event_count);
        let outer = self.parse_readout_line(self.layout.outer_line(event), 1)?;
        let mut inner = self.parse_readout_line(self.layout.inner_line_a(event), 1)?;
        inner.extend(self.parse_readout_line(self.layout.inner_line_b(event), 9)?);
        let fiber = FiberLayerCounts {
            layer1: self.parse_fiber_count(self.layout.fiber_layer_line(event, 1))?,
            layer2: self.parse_fiber_count(self.layout.fiber_layer_line(event, 2))?,
            layer3: self.parse_fiber_count(self.layout.fiber_layer_line(event, 3))?,
            layer4: self.parse_fiber_count(self.layout.fiber_layer_line(event, 4))?,
        };
        let timestamp = self.parse_timestamp(self.layout.timestamp_line(event))?;
        Ok(EventRecord {
            paddles: PaddleHit { outer, inner },
            fiber,
            timestamp,
        })
    }

    fn line(&self, index: usize) -> Result<&str> {
        self.lines
            .get(index)
            .map(String::as_str)
            .ok_or(ParseError::MissingLine(index + 1))
    }

    /// Parses one readout line into the ids of the paddles below threshold.
    ///
    /// The first and last fields are framing, not data; the 8 values in
    /// between map positionally onto paddle ids starting at `first_id`.
    fn parse_readout_line(&self, index: usize, first_id: u8) -> Result<Vec<u8>> {
        let line = self.line(index)?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let expected = self.layout.channels_per_line() + 2;
        if tokens.len() != expected {
            return Err(ParseError::FieldCount {
                line: index + 1,
                expected,
                found: tokens.len(),
            });
        }
        let mut hits = Vec::new();
        for (position, token) in tokens[1..tokens.len() - 1].iter().enumerate() {
            let value: i32 = parse_field(token, index)?;
            if value < self.layout.hit_threshold {
                hits.push(first_id + position as u8);
            }
        }
        Ok(hits)
    }

    /// Parses a fiber layer count line; the second field is the count.
    fn parse_fiber_count(&self, index: usize) -> Result<u32> {
        let line = self.line(index)?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(ParseError::FieldCount {
                line: index + 1,
                expected: 2,
                found: tokens.len(),
            });
        }
        parse_field(tokens[1], index)
    }

    /// Parses a timing line into seconds since the epoch of the run.
    ///
    /// The second and third fields are integer seconds and microseconds;
    /// the reconstructed time is `seconds + microseconds * 1e-6`.
    fn parse_timestamp(&self, index: usize) -> Result<f64> {
        let line = self.line(index)?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(ParseError::FieldCount {
                line: index + 1,
                expected: 3,
                found: tokens.len(),
            });
        }
        let seconds: u64 = parse_field(tokens[1], index)?;
        let micros: u64 = parse_field(tokens[2], index)?;
        Ok(seconds as f64 + micros as f64 * 1e-6)
    }
}

fn parse_field<T: core::str::FromStr>(token: &str, index: usize) -> Result<T> {
    token.parse().map_err(|_| ParseError::BadInteger {
        line: index + 1,
        token: token.to_string(),
    })
}
