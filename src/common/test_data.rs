//! Builder for the synthetic data files used by the unit tests.
//!
//! Renders the same 26-line block structure the DAQ writes: a timing line,
//! three framed readout lines and four fiber count lines at their fixed
//! offsets, with filler everywhere else.

use crate::layout::{
    RecordLayout, FIBER_OFFSETS, INNER_A_OFFSET, INNER_B_OFFSET, OUTER_OFFSET, TIMESTAMP_OFFSET,
};

/// Readout value comfortably above the default hit threshold.
pub const PEDESTAL: i32 = 3000;

/// Readout value comfortably below the default hit threshold.
pub const HIT: i32 = 1000;

/// Raw per-event values rendered into one event block.
#[derive(Debug, Clone)]
pub struct EventSpec {
    pub seconds: u64,
    pub micros: u64,
    pub outer: [i32; 8],
    pub inner_a: [i32; 8],
    pub inner_b: [i32; 8],
    pub fiber: [u32; 4],
}

impl EventSpec {
    /// An event at the given time with every channel at pedestal.
    pub fn quiet(seconds: u64) -> Self {
        Self {
            seconds,
            micros: 0,
            outer: [PEDESTAL; 8],
            inner_a: [PEDESTAL; 8],
            inner_b: [PEDESTAL; 8],
            fiber: [0; 4],
        }
    }

    /// Drops the given outer paddle (id 1-8) below threshold.
    pub fn with_outer_hit(mut self, id: usize) -> Self {
        self.outer[id - 1] = HIT;
        self
    }

    /// Drops the given inner paddle (id 1-16) below threshold.
    pub fn with_inner_hit(mut self, id: usize) -> Self {
        if id <= 8 {
            self.inner_a[id - 1] = HIT;
        } else {
            self.inner_b[id - 9] = HIT;
        }
        self
    }

    /// Sets the four fiber layer counts.
    pub fn with_fiber(mut self, counts: [u32; 4]) -> Self {
        self.fiber = counts;
        self
    }

    fn render(&self, lines: &mut Vec<String>) {
        let start = lines.len();
        for _ in 0..RecordLayout::default().lines_per_event {
            lines.push("~".to_string());
        }
        lines[start + TIMESTAMP_OFFSET] = format!("EVENT {} {} trg", self.seconds, self.micros);
        lines[start + OUTER_OFFSET] = framed_line(&self.outer);
        lines[start + INNER_A_OFFSET] = framed_line(&self.inner_a);
        lines[start + INNER_B_OFFSET] = framed_line(&self.inner_b);
        for (layer, &count) in self.fiber.iter().enumerate() {
            lines[start + FIBER_OFFSETS[layer]] = format!("layer{} {}", layer + 1, count);
        }
    }
}

/// A readout line: framing marker, 8 raw values, framing marker.
fn framed_line(values: &[i32; 8]) -> String {
    let mut line = String::from("ch0");
    for value in values {
        line.push(' ');
        line.push_str(&value.to_string());
    }
    line.push_str(" end");
    line
}

/// Renders a complete data file: 25 filler header lines plus one block per
/// event.
pub fn render_log(events: &[EventSpec]) -> Vec<String> {
    let layout = RecordLayout::default();
    let mut lines = Vec::with_capacity(layout.header_lines + layout.lines_per_event * events.len());
    for i in 0..layout.header_lines {
        lines.push(format!("header line {i}"));
    }
    for event in events {
        event.render(&mut lines);
    }
    lines
}
