//! Fixed geometry of the hodoscope data file.
//!
//! A file is a 25-line header followed by one 26-line block per event.
//! All interesting lines sit at fixed offsets inside a block; everything in
//! this module is plain offset arithmetic with no error conditions.

/// Intra-block offset of the event timing line.
pub const TIMESTAMP_OFFSET: usize = 0;

/// Intra-block offset of the outer-paddle readout line.
pub const OUTER_OFFSET: usize = 11;

/// Intra-block offset of the inner-paddle readout line carrying ids 1-8.
pub const INNER_A_OFFSET: usize = 13;

/// Intra-block offset of the inner-paddle readout line carrying ids 9-16.
pub const INNER_B_OFFSET: usize = 15;

/// Intra-block offsets of the four fiber layer count lines, layers 1-4.
pub const FIBER_OFFSETS: [usize; 4] = [16, 18, 20, 23];

/// Describes where each readout line lives inside a data file.
///
/// The defaults match the DAQ output this tool was written for: a 25-line
/// header, 26 lines per event, 8 outer and 16 inner paddles, and a raw
/// readout value of 1200 separating hits from pedestal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Number of fixed header lines before the first event block.
    pub header_lines: usize,
    /// Number of lines in one event block.
    pub lines_per_event: usize,
    /// Number of outer (big) paddles; ids run 1..=outer_paddles.
    pub outer_paddles: usize,
    /// Number of inner (small) paddles; ids run 1..=inner_paddles.
    pub inner_paddles: usize,
    /// Raw readout value below which a paddle counts as hit.
    pub hit_threshold: i32,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            header_lines: 25,
            lines_per_event: 26,
            outer_paddles: 8,
            inner_paddles: 16,
            hit_threshold: 1200,
        }
    }
}

impl RecordLayout {
    /// First line (0-based) of the given event's block.
    pub fn event_start(&self, event: usize) -> usize {
        self.header_lines + self.lines_per_event * event
    }

    /// Line holding the event's timing fields.
    pub fn timestamp_line(&self, event: usize) -> usize {
        self.event_start(event) + TIMESTAMP_OFFSET
    }

    /// Line holding the outer-paddle readout values.
    pub fn outer_line(&self, event: usize) -> usize {
        self.event_start(event) + OUTER_OFFSET
    }

    /// Line holding the readout values of inner paddles 1-8.
    pub fn inner_line_a(&self, event: usize) -> usize {
        self.event_start(event) + INNER_A_OFFSET
    }

    /// Line holding the readout values of inner paddles 9-16.
    pub fn inner_line_b(&self, event: usize) -> usize {
        self.event_start(event) + INNER_B_OFFSET
    }

    /// Line holding the hit count of fiber layer `layer` (1-based, 1..=4).
    pub fn fiber_layer_line(&self, event: usize, layer: usize) -> usize {
        debug_assert!((1..=FIBER_OFFSETS.len()).contains(&layer));
        self.event_start(event) + FIBER_OFFSETS[layer - 1]
    }

    /// Number of raw values carried by a single readout line.
    ///
    /// Every readout line carries one value per outer paddle; the inner
    /// paddles are split across two such lines of 8 values each.
    pub fn channels_per_line(&self) -> usize {
        self.outer_paddles
    }
}
