/// Identifiers of the paddles that fired in one event.
///
/// Outer (big) paddle ids run 1-8, inner (small) paddle ids 1-16. The inner
/// paddles are paired two-per-outer-paddle: outer paddle `o` sits behind
/// inner paddles `2*o - 1` and `2*o`.
///
/// Both lists are ascending by construction and empty, not absent, when no
/// paddle in that tier fired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaddleHit {
    /// Ids of the outer paddles whose readout fell below threshold.
    pub outer: Vec<u8>,
    /// Ids of the inner paddles whose readout fell below threshold.
    pub inner: Vec<u8>,
}

/// Per-event hit counts of the four scintillating fiber layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FiberLayerCounts {
    pub layer1: u32,
    pub layer2: u32,
    pub layer3: u32,
    pub layer4: u32,
}

/// One fully decoded event block.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Paddles that fired in this event.
    pub paddles: PaddleHit,
    /// Fiber layer hit counts for this event.
    pub fiber: FiberLayerCounts,
    /// Event time in seconds, reconstructed from the integer-seconds and
    /// microseconds fields of the timing line.
    pub timestamp: f64,
}

/// Running per-category event counters for one file.
///
/// Each counter is incremented at most once per event during the scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    /// Events with exactly two big paddle hits.
    pub two_big_paddle: u64,
    /// Events with exactly one big paddle hit.
    pub one_big_paddle: u64,
    /// Events with a single paddle count (big paddle + matching front pair).
    pub single_paddle: u64,
    /// Events with at least a single paddle count.
    pub single_paddle_or_more: u64,
    /// Events with a double paddle count.
    pub double_paddle: u64,
    /// Events satisfying the fiber trigger condition.
    pub fiber_trigger: u64,
}
