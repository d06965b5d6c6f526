//! Coincidence predicates over one event's hits.
//!
//! All functions here are pure and total; they classify a decoded event
//! without touching any state. The inner paddles are paired two-per-outer:
//! outer paddle `o` is fronted by inner paddles `2*o - 1` and `2*o`, so
//! outer 1 maps to inner {1, 2} and outer 8 to inner {15, 16}.

use crate::common::{FiberLayerCounts, PaddleHit};

/// Tests whether either of the two small paddles directly in front of outer
/// paddle `outer_id` fired.
pub fn front_inner_hit(hit: &PaddleHit, outer_id: u8) -> bool {
    hit.inner.contains(&(outer_id * 2)) || hit.inner.contains(&(outer_id * 2 - 1))
}

/// Exactly two big paddles fired.
pub fn is_two_big_paddle(hit: &PaddleHit) -> bool {
    hit.outer.len() == 2
}

/// Exactly one big paddle fired.
pub fn is_one_big_paddle(hit: &PaddleHit) -> bool {
    hit.outer.len() == 1
}

/// A single paddle count: exactly one big paddle fired, in coincidence with
/// one of the two small paddles right in front of it.
pub fn is_single_paddle(hit: &PaddleHit) -> bool {
    match hit.outer.as_slice() {
        [outer_id] => front_inner_hit(hit, *outer_id),
        _ => false,
    }
}

/// At least a single paddle count: one or more big paddles fired and the
/// first (lowest-id) of them is in coincidence with its front pair.
///
/// Only the first outer paddle is ever tested, even when several fired;
/// additional big-paddle hits are allowed but not examined.
pub fn is_single_paddle_or_more(hit: &PaddleHit) -> bool {
    match hit.outer.first() {
        Some(&outer_id) => front_inner_hit(hit, outer_id),
        None => false,
    }
}

/// A double paddle count: a coincidence of two single paddle counts, i.e.
/// exactly two big paddles fired and each one's front pair fired too.
pub fn is_double_paddle(hit: &PaddleHit) -> bool {
    match hit.outer.as_slice() {
        [first, second] => front_inner_hit(hit, *first) && front_inner_hit(hit, *second),
        _ => false,
    }
}

/// The fiber trigger condition: at least one hit in the upper layer pair
/// (layer 1 or 2) and at least one in the lower pair (layer 3 or 4).
pub fn fiber_trigger(counts: &FiberLayerCounts) -> bool {
    (counts.layer1 > 0 || counts.layer2 > 0) && (counts.layer3 > 0 || counts.layer4 > 0)
}
