//! Clone pool sizing and the slot plan handed to the renderer.

use crate::index::ExtendedSpace;

/// Clone copies to render on each side of the canonical block.
///
/// One gesture can move at most `max_speed` velocity slides plus roughly one
/// slide of raw drag, and the window must still show `visible_items` full
/// slots at the far end. The pool covers that reach so a fast flick never
/// runs off the rendered track before re-homing, and never drops below
/// `clone_assist_factor` copies.
pub fn copies_per_side(
    len: usize,
    visible_items: usize,
    max_speed: usize,
    clone_assist_factor: usize,
) -> usize {
    let assist = clone_assist_factor.max(1);
    if len == 0 {
        return assist;
    }
    let reach = max_speed
        .saturating_add(1)
        .saturating_add(visible_items.max(1));
    assist.max(reach.div_ceil(len))
}

/// One rendered item slot on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TrackSlot {
    /// Position on the track.
    pub slot: usize,
    /// Sequence item rendered in this slot.
    pub item: usize,
    /// Which copy of the sequence this slot belongs to.
    pub copy: usize,
    /// True for slots in the canonical block.
    pub canonical: bool,
    /// Share of the viewport width, in percent.
    pub width_percent: f32,
}

/// Every slot the renderer must materialize, in track order.
pub fn slot_plan(space: &ExtendedSpace) -> Vec<TrackSlot> {
    let len = space.len();
    if len == 0 {
        return Vec::new();
    }
    let width_percent = 100.0 / space.visible_items() as f32;
    let canonical_copy = space.copies_before();
    (0..space.slot_count())
        .map(|slot| {
            let copy = slot / len;
            TrackSlot {
                slot,
                item: slot % len,
                copy,
                canonical: copy == canonical_copy,
                width_percent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WrapMode;

    #[test]
    fn small_reach_uses_single_pad_copy() {
        // Five items, flick cap of two: one clone block each side suffices.
        assert_eq!(copies_per_side(5, 1, 2, 1), 1);
    }

    #[test]
    fn pool_grows_for_short_sequences() {
        assert_eq!(copies_per_side(2, 1, 1, 1), 2);
        assert_eq!(copies_per_side(1, 1, 0, 1), 2);
        assert_eq!(copies_per_side(3, 3, 4, 1), 3);
    }

    #[test]
    fn assist_factor_is_a_floor() {
        assert_eq!(copies_per_side(20, 1, 2, 3), 3);
        assert_eq!(copies_per_side(20, 1, 2, 0), 1);
    }

    #[test]
    fn huge_flick_cap_saturates_instead_of_overflowing() {
        assert_eq!(copies_per_side(5, 1, usize::MAX, 1), usize::MAX.div_ceil(5));
        assert_eq!(copies_per_side(1, usize::MAX, usize::MAX, 1), usize::MAX);
    }

    #[test]
    fn slot_plan_marks_canonical_copy() {
        let space = ExtendedSpace::new(3, WrapMode::Infinite, 2, 1);
        let plan = slot_plan(&space);
        assert_eq!(plan.len(), 9);
        assert_eq!(plan[4].item, 1);
        assert_eq!(plan[4].copy, 1);
        assert!(plan[4].canonical);
        assert!(!plan[0].canonical);
        assert!(!plan[8].canonical);
        assert!(plan.iter().all(|s| s.width_percent == 50.0));
    }

    #[test]
    fn finite_plan_is_the_sequence() {
        let space = ExtendedSpace::new(4, WrapMode::Finite, 1, 0);
        let plan = slot_plan(&space);
        assert_eq!(plan.len(), 4);
        assert!(plan.iter().all(|s| s.canonical));
    }

    #[test]
    fn empty_sequence_has_no_slots() {
        let space = ExtendedSpace::new(0, WrapMode::Infinite, 1, 1);
        assert!(slot_plan(&space).is_empty());
    }
}
