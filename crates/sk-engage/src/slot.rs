//! Slot assignment: which anchor on the targeted unit the mover gets.

use sk_core::Vec2;

/// Pick the anchor closest to `mover`.
///
/// Returns the anchor's index and world position, or `None` when there are
/// no anchors.  Ties go to the earliest anchor in the list, so the result is
/// deterministic for a given anchor order.
pub fn best_slot(anchors: &[Vec2], mover: Vec2) -> Option<(usize, Vec2)> {
    let mut best: Option<(usize, Vec2, f32)> = None;
    for (index, &anchor) in anchors.iter().enumerate() {
        // Squared distance preserves ordering, including exact ties.
        let d = anchor.distance_squared(mover);
        if best.is_none_or(|(_, _, best_d)| d < best_d) {
            best = Some((index, anchor, d));
        }
    }
    best.map(|(index, anchor, _)| (index, anchor))
}
