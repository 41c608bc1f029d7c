//! Display ordering and the reorder plan.
//!
//! Questions are shown by ascending `order` rank; records sharing a rank are
//! shown newest first. A reorder request carries the full list of ids in the
//! desired sequence and every id receives its position as the new rank.

use std::collections::HashMap;

use crate::types::{DbId, Timestamp};

/// Anything that can be placed in display order.
pub trait Ranked {
    fn rank(&self) -> i32;
    fn created_at(&self) -> Timestamp;
}

/// Sort ascending by rank, then descending by creation time.
///
/// The sort is stable, so records equal on both keys keep their relative
/// position.
pub fn sort_for_display<T: Ranked>(items: &mut [T]) {
    items.sort_by(|a, b| {
        a.rank()
            .cmp(&b.rank())
            .then_with(|| b.created_at().cmp(&a.created_at()))
    });
}

/// True when `items` already satisfy [`sort_for_display`] ordering.
pub fn is_display_ordered<T: Ranked>(items: &[T]) -> bool {
    items.windows(2).all(|w| {
        let (a, b) = (&w[0], &w[1]);
        a.rank() < b.rank() || (a.rank() == b.rank() && a.created_at() >= b.created_at())
    })
}

/// Turn a requested id sequence into `(id, rank)` assignments.
///
/// An id listed more than once keeps its last position, which is what
/// applying the assignments one after another would produce. The result is
/// sorted by rank. Ids not present in the input are not touched.
pub fn plan_reorder(ordered_ids: &[DbId]) -> Vec<(DbId, i32)> {
    let mut last_position: HashMap<DbId, i32> = HashMap::with_capacity(ordered_ids.len());
    for (position, id) in ordered_ids.iter().enumerate() {
        // Lists longer than i32::MAX are not a realistic input.
        let rank = i32::try_from(position).unwrap_or(i32::MAX);
        last_position.insert(*id, rank);
    }

    let mut plan: Vec<(DbId, i32)> = last_position.into_iter().collect();
    plan.sort_by_key(|&(_, rank)| rank);
    plan
}
