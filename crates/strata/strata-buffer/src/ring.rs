//! Slot storage and ring link arithmetic.
//!
//! This module provides the foundational primitives for the shared ring:
//! - The slot cell type holding a payload, its level tag and its ring links
//! - Reset of the ring to its initial physical order
//! - `remap`, the single relinking step every insert path goes through
//!
//! # Ring Order
//!
//! Each slot stores the index of its successor and predecessor. Together the
//! links form one cycle through all `CAP` slots. The physical index of a slot
//! says nothing about its logical position; only the cycle does.
//!
//! ```text
//! physical:  [0] [1] [2] [3]
//! links:      0 -> 1 -> 3 -> 2 -> 0
//! ring order: 0, 1, 3, 2
//! ```
//!
//! Segments are contiguous runs of the ring order, so moving a segment
//! boundary never shifts data; it relinks one slot.

use crate::priority::Priority;

/// One storage cell of the buffer.
///
/// `priority` and `value` are only meaningful while `active` is set.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slot<T> {
    pub value: T,
    pub priority: Priority,
    pub active: bool,
    /// Successor in ring order.
    pub next: usize,
    /// Predecessor in ring order.
    pub prev: usize,
}

impl<T: Default> Slot<T> {
    /// An inactive slot linked into the initial ring `0 -> 1 -> ... -> cap-1 -> 0`.
    pub fn vacant(index: usize, cap: usize) -> Self {
        Self {
            value: T::default(),
            priority: Priority::Low,
            active: false,
            next: (index + 1) % cap,
            prev: (index + cap - 1) % cap,
        }
    }
}

/// Clears every slot and restores the initial ring order.
pub(crate) fn reset_links<T: Default>(slots: &mut [Slot<T>]) {
    let cap = slots.len();
    for (index, slot) in slots.iter_mut().enumerate() {
        *slot = Slot::vacant(index, cap);
    }
}

/// Detaches `s` from the ring, joining its neighbours.
///
/// The ring must hold more than one slot.
#[inline(always)]
fn unlink<T>(slots: &mut [Slot<T>], s: usize) {
    let (prev, next) = (slots[s].prev, slots[s].next);
    slots[prev].next = next;
    slots[next].prev = prev;
}

/// Inserts the detached slot `s` directly after `anchor`.
#[inline(always)]
fn link_after<T>(slots: &mut [Slot<T>], anchor: usize, s: usize) {
    let next = slots[anchor].next;
    slots[anchor].next = s;
    slots[s].prev = anchor;
    slots[s].next = next;
    slots[next].prev = s;
}

/// Moves slot `s` so that it directly follows `anchor` in ring order.
///
/// # How It Works
///
/// Three links change: the slot's old neighbours are joined, and the slot is
/// spliced in between `anchor` and its successor.
///
/// ```text
/// before:  anchor -> a'  ...  x -> s -> y
/// after:   anchor -> s -> a'  ...  x -> y
/// ```
///
/// Nothing moves when `s` already follows `anchor` or when `s` is the anchor
/// itself (a slot placed right before the first occupied segment when it is
/// also the last free slot).
///
/// # Returns
/// `true` if links were rewritten.
#[inline]
pub(crate) fn remap<T>(slots: &mut [Slot<T>], anchor: usize, s: usize) -> bool {
    if anchor == s || slots[anchor].next == s {
        return false;
    }
    unlink(slots, s);
    link_after(slots, anchor, s);
    true
}
