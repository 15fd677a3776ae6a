//! The priority-partitioned ring.
//!
//! # Layout
//!
//! All `CAP` slots sit on one linked ring (see [`crate::ring`]). Occupied
//! slots are grouped into one segment per level, laid out around the ring in
//! precedence order, followed by the free region:
//!
//! ```text
//!            first occupied                         bridge
//!                  v                                  v
//!   ... free ] [ HIGH oldest..newest ] [ MID ... ] [ LOW ... ] [ free ...
//!                                                      \___ wraps back ___/
//! ```
//!
//! - Retrieval pops the head of the highest non-empty segment. That slot is
//!   always the first occupied slot, so it simply becomes the last free slot.
//! - Insertion takes the first free slot (the bridge) or, when full, the head
//!   of the evicted segment, and remaps it behind the tail of the inserting
//!   level.
//!
//! Both paths touch a constant number of links regardless of `CAP`.

use crate::error::{BufferError, Result};
use crate::priority::Priority;
use crate::ring::{self, Slot};
use crate::segment::Segment;
use tracing::{debug, trace};

/// Behaviour of a full buffer when the inserting level is the lowest level
/// holding data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OverflowPolicy {
    /// Evict the level's own oldest element, like a plain ring buffer.
    #[default]
    Overwrite,
    /// Refuse the insert with [`BufferError::BufferFull`].
    Reject,
}

/// Result of an index-mode insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// Slot now holding the new element.
    pub slot: usize,
    /// Level of the element that previously occupied `slot`, if one was evicted.
    pub evicted: Option<Priority>,
}

/// Fixed-capacity circular buffer shared by three priority levels.
///
/// # Type Parameters
/// - `T`: payload, copied in and out.
/// - `CAP`: number of slots, at least [`Priority::COUNT`].
///
/// Not internally synchronized; mutation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct PriorityBuffer<T, const CAP: usize> {
    slots: [Slot<T>; CAP],
    segments: [Segment; Priority::COUNT],
    /// Active element count.
    len: usize,
    /// First free slot in ring order. Meaningless while full.
    bridge: usize,
    policy: OverflowPolicy,
}

impl<T: Copy + Default, const CAP: usize> PriorityBuffer<T, CAP> {
    pub fn new() -> Self {
        Self::with_policy(OverflowPolicy::default())
    }

    pub fn with_policy(policy: OverflowPolicy) -> Self {
        const {
            assert!(
                CAP >= Priority::COUNT,
                "capacity must hold at least one slot per priority level"
            )
        };
        Self {
            slots: std::array::from_fn(|i| Slot::vacant(i, CAP)),
            segments: [Segment::EMPTY; Priority::COUNT],
            len: 0,
            bridge: 0,
            policy,
        }
    }

    /// Empties every level and restores the initial ring. Idempotent.
    pub fn reset(&mut self) {
        ring::reset_links(&mut self.slots);
        self.segments = [Segment::EMPTY; Priority::COUNT];
        self.len = 0;
        self.bridge = 0;
        debug!(capacity = CAP, "priority buffer reset");
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == CAP
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Number of elements held at `priority`.
    pub fn level_len(&self, priority: Priority) -> usize {
        self.segments[priority.index()].len()
    }

    /// Whether `priority` currently holds any element.
    pub fn is_active(&self, priority: Priority) -> bool {
        !self.segments[priority.index()].is_empty()
    }

    /// Head/tail bookkeeping of one level.
    pub fn segment(&self, priority: Priority) -> Segment {
        self.segments[priority.index()]
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn set_overflow_policy(&mut self, policy: OverflowPolicy) {
        self.policy = policy;
    }

    /// Inserts `value` at `priority`.
    ///
    /// When the buffer is full, one element is evicted first:
    /// 1. the oldest element of the lowest non-empty level strictly below `priority`;
    /// 2. otherwise, under [`OverflowPolicy::Overwrite`], the oldest element of
    ///    `priority` itself.
    ///
    /// # Returns
    /// The evicted element, if any.
    ///
    /// # Errors
    /// [`BufferError::BufferFull`] when no element may be evicted. The buffer
    /// is left unchanged.
    pub fn insert(&mut self, priority: Priority, value: T) -> Result<Option<(Priority, T)>> {
        let reservation = self.insert_index(priority)?;
        let cell = &mut self.slots[reservation.slot];
        let evicted = reservation.evicted.map(|level| (level, cell.value));
        cell.value = value;
        Ok(evicted)
    }

    /// Like [`insert`](Self::insert) but takes a raw level.
    ///
    /// # Errors
    /// [`BufferError::InvalidPriority`] for levels outside `0..=2`, otherwise as `insert`.
    pub fn insert_level(&mut self, level: u8, value: T) -> Result<Option<(Priority, T)>> {
        let priority = Priority::try_from(level)?;
        self.insert(priority, value)
    }

    /// Claims a slot for a new element at `priority` without writing a payload.
    ///
    /// Applies the same eviction policy as [`insert`](Self::insert). Callers
    /// that keep payloads in their own `CAP`-sized array write to the returned
    /// slot; when `evicted` is set, the payload previously stored there is gone.
    pub fn insert_index(&mut self, priority: Priority) -> Result<Reservation> {
        let (slot, evicted) = if self.is_full() {
            let Some(victim) = self.victim_for(priority) else {
                debug!(%priority, "insert rejected, buffer full");
                return Err(BufferError::BufferFull { priority });
            };
            (self.pop_head(victim), Some(victim))
        } else {
            let slot = self.bridge;
            self.bridge = self.slots[slot].next;
            (slot, None)
        };

        if let Some(anchor) = self.anchor_for(priority) {
            ring::remap(&mut self.slots, anchor, slot);
        }

        let cell = &mut self.slots[slot];
        cell.priority = priority;
        cell.active = true;
        self.segments[priority.index()].push_back(slot);

        match evicted {
            Some(victim) => debug!(%priority, %victim, slot, "evicted oldest element to make room"),
            None => {
                self.len += 1;
                trace!(%priority, slot, len = self.len, "inserted");
            }
        }

        Ok(Reservation { slot, evicted })
    }

    /// Removes the oldest element of the highest non-empty level.
    ///
    /// # Errors
    /// [`BufferError::BufferEmpty`] when nothing is buffered.
    pub fn retrieve(&mut self) -> Result<(Priority, T)> {
        let (priority, slot) = self.retrieve_index()?;
        Ok((priority, self.slots[slot].value))
    }

    /// Index-mode counterpart of [`retrieve`](Self::retrieve).
    ///
    /// The returned slot stays readable by the caller until the next insert.
    pub fn retrieve_index(&mut self) -> Result<(Priority, usize)> {
        let priority = self.highest_active().ok_or(BufferError::BufferEmpty)?;
        if self.is_full() {
            // freed slot becomes the whole free region
            self.bridge = self.segments[priority.index()].head();
        }
        let slot = self.pop_head(priority);
        self.len -= 1;
        trace!(%priority, slot, len = self.len, "retrieved");
        Ok((priority, slot))
    }

    /// Elements in retrieval order: `High` oldest to newest, then `Mid`, then `Low`.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &T)> + '_ {
        Priority::ALL
            .into_iter()
            .rev()
            .flat_map(move |priority| self.iter_level(priority))
    }

    /// Elements of one level, oldest first.
    pub fn iter_level(&self, priority: Priority) -> impl Iterator<Item = (Priority, &T)> + '_ {
        let segment = self.segments[priority.index()];
        let mut cursor = segment.head();
        (0..segment.len()).map(move |_| {
            let slot = &self.slots[cursor];
            cursor = slot.next;
            (priority, &slot.value)
        })
    }

    /// Lowest non-empty level strictly below `priority`, else `priority` itself
    /// when overwriting is allowed and it holds data.
    fn victim_for(&self, priority: Priority) -> Option<Priority> {
        Priority::ALL
            .into_iter()
            .take_while(|&level| level < priority)
            .find(|&level| self.is_active(level))
            .or_else(|| {
                (self.policy == OverflowPolicy::Overwrite && self.is_active(priority))
                    .then_some(priority)
            })
    }

    /// Slot a new `priority` element must follow in ring order.
    ///
    /// That is the level's own tail, else the tail of the nearest higher
    /// non-empty level, else the slot preceding the first occupied segment.
    /// `None` only for an empty buffer, where any free slot will do.
    fn anchor_for(&self, priority: Priority) -> Option<usize> {
        let own = self.segments[priority.index()];
        if !own.is_empty() {
            return Some(own.tail());
        }
        if let Some(higher) = Priority::ALL
            .into_iter()
            .filter(|&level| level > priority)
            .find(|&level| self.is_active(level))
        {
            return Some(self.segments[higher.index()].tail());
        }
        self.highest_active()
            .map(|first| self.slots[self.segments[first.index()].head()].prev)
    }

    fn highest_active(&self) -> Option<Priority> {
        Priority::ALL
            .into_iter()
            .rev()
            .find(|&level| self.is_active(level))
    }

    /// Detaches the oldest element of `priority` from its segment. The slot
    /// keeps its ring position and payload.
    fn pop_head(&mut self, priority: Priority) -> usize {
        let segment = &mut self.segments[priority.index()];
        let slot = segment.head();
        segment.advance_head(self.slots[slot].next);
        self.slots[slot].active = false;
        slot
    }
}

impl<T: Copy + Default, const CAP: usize> Default for PriorityBuffer<T, CAP> {
    fn default() -> Self {
        Self::new()
    }
}
