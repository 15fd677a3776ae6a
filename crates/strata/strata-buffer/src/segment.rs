/// Bookkeeping for the run of ring order holding one priority level.
///
/// `head` is the slot of the oldest element, `tail` the slot of the newest.
/// An empty segment claims no slot and has `head == tail`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Segment {
    head: usize,
    tail: usize,
    len: usize,
}

impl Segment {
    pub(crate) const EMPTY: Segment = Segment {
        head: 0,
        tail: 0,
        len: 0,
    };

    #[inline(always)]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline(always)]
    pub fn tail(&self) -> usize {
        self.tail
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Records `slot` as the new newest element.
    #[inline]
    pub(crate) fn push_back(&mut self, slot: usize) {
        if self.len == 0 {
            self.head = slot;
        }
        self.tail = slot;
        self.len += 1;
    }

    /// Drops the oldest element; `next` is the ring successor of the old head.
    #[inline]
    pub(crate) fn advance_head(&mut self, next: usize) {
        debug_assert!(self.len > 0, "advance_head on empty segment");
        self.len -= 1;
        if self.len == 0 {
            *self = Self::EMPTY;
        } else {
            self.head = next;
        }
    }
}
