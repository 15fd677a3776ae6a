use crate::priority::Priority;

/// Failures reported by [`PriorityBuffer`](crate::PriorityBuffer) operations.
///
/// Every failure leaves the buffer exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("priority level {0} is outside 0..=2")]
    InvalidPriority(u8),

    /// The buffer is full and holds nothing the policy allows evicting for
    /// an insert at `priority`.
    #[error("buffer full, nothing evictable for a {priority} insert")]
    BufferFull { priority: Priority },

    #[error("buffer empty")]
    BufferEmpty,
}

pub type Result<T> = std::result::Result<T, BufferError>;
