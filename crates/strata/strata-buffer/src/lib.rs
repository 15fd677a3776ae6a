//! Fixed-capacity circular buffer partitioned by priority.
//!
//! One array of `CAP` slots is shared by three logical FIFO queues, one per
//! [`Priority`] level. When the array is full, lower priority data is evicted
//! to make room for higher priority data, never the other way around.

mod buffer;
mod error;
mod priority;
mod ring;
mod segment;

pub use buffer::{OverflowPolicy, PriorityBuffer, Reservation};
pub use error::{BufferError, Result};
pub use priority::{ParsePriorityError, Priority};
pub use segment::Segment;
