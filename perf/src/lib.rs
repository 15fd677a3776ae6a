use strata_buffer::{Priority, PriorityBuffer};

/// Deterministic `(priority, value)` stream with roughly equal shares per
/// level, so benches see a stable mix of evictions.
pub fn make_mixed_ops(count: usize) -> Vec<(Priority, u8)> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    (0..count)
        .map(|i| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (Priority::ALL[(state % 3) as usize], i as u8)
        })
        .collect()
}

/// A buffer with every slot occupied, levels interleaved LOW, MID, HIGH.
pub fn make_full_buffer<const CAP: usize>() -> PriorityBuffer<u8, CAP> {
    let mut buf = PriorityBuffer::new();
    for i in 0..CAP {
        let _ = buf.insert(Priority::ALL[i % Priority::COUNT], i as u8);
    }
    buf
}
