//! Trace and span id generation.

use rand::Rng;

/// Random non-zero id in the positive `i64` range.
///
/// Zero is reserved for "not set"; the upper bound keeps ids safe for
/// peers that store them as signed integers.
pub fn generate_id() -> u64 {
    rand::thread_rng().gen_range(1..=i64::MAX as u64)
}
