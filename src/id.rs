//! Node id generation.
//!
//! Ids are decimal Unix timestamps in milliseconds. A process-wide high-water
//! mark keeps every id handed out strictly greater than the previous one, so a
//! batch requested within the same millisecond still gets distinct ids.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Claim the next id at or after `now`.
fn next_after(now: u64) -> u64 {
    let previous = match LAST_ISSUED.fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
        Some(now.max(last + 1))
    }) {
        Ok(previous) | Err(previous) => previous,
    };
    now.max(previous + 1)
}

/// Generate a single node id.
pub fn generate_id() -> String {
    next_after(now_millis()).to_string()
}

/// Generate `count` distinct node ids in increasing order.
pub fn generate_ids(count: usize) -> Vec<String> {
    (0..count).map(|_| generate_id()).collect()
}
