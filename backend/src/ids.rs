//! Snowflake-style id generation.
//!
//! 64-bit ids laid out as 41 bits of milliseconds since the service epoch,
//! 10 bits of node id and a 12-bit per-millisecond sequence. Ids minted by
//! one generator are unique and non-decreasing.

use chrono::Utc;
use parking_lot::Mutex;
use rand::Rng;

const NODE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const NODE_MASK: i64 = (1 << NODE_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Service epoch: 2024-01-01T00:00:00Z.
const EPOCH_MS: i64 = 1_704_067_200_000;

pub struct IdGenerator {
    node: i64,
    clock: Mutex<Clock>,
}

struct Clock {
    last_ms: i64,
    sequence: i64,
}

impl IdGenerator {
    pub fn new(node: i64) -> Self {
        IdGenerator {
            node: node & NODE_MASK,
            clock: Mutex::new(Clock {
                last_ms: 0,
                sequence: 0,
            }),
        }
    }

    /// Generator with a randomly chosen node id.
    pub fn with_random_node() -> Self {
        Self::new(rand::rng().random_range(0..=NODE_MASK))
    }

    pub fn next_id(&self) -> i64 {
        let mut clock = self.clock.lock();
        let mut now = millis_since_epoch();
        if now < clock.last_ms {
            // Clock went backwards; keep issuing against the last timestamp.
            now = clock.last_ms;
        }
        if now == clock.last_ms {
            clock.sequence = (clock.sequence + 1) & SEQUENCE_MASK;
            if clock.sequence == 0 {
                // Sequence window exhausted, wait out the millisecond.
                while now <= clock.last_ms {
                    now = millis_since_epoch();
                }
            }
        } else {
            clock.sequence = 0;
        }
        clock.last_ms = now;
        (now << (NODE_BITS + SEQUENCE_BITS)) | (self.node << SEQUENCE_BITS) | clock.sequence
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::with_random_node()
    }
}

fn millis_since_epoch() -> i64 {
    Utc::now().timestamp_millis() - EPOCH_MS
}
