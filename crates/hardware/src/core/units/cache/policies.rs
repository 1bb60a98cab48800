//! Victim selection and insertion stamping for the cache.
//!
//! Replacement and insertion compose orthogonally and are dispatched by
//! `match` over the config enums, keeping the combinations exhaustive:
//!
//! - `Lru`/`Fifo` victims: first invalid way, else the smallest position
//!   counter. The two differ only in when counters are written — LRU stamps
//!   hits, FIFO stamps fills only.
//! - `Random` victims: first invalid way, else a uniform way from the
//!   generator below.
//! - `Lru` + `Lru` insertion places the fill at the bottom of the recency
//!   order by zeroing its counter and shifting every other valid way up one.

use super::CacheBlock;
use crate::config::{InsertionPolicy, ReplacementPolicy};

/// Xorshift pseudo-random generator backing RANDOM replacement.
///
/// Seeded once at cache construction so runs are reproducible.
#[derive(Debug, Clone)]
pub(crate) struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback state for a zero seed, which xorshift cannot leave.
    const DEFAULT_STATE: u64 = 123_456_789;

    pub(crate) fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::DEFAULT_STATE } else { seed },
        }
    }

    pub(crate) fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Picks the way that gives up its block for an incoming fill.
pub(crate) fn select_victim(
    policy: ReplacementPolicy,
    set: &[CacheBlock],
    rng: &mut Xorshift64,
) -> usize {
    // Every policy fills invalid ways before evicting anything.
    if let Some(way) = set.iter().position(|b| !b.valid) {
        return way;
    }
    match policy {
        // FIFO shares the tie-break rule; its counters simply never move on hits.
        ReplacementPolicy::Lru | ReplacementPolicy::Fifo => set
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| b.position)
            .map_or(0, |(way, _)| way),
        ReplacementPolicy::Random => (rng.next() as usize) % set.len(),
    }
}

/// Stamps the freshly filled way's position counter per the insertion policy.
pub(crate) fn seed_position(
    replacement: ReplacementPolicy,
    insertion: InsertionPolicy,
    set: &mut [CacheBlock],
    way: usize,
    clock: &mut u64,
) {
    match replacement {
        ReplacementPolicy::Lru => match insertion {
            InsertionPolicy::Mru => {
                *clock += 1;
                set[way].position = *clock;
            }
            InsertionPolicy::Lru => {
                // The fill lands at the bottom of the recency order; shifting
                // the rest up one preserves their relative order.
                set[way].position = 0;
                for (i, block) in set.iter_mut().enumerate() {
                    if i != way && block.valid {
                        block.position += 1;
                    }
                }
            }
        },
        ReplacementPolicy::Fifo => {
            // Insertion time; never touched again until the block is evicted.
            *clock += 1;
            set[way].position = *clock;
        }
        ReplacementPolicy::Random => {
            // Positionless; a consistent value is written for debuggability.
            set[way].position = *clock;
        }
    }
}
