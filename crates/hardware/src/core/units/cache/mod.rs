//! Set-Associative Cache Model.
//!
//! This module implements the configurable set-associative caches in front of
//! backing memory. It supports the LRU, FIFO, and RANDOM replacement policies
//! composed with MRU- and LRU-position insertion, tracks hit/miss/writeback
//! statistics, and stores real block data: fills read whole blocks from
//! memory and dirty evictions write them back.
//!
//! Only naturally-aligned word transactions reach the cache; callers mask the
//! low address bits and model sub-word stores as read-modify-write sequences.

mod policies;

use self::policies::Xorshift64;
use crate::common::ConfigError;
use crate::config::{CacheConfig, InsertionPolicy, ReplacementPolicy};
use crate::soc::Memory;
use crate::stats::CacheStats;
use tracing::debug;

/// One cache block: tag, state bits, replacement position, and data words.
///
/// The position counter is recency under LRU and insertion time under FIFO;
/// counters are 64-bit so long traces cannot wrap them.
#[derive(Clone, Debug)]
pub(crate) struct CacheBlock {
    pub(crate) tag: u32,
    pub(crate) valid: bool,
    pub(crate) dirty: bool,
    pub(crate) position: u64,
    pub(crate) data: Vec<u32>,
}

impl CacheBlock {
    fn new(words: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            dirty: false,
            position: 0,
            data: vec![0; words],
        }
    }
}

/// Set-associative cache with configurable replacement and insertion policies.
#[derive(Debug)]
pub struct Cache {
    sets: Vec<Vec<CacheBlock>>,
    num_sets: usize,
    ways: usize,
    block_bytes: usize,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
    replacement: ReplacementPolicy,
    insertion: InsertionPolicy,
    position_clock: u64,
    rng: Xorshift64,
    /// Access statistics, accumulated for the end-of-run report.
    pub stats: CacheStats,
}

impl Cache {
    /// Creates a cache from validated geometry.
    ///
    /// # Arguments
    ///
    /// * `config` - Size, block size, associativity, and policies.
    /// * `seed` - Seed for the RANDOM replacement generator.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the associativity is zero, the block
    /// size is not a power of two of at least one word, or the derived set
    /// count is not a positive power of two.
    pub fn new(config: &CacheConfig, seed: u64) -> Result<Self, ConfigError> {
        if config.ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if !config.block_bytes.is_power_of_two() || config.block_bytes < 4 {
            return Err(ConfigError::BadBlockSize(config.block_bytes));
        }
        let num_sets = config.size_bytes / (config.block_bytes * config.ways);
        if num_sets == 0 || !num_sets.is_power_of_two() {
            return Err(ConfigError::BadSetCount(num_sets));
        }

        let offset_bits = config.block_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits >= 32 {
            return Err(ConfigError::BadSetCount(num_sets));
        }
        let tag_bits = 32 - offset_bits - index_bits;

        let words = config.block_bytes / 4;
        let sets = (0..num_sets)
            .map(|_| (0..config.ways).map(|_| CacheBlock::new(words)).collect())
            .collect();

        Ok(Self {
            sets,
            num_sets,
            ways: config.ways,
            block_bytes: config.block_bytes,
            offset_bits,
            index_bits,
            tag_bits,
            replacement: config.replacement,
            insertion: config.insertion,
            position_clock: 0,
            rng: Xorshift64::new(seed),
            stats: CacheStats::default(),
        })
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Block size in bytes.
    pub const fn block_bytes(&self) -> usize {
        self.block_bytes
    }

    /// Bits of the address selecting a byte within the block.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Bits of the address selecting the set.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Remaining address bits compared against stored tags.
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Splits an address into (tag, set index, word-within-block).
    const fn decompose(&self, addr: u32) -> (u32, usize, usize) {
        let offset = addr & ((1 << self.offset_bits) - 1);
        let index = ((addr >> self.offset_bits) & ((1 << self.index_bits) - 1)) as usize;
        let tag = addr >> (self.offset_bits + self.index_bits);
        (tag, index, (offset / 4) as usize)
    }

    /// Pure lookup: is the line holding `addr` resident? No counter effects.
    pub fn contains(&self, addr: u32) -> bool {
        let (tag, index, _) = self.decompose(addr);
        self.sets[index].iter().any(|b| b.valid && b.tag == tag)
    }

    /// Performs one aligned word transaction.
    ///
    /// Returns `(hit, word)` where `word` is the block's word at the accessed
    /// offset after the operation. On a miss the whole block is reloaded from
    /// `mem` (writing back a dirty victim first), then the requested read or
    /// write is performed against the fresh block — callers decide whether
    /// the miss also costs a stall.
    pub fn access(
        &mut self,
        mem: &mut Memory,
        addr: u32,
        is_write: bool,
        write_data: u32,
    ) -> (bool, u32) {
        self.stats.accesses += 1;
        let (tag, index, word) = self.decompose(addr);

        if let Some(way) = self.sets[index].iter().position(|b| b.valid && b.tag == tag) {
            self.stats.hits += 1;
            // Only LRU reorders on a hit: FIFO keeps insertion order and
            // RANDOM is positionless.
            if self.replacement == ReplacementPolicy::Lru {
                self.position_clock += 1;
                self.sets[index][way].position = self.position_clock;
            }
            let block = &mut self.sets[index][way];
            if is_write {
                block.dirty = true;
                block.data[word] = write_data;
            }
            return (true, block.data[word]);
        }

        self.stats.misses += 1;
        let way = policies::select_victim(self.replacement, &self.sets[index], &mut self.rng);
        let words = (self.block_bytes / 4) as u32;

        let victim = &self.sets[index][way];
        if victim.valid && victim.dirty {
            // The victim's words go back to memory now; only the latency is
            // folded into the fill's stall budget.
            self.stats.writebacks += 1;
            let victim_base = (victim.tag << (self.offset_bits + self.index_bits))
                | ((index as u32) << self.offset_bits);
            for i in 0..words {
                mem.write_u32(victim_base + i * 4, victim.data[i as usize]);
            }
            debug!(
                set = index,
                way,
                base = format_args!("{victim_base:#010x}"),
                "dirty victim written back"
            );
        }

        let block_addr = addr & !((1u32 << self.offset_bits) - 1);
        for i in 0..words {
            let value = mem.read_u32(block_addr + i * 4);
            self.sets[index][way].data[i as usize] = value;
        }
        {
            let block = &mut self.sets[index][way];
            block.valid = true;
            block.tag = tag;
            block.dirty = false;
        }
        policies::seed_position(
            self.replacement,
            self.insertion,
            &mut self.sets[index],
            way,
            &mut self.position_clock,
        );
        debug!(
            set = index,
            way,
            base = format_args!("{block_addr:#010x}"),
            "line fill"
        );

        let block = &mut self.sets[index][way];
        if is_write {
            block.dirty = true;
            block.data[word] = write_data;
        }
        (false, block.data[word])
    }
}
