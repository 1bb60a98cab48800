//! Configuration system for the MIPS pipeline simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** The reference machine constants (caches, penalties, PC).
//! 2. **Structures:** Hierarchical config for general, cache, and timing settings.
//! 3. **Enums:** Cache replacement and insertion policy types.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or via
//! `Config::default()` for the CLI.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the reference machine used when a field is not
/// explicitly overridden in a JSON configuration.
mod defaults {
    /// Initial program counter: base of the text region.
    pub const START_PC: u32 = 0x0040_0000;

    /// Seed for the RANDOM replacement policy's generator.
    ///
    /// Seeded once at startup so whole runs are reproducible.
    pub const RNG_SEED: u64 = 123_456_789;

    /// Instruction cache size in bytes (8 KiB).
    pub const ICACHE_SIZE: usize = 8 * 1024;

    /// Data cache size in bytes (64 KiB).
    pub const DCACHE_SIZE: usize = 64 * 1024;

    /// Cache block size in bytes (32 bytes = 8 words).
    pub const CACHE_BLOCK: usize = 32;

    /// Cache associativity (4 ways).
    pub const CACHE_WAYS: usize = 4;

    /// Cycles the pipeline waits after a cache miss before the line is usable.
    pub const MISS_PENALTY: u32 = 50;
}

/// Cache replacement policy algorithms.
///
/// Selects which way of a full set gives up its block when a new line must
/// be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used: evicts the way with the oldest access position.
    #[serde(alias = "Lru")]
    Lru,
    /// First In First Out: evicts the way with the oldest fill position;
    /// hits never reorder the set.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Uniform random way selection (the reference machine's default).
    #[default]
    #[serde(alias = "Random")]
    Random,
}

/// Cache insertion policies.
///
/// Decides where in the replacement order a freshly filled block lands.
/// Only meaningful under LRU replacement; FIFO and RANDOM stamp fills the
/// same way regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InsertionPolicy {
    /// New blocks enter at the most-recently-used position (normal LRU).
    #[default]
    #[serde(alias = "Mru")]
    Mru,
    /// New blocks enter at the least-recently-used position (bimodal-style
    /// experiment: a block must hit once to be protected).
    #[serde(alias = "Lru")]
    Lru,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use mipsim_core::config::{Config, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": {
///         "icache": { "size_bytes": 4096, "ways": 2, "replacement": "LRU" }
///     },
///     "timing": { "miss_penalty": 20 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.icache.size_bytes, 4096);
/// assert_eq!(config.cache.icache.replacement, ReplacementPolicy::Lru);
/// assert_eq!(config.cache.dcache.size_bytes, 64 * 1024);
/// assert_eq!(config.timing.miss_penalty, 20);
/// assert_eq!(config.general.start_pc, 0x0040_0000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Instruction and data cache geometry and policies.
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
    /// Latency parameters.
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// Every field is optional; missing fields take the reference machine's
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed documents.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Initial program counter.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Seed for the RANDOM replacement generator.
    #[serde(default = "GeneralConfig::default_seed")]
    pub seed: u64,
}

impl GeneralConfig {
    /// Returns the default initial program counter.
    fn default_start_pc() -> u32 {
        defaults::START_PC
    }

    /// Returns the default random seed.
    fn default_seed() -> u64 {
        defaults::RNG_SEED
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: defaults::START_PC,
            seed: defaults::RNG_SEED,
        }
    }
}

/// Geometry and policies for both caches.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheHierarchyConfig {
    /// Instruction cache.
    #[serde(default = "CacheHierarchyConfig::default_icache")]
    pub icache: CacheConfig,
    /// Data cache.
    #[serde(default = "CacheHierarchyConfig::default_dcache")]
    pub dcache: CacheConfig,
}

impl CacheHierarchyConfig {
    /// Returns the reference instruction cache: 8 KiB, 4-way, 32-byte blocks.
    fn default_icache() -> CacheConfig {
        CacheConfig::default()
    }

    /// Returns the reference data cache: 64 KiB, 4-way, 32-byte blocks.
    fn default_dcache() -> CacheConfig {
        CacheConfig {
            size_bytes: defaults::DCACHE_SIZE,
            ..CacheConfig::default()
        }
    }
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            icache: Self::default_icache(),
            dcache: Self::default_dcache(),
        }
    }
}

/// Individual cache configuration.
///
/// Any combination of replacement and insertion policy is accepted; geometry
/// is validated when the cache is constructed.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes.
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Block size in bytes; must be a power of two and a multiple of 4.
    #[serde(default = "CacheConfig::default_block")]
    pub block_bytes: usize,

    /// Associativity (number of ways).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy.
    #[serde(default)]
    pub replacement: ReplacementPolicy,

    /// Insertion policy.
    #[serde(default)]
    pub insertion: InsertionPolicy,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::ICACHE_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_block() -> usize {
        defaults::CACHE_BLOCK
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::ICACHE_SIZE,
            block_bytes: defaults::CACHE_BLOCK,
            ways: defaults::CACHE_WAYS,
            replacement: ReplacementPolicy::default(),
            insertion: InsertionPolicy::default(),
        }
    }
}

/// Latency parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Cycles the pipeline stalls on a cache miss (both caches).
    #[serde(default = "TimingConfig::default_miss_penalty")]
    pub miss_penalty: u32,
}

impl TimingConfig {
    /// Returns the default miss penalty in cycles.
    fn default_miss_penalty() -> u32 {
        defaults::MISS_PENALTY
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            miss_penalty: defaults::MISS_PENALTY,
        }
    }
}
