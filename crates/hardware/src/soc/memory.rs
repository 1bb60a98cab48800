//! Flat backing memory.
//!
//! The caches are the only consumers of this module at simulation time: cache
//! fills issue consecutive word reads and dirty evictions issue word writes.
//! The loader writes program words here before the first cycle.
//!
//! Storage is a fixed map of word-granular regions (text, data, stack).
//! Reads outside every region return zero; writes outside every region are
//! dropped with a warning. Both match the behavior programs saw on the
//! original memory map.

use tracing::warn;

/// Base address of the text region, where programs are loaded.
pub const TEXT_BASE: u32 = 0x0040_0000;
/// Size of the text region in bytes.
pub const TEXT_SIZE: u32 = 0x0010_0000;
/// Base address of the static data region.
pub const DATA_BASE: u32 = 0x1000_0000;
/// Size of the static data region in bytes.
pub const DATA_SIZE: u32 = 0x0010_0000;
/// Base address of the stack region (grows down from the top).
pub const STACK_BASE: u32 = 0x7FF0_0000;
/// Size of the stack region in bytes.
pub const STACK_SIZE: u32 = 0x0010_0000;

/// One contiguous word-addressable region.
#[derive(Debug)]
struct Region {
    base: u32,
    words: Vec<u32>,
}

impl Region {
    fn new(base: u32, size: u32) -> Self {
        Self {
            base,
            words: vec![0; (size / 4) as usize],
        }
    }

    fn holds(&self, addr: u32) -> bool {
        addr >= self.base && ((addr - self.base) / 4) < self.words.len() as u32
    }
}

/// Word-addressable backing memory with the simulator's region map.
///
/// All addresses handed to `read_u32`/`write_u32` are 4-byte aligned; the
/// cache masks the low bits before any transaction reaches this layer.
#[derive(Debug)]
pub struct Memory {
    regions: Vec<Region>,
}

impl Memory {
    /// Creates memory with the standard text, data, and stack regions.
    pub fn new() -> Self {
        Self {
            regions: vec![
                Region::new(TEXT_BASE, TEXT_SIZE),
                Region::new(DATA_BASE, DATA_SIZE),
                Region::new(STACK_BASE, STACK_SIZE),
            ],
        }
    }

    /// Reads the aligned 32-bit word at `addr`. Unmapped addresses read as 0.
    pub fn read_u32(&self, addr: u32) -> u32 {
        self.regions
            .iter()
            .find(|r| r.holds(addr))
            .map_or(0, |r| r.words[((addr - r.base) / 4) as usize])
    }

    /// Writes the aligned 32-bit word at `addr`. Unmapped writes are dropped.
    pub fn write_u32(&mut self, addr: u32, val: u32) {
        if let Some(r) = self.regions.iter_mut().find(|r| r.holds(addr)) {
            r.words[((addr - r.base) / 4) as usize] = val;
        } else {
            warn!(addr = format_args!("{addr:#010x}"), "write to unmapped memory dropped");
        }
    }

    /// Writes consecutive words starting at `base`. Used by the loader.
    pub fn write_words(&mut self, base: u32, words: &[u32]) {
        for (i, word) in words.iter().enumerate() {
            self.write_u32(base.wrapping_add((i as u32) * 4), *word);
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
