//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters the shell reports at the end of a run:
//! 1. **Pipeline:** Cycles, instructions fetched and retired, branch squashes.
//! 2. **Caches:** Per-cache accesses, hits, misses, writebacks, and rates.
//!
//! Everything is `Serialize` so the shell can emit JSON as well as text.

use serde::Serialize;

/// Pipeline-level statistics.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SimStats {
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions fetched (successful fetches only; retried misses do not count).
    pub inst_fetch: u64,
    /// Instructions retired by write-back.
    pub inst_retire: u64,
    /// Branch recoveries processed (each flushes the wrong-path ops in flight).
    pub squashes: u64,
}

impl SimStats {
    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.inst_retire as f64 / self.cycles as f64
        }
    }
}

/// Per-cache access statistics.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CacheStats {
    /// Total accesses (every call, hit or miss).
    pub accesses: u64,
    /// Accesses that found a valid matching tag.
    pub hits: u64,
    /// Accesses that had to install a line.
    pub misses: u64,
    /// Dirty victims committed to backing memory on eviction.
    pub writebacks: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit, in [0, 1].
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that missed, in [0, 1].
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.accesses as f64
        }
    }
}

/// Combined end-of-run report: the pipeline counters plus both caches.
#[derive(Clone, Debug, Serialize)]
pub struct SimReport {
    /// Pipeline counters.
    pub pipeline: SimStats,
    /// Instruction cache counters.
    pub icache: CacheStats,
    /// Data cache counters.
    pub dcache: CacheStats,
}

impl SimReport {
    /// Prints the report to stdout in the shell's text format.
    pub fn print(&self) {
        println!("==========================================================");
        println!("SIMULATION STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.pipeline.cycles);
        println!("sim_inst_fetch           {}", self.pipeline.inst_fetch);
        println!("sim_inst_retire          {}", self.pipeline.inst_retire);
        println!("sim_squashes             {}", self.pipeline.squashes);
        println!("sim_ipc                  {:.4}", self.pipeline.ipc());
        println!("----------------------------------------------------------");
        Self::print_cache("icache", &self.icache);
        Self::print_cache("dcache", &self.dcache);
        println!("==========================================================");
    }

    fn print_cache(name: &str, stats: &CacheStats) {
        println!("{name}");
        println!("  accesses               {}", stats.accesses);
        println!("  hits                   {}", stats.hits);
        println!("  misses                 {}", stats.misses);
        println!("  hit_rate               {:.2}%", stats.hit_rate() * 100.0);
        println!("  miss_rate              {:.2}%", stats.miss_rate() * 100.0);
        println!("  writebacks             {}", stats.writebacks);
    }
}
