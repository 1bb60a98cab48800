//! Top-level simulator: owns the pipeline and drives the cycle loop.

use crate::common::ConfigError;
use crate::config::Config;
use crate::core::Pipeline;
use crate::stats::SimReport;

/// The simulator: pipeline state plus the external run-loop view of it.
#[derive(Debug)]
pub struct Simulator {
    /// Complete pipeline state (slots, registers, caches, memory, stats).
    pub pipe: Pipeline,
}

impl Simulator {
    /// Creates a simulator for a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when either cache's geometry is invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            pipe: Pipeline::new(config)?,
        })
    }

    /// Places program words into backing memory starting at the current PC.
    pub fn load_program(&mut self, words: &[u32]) {
        let base = self.pipe.pc;
        self.pipe.mem.write_words(base, words);
    }

    /// Advances the simulation by one clock cycle.
    pub fn tick(&mut self) {
        self.pipe.tick();
    }

    /// Whether the program is still running (the halt syscall clears this).
    pub const fn is_running(&self) -> bool {
        self.pipe.run_bit
    }

    /// Runs until the program halts or `max_cycles` elapse.
    ///
    /// Returns the number of cycles executed by this call.
    pub fn run(&mut self, max_cycles: u64) -> u64 {
        let mut executed = 0;
        while self.pipe.run_bit && executed < max_cycles {
            self.pipe.tick();
            executed += 1;
        }
        executed
    }

    /// Snapshot of all statistics for reporting.
    pub fn report(&self) -> SimReport {
        SimReport {
            pipeline: self.pipe.stats.clone(),
            icache: self.pipe.icache.stats.clone(),
            dcache: self.pipe.dcache.stats.clone(),
        }
    }
}
