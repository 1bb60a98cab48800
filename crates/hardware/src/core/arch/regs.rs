//! MIPS General-Purpose Register File.
//!
//! This module implements the architectural register file:
//! 1. **Storage:** 32 integer registers (`$zero`-`$ra`).
//! 2. **Invariant Enforcement:** Register `$zero` is hardwired to zero.
//! 3. **Debugging:** Dumping the complete register state.

use crate::isa::abi;

/// General-purpose register file.
///
/// Register 0 is hardwired to zero: writes to it are dropped and reads
/// always return 0.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: [u32; 32],
}

impl RegisterFile {
    /// Creates a register file with all registers cleared.
    pub const fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads a register. `$zero` always reads 0.
    pub const fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a register. Writes to `$zero` are dropped.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Dumps all registers to stdout, two per line, with ABI names.
    pub fn dump(&self) {
        for i in (0..32).step_by(2) {
            println!(
                "{:>5} = {:#010x}    {:>5} = {:#010x}",
                abi::NAMES[i],
                self.regs[i],
                abi::NAMES[i + 1],
                self.regs[i + 1]
            );
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
