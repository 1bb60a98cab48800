//! MIPS register ABI.
//!
//! Indices for the registers the pipeline treats specially, plus the
//! conventional names used by the register dump.

/// `$zero` — hardwired zero.
pub const REG_ZERO: usize = 0;
/// `$v0` — syscall number / first return value.
pub const REG_V0: usize = 2;
/// `$v1` — second return value.
pub const REG_V1: usize = 3;
/// `$a0` — first argument register.
pub const REG_A0: usize = 4;
/// `$sp` — stack pointer.
pub const REG_SP: usize = 29;
/// `$ra` — return address, written by the link instructions.
pub const REG_RA: usize = 31;

/// Syscall number that halts the simulator.
pub const SYSCALL_HALT: u32 = 10;

/// Conventional names for all 32 general-purpose registers.
pub const NAMES: [&str; 32] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3", "$t4",
    "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7", "$t8", "$t9",
    "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];
