//! MIPS pipeline simulator library.
//!
//! This crate implements a cycle-accurate five-stage in-order 32-bit
//! MIPS-subset simulator with the following:
//! 1. **Core:** Fetch/Decode/Execute/Memory/Write-back stage slots, the
//!    register file with HI/LO, and the per-tick controller with stall
//!    arbitration and branch recovery.
//! 2. **Caches:** Independent set-associative instruction and data caches
//!    with LRU/FIFO/RANDOM replacement and MRU/LRU insertion, backed by a
//!    flat word-granular memory.
//! 3. **ISA:** MIPS opcode tables, field extraction, and the register ABI.
//! 4. **Simulation:** `Simulator` (owns the pipeline), hex program loader,
//!    configuration, and statistics.

/// Common types (configuration and loader errors).
pub mod common;
/// Simulator configuration (defaults, policy enums, hierarchical config).
pub mod config;
/// Processor core: architectural state, pipeline, caches.
pub mod core;
/// Instruction set tables and bitfield helpers.
pub mod isa;
/// Simulation driver and program loader.
pub mod sim;
/// Backing memory behind the caches.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or [`Config::from_json`].
pub use crate::config::Config;
/// Complete pipeline state and controller.
pub use crate::core::Pipeline;
/// Top-level simulator; owns the pipeline and drives the cycle loop.
pub use crate::sim::Simulator;
