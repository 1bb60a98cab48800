//! Simulation driver: the `Simulator` and the program loader.

/// Program image loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use simulator::Simulator;
