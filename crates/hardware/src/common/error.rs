//! Error definitions.
//!
//! Two error families exist:
//! 1. **`ConfigError`** — invalid cache geometry, raised at construction and
//!    fatal to the simulator.
//! 2. **`LoadError`** — problems reading a program image, raised by the loader.
//!
//! Runtime conditions (misaligned PC, divide-by-zero, unknown opcodes) are not
//! errors in this model: they are logged or defined away by the ISA semantics.

use thiserror::Error;

/// Invalid cache or simulator configuration, detected at initialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Associativity of zero ways leaves nowhere to place a block.
    #[error("cache associativity must be at least 1")]
    ZeroAssociativity,

    /// Block size must be a power of two holding at least one 4-byte word.
    #[error("cache block size of {0} bytes must be a power of two of at least one word")]
    BadBlockSize(usize),

    /// size / (block_size * ways) must come out to a positive power of two.
    #[error("cache geometry yields {0} sets; the set count must be a positive power of two")]
    BadSetCount(usize),
}

/// Failure to read or parse a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("failed to read program '{path}'")]
    Io {
        /// Path of the file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of the hex listing is not an 8-digit hexadecimal word.
    #[error("line {line}: '{word}' is not a 32-bit hexadecimal word")]
    BadWord {
        /// 1-based line number of the malformed word.
        line: usize,
        /// The offending text.
        word: String,
    },
}
