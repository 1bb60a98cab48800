//! Functional units shared by the pipeline stages.

/// Set-associative cache model.
pub mod cache;
