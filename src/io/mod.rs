/// Command-line interface and run orchestration
pub mod cli;
/// Generator configuration loading from JSON files
pub mod config;
/// Default tunables and named constants
pub mod configuration;
/// Error types for configuration and generation failures
pub mod error;
/// Sequence export as CSV or JSON
pub mod export;
/// Progress display for chunk shuffling
pub mod progress;
