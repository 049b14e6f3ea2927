//! Sequence export as CSV or JSON

use crate::io::error::{Result, StreamError};
use crate::stream::assembly::Sequence;
use clap::ValueEnum;
use std::io::Write;

/// Output carrier format for generated sequences
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `position,symbol,identity,pattern_index,is_catch` row per entry
    Csv,
    /// JSON array of entry objects
    Json,
}

/// Write a sequence to the given writer in the requested format
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn write_sequence<W: Write>(
    sequence: &Sequence,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(sequence, writer),
        OutputFormat::Json => write_json(sequence, writer),
    }
}

/// Write a sequence as CSV with a header row
///
/// Catch entries carry `catch` in the identity column.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(sequence: &Sequence, writer: &mut W) -> Result<()> {
    writeln!(writer, "position,symbol,identity,pattern_index,is_catch")?;
    for entry in sequence.entries() {
        writeln!(
            writer,
            "{},{},{},{},{}",
            entry.position, entry.symbol, entry.identity, entry.pattern_index, entry.is_catch
        )?;
    }
    Ok(())
}

/// Write a sequence as a JSON array of entry objects
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn write_json<W: Write>(sequence: &Sequence, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, sequence.entries()).map_err(|err| {
        StreamError::Serialization {
            reason: err.to_string(),
        }
    })?;
    writeln!(writer)?;
    Ok(())
}
