//! Result files written after a benchmark run.
//!
//! Formats match what the downstream evaluation scripts expect:
//!
//! - trajectory: one state per line, dimensions separated by single spaces
//! - statistics: one solver per line, `<obstacles> <success> <cost>`
//! - failure indicator: a single `1` or `0`
//!
//! All numbers are written with Rust's shortest-round-trip float display.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::search::{PathVerdict, SearchOutcome};

/// One statistics row for a finished solver.
#[derive(Clone, Copy, Debug)]
pub struct SolverStats {
    pub obstacles_collided: usize,
    pub is_success: bool,
    pub cost: f32,
}

impl SolverStats {
    /// Combine a solver's outcome with its ground-truth verdict.
    pub fn new(outcome: &SearchOutcome, verdict: PathVerdict) -> Self {
        Self {
            obstacles_collided: verdict.obstacles_collided,
            is_success: verdict.is_success,
            cost: outcome.cost,
        }
    }
}

/// Write a trajectory as one whitespace-separated state per line.
pub fn write_trajectory(path: &Path, trajectory: &[Vec<f32>]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for state in trajectory {
        let mut first = true;
        for value in state {
            if !first {
                write!(writer, " ")?;
            }
            write!(writer, "{value}")?;
            first = false;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    debug!("[Io] wrote {} trajectory states to {:?}", trajectory.len(), path);
    Ok(())
}

/// Write one `<obstacles> <success> <cost>` row per solver.
pub fn write_statistics(path: &Path, rows: &[SolverStats]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        writeln!(
            writer,
            "{} {} {}",
            row.obstacles_collided,
            if row.is_success { 1 } else { 0 },
            row.cost
        )?;
    }
    writer.flush()?;
    debug!("[Io] wrote {} statistics rows to {:?}", rows.len(), path);
    Ok(())
}

/// Write `1` when any solver failed to reach a goal, `0` otherwise.
pub fn write_failure_indicator(path: &Path, any_failed: bool) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write!(writer, "{}", if any_failed { 1 } else { 0 })?;
    writer.flush()?;
    Ok(())
}
