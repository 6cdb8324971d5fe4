//! File-based JSON transport for the GPU allocation optimizer.
//!
//! Mirrors the source system's `connect_with_files` shim: read an
//! [`OptimizationInput`] document from a file path, run [`gao_algo::optimize`],
//! and write an [`AllocationResult`] (or an error envelope) to a second file
//! path.

use gao_core::{AllocationResult, GaoResult, OptimizationInput};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// The `{error, is_success: false}` envelope written on failure.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: String,
    is_success: bool,
}

fn read_input(path: &Path) -> GaoResult<OptimizationInput> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let input: OptimizationInput = serde_json::from_reader(reader)?;
    Ok(input)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> GaoResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Read `input_path`, validate and solve, write the result to `output_path`.
///
/// On success writes the [`AllocationResult`] and returns `Ok(())`. On any
/// failure (I/O, malformed JSON, validation, solver) writes the error
/// envelope to `output_path` and returns the `GaoError` describing it —
/// callers map this to the process exit code (§6: 0 on success, 1 otherwise).
pub fn solve_to_file(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> GaoResult<()> {
    let outcome = run(input_path.as_ref());
    match &outcome {
        Ok(result) => write_json(output_path.as_ref(), result)?,
        Err(err) => {
            let envelope = ErrorEnvelope {
                error: err.to_string(),
                is_success: false,
            };
            write_json(output_path.as_ref(), &envelope)?;
        }
    }
    outcome.map(|_| ())
}

fn run(input_path: &Path) -> GaoResult<AllocationResult> {
    let input = read_input(input_path)?;
    gao_core::validate::validate(&input)?;
    gao_algo::optimize(&input)
}

/// Read `input_path` and run only `gao_core::validate::validate`; does not solve.
pub fn validate_file(input_path: impl AsRef<Path>) -> GaoResult<()> {
    let input = read_input(input_path.as_ref())?;
    gao_core::validate::validate(&input)
}
