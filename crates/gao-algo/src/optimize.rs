//! The public optimizer entry point: `optimize(...) -> GaoResult<AllocationResult>`.
//!
//! Orchestrates the four core components in order: encode, drive, assemble.
//! `gao_core::validate` must have already accepted `input`; this function
//! does not re-validate it.

use crate::assemble::assemble;
use crate::driver::drive;
use crate::encoder::encode;
use crate::modeling::microlp_backend::MicrolpModel;
use crate::modeling::{SolveOutcome, SolverConfig};
use gao_core::{AllocationResult, GaoError, GaoResult, OptimizationInput};

/// Solve one GPU allocation problem using the default [`SolverConfig`].
///
/// Callers should run [`gao_core::validate::validate`] first; malformed
/// input (dangling variant references etc.) is undefined behavior here,
/// not a checked precondition of this function.
pub fn optimize(input: &OptimizationInput) -> GaoResult<AllocationResult> {
    optimize_with_config(input, &SolverConfig::default())
}

/// Solve one GPU allocation problem with an explicit [`SolverConfig`] (e.g.
/// a tighter wall-clock budget than the 300s default).
pub fn optimize_with_config(input: &OptimizationInput, config: &SolverConfig) -> GaoResult<AllocationResult> {
    let mut model = MicrolpModel::new();
    let encoded = encode(&mut model, input);
    let num_vars = model.num_vars();
    let num_constraints = model.num_constraints();
    let outcome = drive(model, num_vars, num_constraints, config);
    if let SolveOutcome::Failed(err) = outcome {
        return Err(GaoError::Solver(err));
    }
    Ok(assemble(input, &encoded, outcome))
}
