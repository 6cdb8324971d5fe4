//! Result Assembler.
//!
//! Rounds fractional solver output to integers, computes remaining
//! accelerator inventory, and packages everything into an
//! [`AllocationResult`]. Also produces the empty/degenerate results in the
//! no-solution and no-eligible-variant cases.

use crate::encoder::EncodedProblem;
use crate::modeling::SolveOutcome;
use gao_core::{AllocationResult, InstanceAllocation, ModelAllocation, OptimizationInput};

/// Assembles a result from a solved or infeasible outcome. Callers must
/// intercept [`SolveOutcome::Failed`] themselves (§7 kind 3: a backend
/// failure is a `GaoError`, not a plan) before reaching this function.
pub fn assemble(input: &OptimizationInput, encoded: &EncodedProblem, outcome: SolveOutcome) -> AllocationResult {
    let solution = match outcome {
        SolveOutcome::Solved(solution) => solution,
        SolveOutcome::Infeasible => return AllocationResult::empty(),
        SolveOutcome::Failed(err) => unreachable!("solver backend failure must be handled before assembling: {err}"),
    };

    let gpu_after_allocation = if encoded.used_gpu.is_empty() {
        // Degenerate: no accelerator type has an eligible variant. Supply
        // carries through unchanged (§4.4 "degenerate branch").
        input.supply.iter().map(|(t, &s)| (t.clone(), s)).collect()
    } else {
        encoded
            .used_gpu
            .iter()
            .filter_map(|(accelerator_type, &var)| {
                let supply = *input.supply.get(accelerator_type)?;
                let consumed = solution.value(var).round();
                Some((accelerator_type.clone(), (supply as f64 - consumed).max(0.0).round() as u32))
            })
            .collect()
    };

    let models_data = input
        .variants
        .iter()
        .map(|(model_id, setups)| {
            let required_instances = setups
                .iter()
                .map(|(variant_id, variant)| {
                    let key = gao_core::VariantKey::new(model_id.clone(), variant_id.clone());
                    let replicas = encoded
                        .eta
                        .get(&key)
                        .map(|&v| solution.value(v).round() as u32)
                        .unwrap_or(0);
                    (
                        variant_id.clone(),
                        InstanceAllocation {
                            instance_num: replicas,
                            accelerator_type: variant.accelerator_type.clone(),
                            accelerator_count: variant.accelerator_count,
                        },
                    )
                })
                .collect();
            (model_id.clone(), ModelAllocation { required_instances })
        })
        .collect();

    AllocationResult {
        gpu_after_allocation,
        models_data,
        impossible_models: Vec::new(),
        strange_models: Vec::new(),
        missing_models: Vec::new(),
        impossible_instances: std::collections::HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::microlp_backend::MicrolpModel;
    use crate::modeling::Model;
    use std::collections::HashMap;

    #[test]
    fn infeasible_outcome_yields_empty_result() {
        let input = OptimizationInput::default();
        let encoded = EncodedProblem {
            eta: HashMap::new(),
            used_gpu: HashMap::new(),
            max_gpu_cost: 0.0,
        };
        let result = assemble(&input, &encoded, SolveOutcome::Infeasible);
        assert!(result.is_empty());
    }

    #[test]
    fn degenerate_model_passes_supply_through() {
        let input = OptimizationInput {
            supply: HashMap::from([("A100".to_string(), 10)]),
            ..Default::default()
        };
        let encoded = EncodedProblem {
            eta: HashMap::new(),
            used_gpu: HashMap::new(),
            max_gpu_cost: 0.0,
        };
        let model = MicrolpModel::new();
        let outcome = model.solve(&crate::modeling::SolverConfig::default());
        let result = assemble(&input, &encoded, outcome);
        assert_eq!(result.gpu_after_allocation.get("A100"), Some(&10));
    }
}
