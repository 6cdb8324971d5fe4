//! Problem Encoder.
//!
//! Transforms a validated [`OptimizationInput`] into decision variables and
//! linear constraints against the [`Model`] trait. Pure construction: no
//! solving happens here.

use crate::modeling::{Expr, Model, Var};
use gao_core::{OptimizationInput, VariantKey};
use good_lp::constraint::{geq, leq};
use std::collections::HashMap;

/// The encoded MILP: variable handles the [`crate::assemble`] stage reads
/// back once the model is solved.
pub struct EncodedProblem {
    pub eta: HashMap<VariantKey, Var>,
    pub used_gpu: HashMap<String, Var>,
    pub max_gpu_cost: f64,
}

/// `accelerator_type -> [(VariantKey, accelerator_count)]`, restricted to
/// types with at least one eligible variant (§4.2's `setups_per_gpu`).
fn setups_per_gpu(input: &OptimizationInput) -> HashMap<String, Vec<(VariantKey, f64)>> {
    let mut by_type: HashMap<String, Vec<(VariantKey, f64)>> = HashMap::new();
    for (model_id, setups) in &input.variants {
        for (variant_id, variant) in setups {
            if !input.supply.contains_key(&variant.accelerator_type) {
                continue;
            }
            by_type
                .entry(variant.accelerator_type.clone())
                .or_default()
                .push((VariantKey::new(model_id.clone(), variant_id.clone()), variant.accelerator_count));
        }
    }
    by_type
}

/// Encode `input` into `model`, mutating it in place and returning the
/// variable handles needed to read back a solution.
pub fn encode<M: Model>(model: &mut M, input: &OptimizationInput) -> EncodedProblem {
    let all_keys: Vec<VariantKey> = input
        .variants
        .iter()
        .flat_map(|(model_id, setups)| {
            setups
                .keys()
                .map(move |variant_id| VariantKey::new(model_id.clone(), variant_id.clone()))
        })
        .collect();
    let eta = model.add_integer_vars(all_keys, "eta");

    // 1. replica upper bounds
    let max_bound_constraints: Vec<good_lp::Constraint> = input
        .max_replicas
        .iter()
        .flat_map(|(model_id, setups)| {
            setups.iter().map(move |(variant_id, &replicas)| {
                (VariantKey::new(model_id.clone(), variant_id.clone()), replicas)
            })
        })
        .filter_map(|(key, replicas)| eta.get(&key).map(|&v| leq(Expr::from(v), replicas as f64)))
        .collect();
    model.add_constraints(max_bound_constraints, "max_replicas_ct");

    // 2. replica lower bounds
    let min_bound_constraints: Vec<good_lp::Constraint> = input
        .min_replicas
        .iter()
        .flat_map(|(model_id, setups)| {
            setups.iter().filter(|(_, &r)| r != 0).map(move |(variant_id, &replicas)| {
                (VariantKey::new(model_id.clone(), variant_id.clone()), replicas)
            })
        })
        .filter_map(|(key, replicas)| eta.get(&key).map(|&v| geq(Expr::from(v), replicas as f64)))
        .collect();
    model.add_constraints(min_bound_constraints, "min_replicas_ct");

    // 3. homogeneous placement
    if input.homogeneous {
        for model_id in input.demand.keys() {
            if let Some(setups) = input.variants.get(model_id) {
                let members: Vec<Var> = setups
                    .keys()
                    .filter_map(|variant_id| eta.get(&VariantKey::new(model_id.clone(), variant_id.clone())).copied())
                    .collect();
                model.add_sos1(&members);
            }
        }
    }

    // 4. minimum-one-instance
    let min_one_constraints: Vec<good_lp::Constraint> = input
        .variants
        .iter()
        .filter(|(model_id, _)| !input.scale_to_zero.contains(*model_id) && input.is_currently_deployed(model_id))
        .map(|(model_id, setups)| {
            let terms = setups
                .keys()
                .filter_map(|variant_id| eta.get(&VariantKey::new(model_id.clone(), variant_id.clone())).map(|&v| Expr::from(v)));
            geq(model.sum(terms), 1.0)
        })
        .collect();
    model.add_constraints(min_one_constraints, "min_instances_ct");

    // 5. service rate
    let service_rate_constraints: Vec<good_lp::Constraint> = input
        .demand
        .iter()
        .filter_map(|(model_id, &demand)| {
            let setups = input.variants.get(model_id)?;
            let terms = setups.iter().filter_map(|(variant_id, variant)| {
                eta.get(&VariantKey::new(model_id.clone(), variant_id.clone()))
                    .map(|&v| variant.max_service_rate * Expr::from(v))
            });
            Some(geq(model.sum(terms), demand))
        })
        .collect();
    model.add_constraints(service_rate_constraints, "service_rate_ct");

    let by_type = setups_per_gpu(input);

    // 6. accelerator supply
    let supply_constraints: Vec<good_lp::Constraint> = by_type
        .iter()
        .filter_map(|(accelerator_type, members)| {
            let supply = *input.supply.get(accelerator_type)?;
            let terms = members
                .iter()
                .filter_map(|(key, count)| eta.get(key).map(|&v| *count * Expr::from(v)));
            Some(leq(model.sum(terms), supply as f64))
        })
        .collect();
    model.add_constraints(supply_constraints, "gpu_limit_ct");

    let max_gpu_cost = by_type
        .keys()
        .map(|t| input.cost.get(t).copied().unwrap_or(0.0))
        .fold(0.0_f64, f64::max);

    // 7. integer accelerator accounting
    let used_gpu = model.add_integer_vars(by_type.keys().cloned(), "used_gpu");
    let accounting_constraints: Vec<good_lp::Constraint> = by_type
        .iter()
        .filter_map(|(accelerator_type, members)| {
            let used = *used_gpu.get(accelerator_type)?;
            let terms = members
                .iter()
                .filter_map(|(key, count)| eta.get(key).map(|&v| *count * Expr::from(v)));
            Some(geq(Expr::from(used), model.sum(terms)))
        })
        .collect();
    model.add_constraints(accounting_constraints, "int_gpu_ct");

    // 8. change penalty linearization
    let mut delta_sum = Expr::from(0.0);
    if input.change_penalty > 0.0 {
        if let Some(current_layout) = &input.current_layout {
            let delta_keys: Vec<VariantKey> = current_layout
                .keys()
                .flat_map(|model_id| {
                    input
                        .variants
                        .get(model_id)
                        .into_iter()
                        .flat_map(|setups| setups.keys())
                        .map(move |variant_id| VariantKey::new(model_id.clone(), variant_id.clone()))
                })
                .collect();
            let delta = model.add_continuous_vars(delta_keys, "delta", 0.0, None);

            let delta_rates: HashMap<String, f64> = current_layout
                .iter()
                .map(|(model_id, setups)| {
                    let served: f64 = setups
                        .iter()
                        .filter_map(|(variant_id, &count)| {
                            input
                                .variants
                                .get(model_id)
                                .and_then(|s| s.get(variant_id))
                                .map(|v| count as f64 * v.max_service_rate)
                        })
                        .sum();
                    (model_id.clone(), served - input.demand.get(model_id).copied().unwrap_or(0.0))
                })
                .collect();

            let change_constraints: Vec<good_lp::Constraint> = current_layout
                .iter()
                .flat_map(|(model_id, setups)| {
                    setups.iter().map(move |(variant_id, &current)| (model_id.clone(), variant_id.clone(), current))
                })
                .filter_map(|(model_id, variant_id, current)| {
                    let key = VariantKey::new(model_id.clone(), variant_id);
                    let delta_var = *delta.get(&key)?;
                    let eta_var = *eta.get(&key)?;
                    let over_provisioned = delta_rates.get(&model_id).copied().unwrap_or(0.0) >= 0.0;
                    Some(if over_provisioned {
                        geq(Expr::from(delta_var), Expr::from(eta_var) - current as f64)
                    } else {
                        geq(Expr::from(delta_var), current as f64 - Expr::from(eta_var))
                    })
                })
                .collect();
            model.add_constraints(change_constraints, "instance_change_ct");

            delta_sum = model.sum(delta.values().map(|&v| Expr::from(v)));
        }
    }

    // objective
    let cost_terms = by_type.keys().filter_map(|t| {
        used_gpu
            .get(t)
            .map(|&v| input.cost.get(t).copied().unwrap_or(0.0) * Expr::from(v))
    });
    let objective = model.sum(cost_terms) + input.change_penalty * max_gpu_cost * delta_sum;
    model.minimize(objective);

    EncodedProblem { eta, used_gpu, max_gpu_cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::microlp_backend::MicrolpModel;
    use gao_core::Variant;
    use std::collections::HashSet;

    fn variant(accelerator_type: &str, count: f64, rate: f64) -> Variant {
        Variant {
            variant_id: String::new(),
            accelerator_type: accelerator_type.to_string(),
            accelerator_count: count,
            max_service_rate: rate,
            role: String::new(),
            slo_class: String::new(),
            max_concurrency: 0.0,
        }
    }

    fn simple_input() -> OptimizationInput {
        let mut variants = HashMap::new();
        variants.insert(
            "flan".to_string(),
            HashMap::from([("flan-a100".to_string(), variant("A100", 6.0, 15.0))]),
        );
        OptimizationInput {
            variants,
            demand: HashMap::from([("flan".to_string(), 10.0)]),
            supply: HashMap::from([("A100".to_string(), 15)]),
            cost: HashMap::from([("A100".to_string(), 1.0)]),
            scale_to_zero: HashSet::new(),
            ..Default::default()
        }
    }

    #[test]
    fn encodes_and_solves_a_single_variant_model() {
        let input = simple_input();
        let mut model = MicrolpModel::new();
        let encoded = encode(&mut model, &input);
        match model.solve(&crate::modeling::SolverConfig::default()) {
            crate::modeling::SolveOutcome::Solved(solution) => {
                let key = VariantKey::new("flan", "flan-a100");
                let replicas = solution.value(*encoded.eta.get(&key).unwrap());
                assert!(replicas >= 1.0);
            }
            crate::modeling::SolveOutcome::Infeasible => panic!("expected feasible"),
            crate::modeling::SolveOutcome::Failed(err) => panic!("solver failed: {err}"),
        }
    }

    #[test]
    fn ignores_supply_types_with_no_eligible_variant() {
        let mut input = simple_input();
        input.supply.insert("H100".to_string(), 5);
        input.cost.insert("H100".to_string(), 1.3);
        let mut model = MicrolpModel::new();
        let encoded = encode(&mut model, &input);
        assert!(!encoded.used_gpu.contains_key("H100"));
    }

    #[test]
    fn insufficient_supply_is_infeasible() {
        let mut input = simple_input();
        input.supply.insert("A100".to_string(), 1);
        let mut model = MicrolpModel::new();
        encode(&mut model, &input);
        let outcome = model.solve(&crate::modeling::SolverConfig::default());
        assert!(matches!(outcome, crate::modeling::SolveOutcome::Infeasible));
    }
}
