//! Input validation.
//!
//! Runs before the problem encoder ever sees an [`OptimizationInput`]: checks
//! that every variant reference resolves and that every numeric field is
//! finite and non-negative. The first violation found is reported; there is
//! no accumulation of multiple errors (§7 kind 2).

use crate::{GaoError, GaoResult, OptimizationInput};

/// Validate an [`OptimizationInput`] before it is handed to the encoder.
pub fn validate(input: &OptimizationInput) -> GaoResult<()> {
    check_variant_exists_in_catalog(input)?;
    check_demand_models_exist(input)?;
    check_numeric_fields(input)?;
    Ok(())
}

fn variant_exists(input: &OptimizationInput, model_id: &str, variant_id: &str) -> bool {
    input
        .variants
        .get(model_id)
        .map(|setups| setups.contains_key(variant_id))
        .unwrap_or(false)
}

fn check_variant_exists_in_catalog(input: &OptimizationInput) -> GaoResult<()> {
    let maps = [
        ("current_layout", input.current_layout.as_ref()),
        ("min_replicas", Some(&input.min_replicas)),
        ("max_replicas", Some(&input.max_replicas)),
    ];
    for (label, map) in maps {
        let Some(map) = map else { continue };
        for (model_id, setups) in map {
            for variant_id in setups.keys() {
                if !variant_exists(input, model_id, variant_id) {
                    return Err(GaoError::Validation(format!(
                        "{label} references unknown variant ({model_id}, {variant_id})"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn check_demand_models_exist(input: &OptimizationInput) -> GaoResult<()> {
    for model_id in input.demand.keys() {
        if !input.variants.contains_key(model_id) {
            return Err(GaoError::Validation(format!(
                "demand references unknown model {model_id}"
            )));
        }
    }
    Ok(())
}

fn check_numeric_fields(input: &OptimizationInput) -> GaoResult<()> {
    for (model_id, setups) in &input.variants {
        for (variant_id, variant) in setups {
            if !variant.accelerator_count.is_finite() || variant.accelerator_count <= 0.0 {
                return Err(GaoError::Validation(format!(
                    "variant ({model_id}, {variant_id}) has non-positive accelerator_count {}",
                    variant.accelerator_count
                )));
            }
            if !variant.max_service_rate.is_finite() || variant.max_service_rate <= 0.0 {
                return Err(GaoError::Validation(format!(
                    "variant ({model_id}, {variant_id}) has non-positive max_service_rate {}",
                    variant.max_service_rate
                )));
            }
        }
    }
    for (model_id, rate) in &input.demand {
        if !rate.is_finite() || *rate < 0.0 {
            return Err(GaoError::Validation(format!(
                "demand for {model_id} is negative or non-finite: {rate}"
            )));
        }
    }
    for (accelerator_type, cost) in &input.cost {
        if !cost.is_finite() || *cost < 0.0 {
            return Err(GaoError::Validation(format!(
                "cost for {accelerator_type} is negative or non-finite: {cost}"
            )));
        }
    }
    if !input.change_penalty.is_finite() || input.change_penalty < 0.0 {
        return Err(GaoError::Validation(format!(
            "change_penalty must be non-negative and finite, got {}",
            input.change_penalty
        )));
    }
    Ok(())
}
