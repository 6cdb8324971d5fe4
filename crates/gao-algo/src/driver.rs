//! Solver Driver.
//!
//! Invokes the backend and surfaces either a feasible solution or an
//! infeasibility signal. The one place in the core where `tracing` is
//! wired in; the encoder and result assembler stay pure.

use crate::modeling::{Model, SolveOutcome, SolverConfig};

/// Runs `model.solve()`, logging variable/constraint counts beforehand and
/// a warning if the backend reports no solution or a backend failure.
pub fn drive<M: Model>(model: M, num_vars: usize, num_constraints: usize, config: &SolverConfig) -> SolveOutcome {
    tracing::debug!(num_vars, num_constraints, max_time_seconds = config.max_time_seconds, "solving GPU allocation model");
    let outcome = model.solve(config);
    match &outcome {
        SolveOutcome::Infeasible => tracing::warn!("GPU allocation model has no feasible solution"),
        SolveOutcome::Failed(err) => tracing::warn!(error = %err, "GPU allocation solver backend failed"),
        SolveOutcome::Solved(_) => {}
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::microlp_backend::MicrolpModel;
    use good_lp::constraint::geq;
    use good_lp::Expression;

    #[test]
    fn drive_reports_infeasible() {
        let mut model = MicrolpModel::new();
        let x = model.add_continuous_var("x", 0.0, Some(1.0));
        model.add_constraint(geq(Expression::from(x), 2.0), "impossible");
        model.minimize(Expression::from(x));
        let outcome = drive(model, 1, 1, &SolverConfig::default());
        assert!(matches!(outcome, SolveOutcome::Infeasible));
    }

    #[test]
    fn drive_forwards_time_limit_to_backend() {
        let mut model = MicrolpModel::new();
        let x = model.add_integer_var("x", 0.0, Some(5.0));
        model.add_constraint(geq(Expression::from(x), 1.0), "lb");
        model.minimize(Expression::from(x));
        let config = SolverConfig { max_time_seconds: 1.0 };
        let outcome = drive(model, 1, 1, &config);
        assert!(matches!(outcome, SolveOutcome::Solved(_)));
    }
}
