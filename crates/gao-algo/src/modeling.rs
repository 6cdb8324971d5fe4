//! Abstract modeling interface.
//!
//! A narrow, solver-agnostic contract the [`crate::encoder`] builds a MILP
//! against. The shipped implementation ([`microlp_backend::MicrolpModel`])
//! wraps `good_lp`'s `microlp` feature, a pure-Rust branch-and-bound solver;
//! any other `good_lp`-compatible backend could replace it without touching
//! the encoder, since `Var`/`Expr` are `good_lp`'s own types and the axis of
//! variability is which solver function `good_lp` is told to `.using(...)`.

use good_lp::constraint::leq;
use std::collections::HashMap;
use std::hash::Hash;

pub use good_lp::{Expression as Expr, Variable as Var};

/// Outcome of [`Model::solve`].
pub enum SolveOutcome {
    Solved(Box<dyn good_lp::Solution>),
    /// No feasible solution exists — a normal outcome for this domain, not
    /// an error (§7 kind 1).
    Infeasible,
    /// The backend raised an error unrelated to feasibility (internal solver
    /// failure) — propagates as `GaoError::Solver` (§7 kind 3).
    Failed(String),
}

impl SolveOutcome {
    pub fn value_of(&self, var: Var) -> Option<f64> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution.value(var)),
            SolveOutcome::Infeasible | SolveOutcome::Failed(_) => None,
        }
    }

    pub fn values_of<K: Eq + Hash + Clone>(&self, vars: &HashMap<K, Var>) -> Option<HashMap<K, f64>> {
        match self {
            SolveOutcome::Solved(solution) => Some(
                vars.iter()
                    .map(|(k, &v)| (k.clone(), solution.value(v)))
                    .collect(),
            ),
            SolveOutcome::Infeasible | SolveOutcome::Failed(_) => None,
        }
    }
}

/// Solver backend tuning, forwarded by the Solver Driver. Grounded on the
/// reference crate's per-solver `*SolverConfig` structs (e.g. TEP's
/// `max_time_seconds`/`mip_gap`/`verbose` knobs) — trimmed to the one knob
/// `good_lp`'s `microlp` feature actually exposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock budget for the branch-and-bound search. `0.0` means no
    /// limit.
    pub max_time_seconds: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_time_seconds: 300.0 }
    }
}

/// A solver-neutral contract for declaring a MILP, keyed by caller-chosen
/// tuples, and reading back a solution.
pub trait Model {
    fn add_integer_var(&mut self, name: &str, lb: f64, ub: Option<f64>) -> Var;
    fn add_continuous_var(&mut self, name: &str, lb: f64, ub: Option<f64>) -> Var;

    fn add_integer_vars<K: Eq + Hash + Clone>(
        &mut self,
        keys: impl IntoIterator<Item = K>,
        name: &str,
    ) -> HashMap<K, Var> {
        keys.into_iter()
            .map(|k| (k, self.add_integer_var(name, 0.0, None)))
            .collect()
    }

    fn add_continuous_vars<K: Eq + Hash + Clone>(
        &mut self,
        keys: impl IntoIterator<Item = K>,
        name: &str,
        lb: f64,
        ub: Option<f64>,
    ) -> HashMap<K, Var> {
        keys.into_iter()
            .map(|k| (k, self.add_continuous_var(name, lb, ub)))
            .collect()
    }

    fn add_constraint(&mut self, constraint: good_lp::Constraint, name: &str);

    fn add_constraints(
        &mut self,
        constraints: impl IntoIterator<Item = good_lp::Constraint>,
        name: &str,
    ) {
        for c in constraints {
            self.add_constraint(c, name);
        }
    }

    /// Special-Ordered-Set-Type-1: at most one of `members` may be non-zero.
    ///
    /// Lowered to one binary indicator per member plus `Σ indicators ≤ 1`
    /// and a big-M link `var ≤ M · indicator`. `M` is the member's declared
    /// upper bound when finite, else a conservative constant.
    fn add_sos1(&mut self, members: &[Var]);

    fn sum(&self, terms: impl IntoIterator<Item = Expr>) -> Expr {
        terms.into_iter().fold(Expr::from(0.0), |acc, t| acc + t)
    }

    fn minimize(&mut self, objective: Expr);

    /// Invokes the backend. Consumes the model.
    fn solve(self, config: &SolverConfig) -> SolveOutcome;
}

pub mod microlp_backend {
    use super::*;

    const DEFAULT_BIG_M: f64 = 1.0e6;

    struct NamedConstraint {
        constraint: good_lp::Constraint,
    }

    /// `good_lp`'s `microlp` feature, behind the [`Model`] contract.
    pub struct MicrolpModel {
        vars: good_lp::ProblemVariables,
        constraints: Vec<NamedConstraint>,
        upper_bounds: HashMap<Var, f64>,
        objective: Expr,
    }

    impl Default for MicrolpModel {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MicrolpModel {
        pub fn new() -> Self {
            Self {
                vars: good_lp::ProblemVariables::new(),
                constraints: Vec::new(),
                upper_bounds: HashMap::new(),
                objective: Expr::from(0.0),
            }
        }

        pub fn num_vars(&self) -> usize {
            self.upper_bounds.len()
        }

        pub fn num_constraints(&self) -> usize {
            self.constraints.len()
        }

        fn add_var(&mut self, lb: f64, ub: Option<f64>, integer: bool) -> Var {
            let mut def = good_lp::variable().min(lb);
            if let Some(u) = ub {
                def = def.max(u);
            }
            if integer {
                def = def.integer();
            }
            let v = self.vars.add(def);
            if let Some(u) = ub {
                self.upper_bounds.insert(v, u);
            }
            v
        }
    }

    impl Model for MicrolpModel {
        fn add_integer_var(&mut self, _name: &str, lb: f64, ub: Option<f64>) -> Var {
            self.add_var(lb, ub, true)
        }

        fn add_continuous_var(&mut self, _name: &str, lb: f64, ub: Option<f64>) -> Var {
            self.add_var(lb, ub, false)
        }

        fn add_constraint(&mut self, constraint: good_lp::Constraint, _name: &str) {
            self.constraints.push(NamedConstraint { constraint });
        }

        fn add_sos1(&mut self, members: &[Var]) {
            let mut indicators = Vec::with_capacity(members.len());
            for &member in members {
                let indicator = self.add_integer_var("sos1_indicator", 0.0, Some(1.0));
                let big_m = self.upper_bounds.get(&member).copied().unwrap_or(DEFAULT_BIG_M);
                self.add_constraint(leq(Expr::from(member), big_m * Expr::from(indicator)), "sos1_bigm");
                indicators.push(indicator);
            }
            let sum_indicators = self.sum(indicators.into_iter().map(Expr::from));
            self.add_constraint(leq(sum_indicators, 1.0), "sos1_indicator_sum");
        }

        fn minimize(&mut self, objective: Expr) {
            self.objective = objective;
        }

        fn solve(self, config: &SolverConfig) -> SolveOutcome {
            use good_lp::{ResolutionError, SolverModel, WithTimeLimit};

            let mut model = self.vars.minimise(self.objective).using(good_lp::microlp);
            for c in self.constraints {
                model = model.with(c.constraint);
            }
            if config.max_time_seconds > 0.0 {
                model = model.with_time_limit(config.max_time_seconds);
            }
            match model.solve() {
                Ok(solution) => SolveOutcome::Solved(Box::new(solution)),
                Err(ResolutionError::Infeasible) => SolveOutcome::Infeasible,
                Err(err) => SolveOutcome::Failed(err.to_string()),
            }
        }
    }

}
