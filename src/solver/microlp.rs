//! Default backend: the pure-Rust `microlp` branch-and-bound solver,
//! driven through `good_lp`'s modeling layer.

use std::time::Instant;

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::debug;

use crate::{
    error::{Error, Result},
    model::{
        linear::{LinearExpr, Relation},
        variables::VariableKind,
        SeatingModel,
    },
    solver::backend::{MilpBackend, SolveStatus, SolverConfig, SolverOutcome},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpBackend;

impl MilpBackend for MicrolpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &SeatingModel, config: &SolverConfig) -> Result<SolverOutcome> {
        if config.time_limit.is_some() || config.threads.is_some() {
            debug!("microlp runs single-threaded with no time limit; solver config ignored");
        }

        let mut problem_vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .space
            .kinds()
            .map(|kind| match kind {
                VariableKind::Binary => problem_vars.add(variable().binary()),
                VariableKind::Continuous { min } => problem_vars.add(variable().min(min)),
            })
            .collect();

        let objective = to_expression(&model.objective, &handles);
        let mut problem = problem_vars.maximise(objective).using(microlp);
        for c in &model.constraints {
            let lhs = to_expression(&c.expr, &handles);
            problem = problem.with(match c.relation {
                Relation::Equal => constraint::eq(lhs, c.rhs),
                Relation::LessEq => constraint::leq(lhs, c.rhs),
                Relation::GreaterEq => constraint::geq(lhs, c.rhs),
            });
        }

        let started = Instant::now();
        match problem.solve() {
            Ok(solution) => {
                let values = handles.iter().map(|v| solution.value(*v)).collect();
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "microlp found an optimal assignment"
                );
                Ok(SolverOutcome {
                    status: SolveStatus::Optimal,
                    values,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(SolverOutcome {
                status: SolveStatus::Infeasible,
                values: Vec::new(),
            }),
            Err(ResolutionError::Unbounded) => Ok(SolverOutcome {
                status: SolveStatus::Unbounded,
                values: Vec::new(),
            }),
            Err(other) => Err(Error::Solver(other.to_string())),
        }
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    expr.terms()
        .iter()
        .fold(Expression::from(0.0), |acc, (id, coefficient)| {
            acc + *coefficient * handles[*id as usize]
        })
}
