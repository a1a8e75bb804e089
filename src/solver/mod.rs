//! Orchestration: build the model, invoke the backend once, decode once.

pub mod backend;
pub mod microlp;

use tracing::debug;

use crate::{
    decode,
    error::{Error, Result},
    grid::Seating,
    model::{builder::ModelBuilder, objective::ObjectivePolicy},
    problem::SeatingProblem,
    solver::{
        backend::{MilpBackend, SolveStatus, SolverConfig},
        microlp::MicrolpBackend,
    },
};

/// A decoded seating plus the status the solver reported for it.
#[derive(Debug, Clone)]
pub struct SeatingResult {
    pub seating: Seating,
    pub status: SolveStatus,
}

/// Solves `problem` with the default backend and configuration.
pub fn solve(problem: &SeatingProblem, policy: ObjectivePolicy) -> Result<SeatingResult> {
    solve_with(&MicrolpBackend, &SolverConfig::default(), problem, policy)
}

/// Solves `problem` with an injected backend.
///
/// A non-feasible status becomes [`Error::Infeasible`]; no decode is
/// attempted in that case.
pub fn solve_with(
    backend: &dyn MilpBackend,
    config: &SolverConfig,
    problem: &SeatingProblem,
    policy: ObjectivePolicy,
) -> Result<SeatingResult> {
    let model = ModelBuilder::build(problem, policy)?;
    debug!(
        backend = backend.name(),
        variables = model.space.len(),
        constraints = model.constraints.len(),
        "handing model to solver"
    );
    let outcome = backend.solve(&model, config)?;
    if !outcome.status.is_feasible() {
        return Err(Error::Infeasible {
            status: outcome.status,
        });
    }
    let seating = decode::decode(&model.space, &outcome.values)?;
    Ok(SeatingResult {
        seating,
        status: outcome.status,
    })
}
