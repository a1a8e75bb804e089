//! The seam between the constraint model and the external MILP solver.
//!
//! The core treats the solver as an opaque collaborator: it hands over one
//! immutable model, receives a status plus variable values, and never
//! retries on its own.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{error::Result, model::SeatingModel};

/// Terminal status reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
}

impl SolveStatus {
    /// Whether the returned variable values describe a usable assignment.
    pub fn is_feasible(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// What a backend hands back. `values` is dense by [`VariableId`] and only
/// meaningful when the status is feasible.
///
/// [`VariableId`]: crate::model::variables::VariableId
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    pub status: SolveStatus,
    pub values: Vec<f64>,
}

/// Opaque pass-through knobs for the backend. Backends forward what they
/// support and log-and-ignore the rest; the core imposes no timeout or
/// cancellation policy of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    pub time_limit: Option<Duration>,
    pub threads: Option<usize>,
}

/// An external MILP solver.
///
/// A status of `Infeasible`/`Unbounded` is a normal outcome and comes back
/// as `Ok`; `Err` is reserved for the collaborator itself failing (crash,
/// licensing, resource exhaustion), surfaced as
/// [`Error::Solver`](crate::error::Error::Solver).
pub trait MilpBackend {
    fn name(&self) -> &'static str;

    fn solve(&self, model: &SeatingModel, config: &SolverConfig) -> Result<SolverOutcome>;
}
