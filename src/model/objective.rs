//! Objective composition.
//!
//! Both policies produce a linear objective over the assignment variables
//! only, to be maximized. The objective value itself is meaningless for
//! fully-constrained instances; the randomized policy exists purely to
//! diversify otherwise-equivalent optimal seatings.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::model::{linear::LinearExpr, variables::VariableSpace};

/// How the objective weights each assignment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectivePolicy {
    /// Coefficient 1.0 everywhere: maximizes the number of seated entities.
    /// Only discriminating when the grid has more seats than entities.
    UniformCoverage,
    /// Independent coefficients drawn from [0, 1), freshly per invocation.
    /// A seed makes the draw (and therefore the chosen seating, for a
    /// deterministic backend) reproducible.
    RandomTieBreak { seed: Option<u64> },
}

impl Default for ObjectivePolicy {
    fn default() -> Self {
        ObjectivePolicy::RandomTieBreak { seed: None }
    }
}

pub(crate) fn compose(space: &VariableSpace, policy: ObjectivePolicy) -> LinearExpr {
    match policy {
        ObjectivePolicy::UniformCoverage => weighted(space, |_| 1.0),
        ObjectivePolicy::RandomTieBreak { seed: Some(seed) } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            weighted(space, |_| rng.gen::<f64>())
        }
        ObjectivePolicy::RandomTieBreak { seed: None } => {
            let mut rng = rand::thread_rng();
            weighted(space, |_| rng.gen::<f64>())
        }
    }
}

fn weighted(space: &VariableSpace, mut weight: impl FnMut(usize) -> f64) -> LinearExpr {
    let mut expr = LinearExpr::with_capacity(space.assignment_count());
    for (i, (_, _, id)) in space.assignments().enumerate() {
        expr.push(id, weight(i));
    }
    expr
}
