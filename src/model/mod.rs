//! Model construction: the decision variable space, linear constraint
//! vocabulary, objective policies and the builder that ties them together.

pub mod builder;
pub mod linear;
pub mod objective;
pub mod variables;

use crate::model::{
    linear::{LinearConstraint, LinearExpr},
    variables::VariableSpace,
};

/// A fully-assembled, immutable optimization model.
///
/// Built in a single step and handed to a solver backend once; there is no
/// incremental constraint registration, so constraint-family ordering can
/// never matter.
#[derive(Debug, Clone)]
pub struct SeatingModel {
    pub space: VariableSpace,
    pub constraints: Vec<LinearConstraint>,
    pub objective: LinearExpr,
}
