//! Seatplan assigns entities ("students") to unique cells of a rectangular
//! seat grid under declarative placement rules: fixed seats, row
//! restrictions, minimum pairwise separation and maximum pairwise
//! separation.
//!
//! The crate's job is the translation, not the search: a
//! [`SeatingProblem`](problem::SeatingProblem) is compiled into a
//! binary-assignment mixed-integer linear program, handed once to a
//! pluggable [`MilpBackend`](solver::backend::MilpBackend) (the default is
//! the pure-Rust microlp solver), and the solved variable values are
//! decoded back into a [`Seating`](grid::Seating) grid with the one-hot
//! invariants checked.
//!
//! # Core Concepts
//!
//! - **[`SeatingProblem`](problem::SeatingProblem)**: the declarative input —
//!   grid dimensions, entity count and the four rule families.
//! - **[`ModelBuilder`](model::builder::ModelBuilder)**: validates the input
//!   and encodes each rule family as linear constraints over one binary
//!   variable per (entity, row, column) triple.
//! - **[`ObjectivePolicy`](model::objective::ObjectivePolicy)**: uniform
//!   coverage, or randomized weights that pick an arbitrary seating among
//!   the equally valid ones (seedable for reproducibility).
//! - **[`solver::solve`]**: build, solve once, decode once.
//!
//! # Example
//!
//! ```
//! use seatplan::{model::objective::ObjectivePolicy, problem::SeatingProblem, solver};
//!
//! // Two seats in one row; entity 0 is pinned to the left one.
//! let problem = SeatingProblem::new(1, 2, 2).fix(0, 0, 0);
//!
//! let result = solver::solve(&problem, ObjectivePolicy::UniformCoverage).unwrap();
//! assert_eq!(result.seating.get(0, 0), Some(0));
//! assert_eq!(result.seating.get(0, 1), Some(1));
//! ```
//!
//! Rule sets that are individually well-formed but jointly unsatisfiable
//! are not detected up front; the solver reports them and [`solver::solve`]
//! surfaces [`Error::Infeasible`](error::Error::Infeasible).

pub mod decode;
pub mod error;
pub mod grid;
pub mod model;
pub mod problem;
pub mod solver;
