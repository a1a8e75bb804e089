//! The constraint builder: validates a [`SeatingProblem`] and translates
//! its rule families into linear constraints over the variable space.
//!
//! Encodings:
//! - fixed placement: `x[e,h,w] = 1`
//! - row restriction: `Σ_{h∈R, w} x[e,h,w] = 1` (also serves as the
//!   entity's one-cell constraint; it must agree with the general
//!   per-entity constraint, which is added regardless)
//! - minimum separation: exact pairwise exclusion. For every ordered cell
//!   pair closer than the required distance, `x[e1,c1] + x[e2,c2] ≤ 1`.
//!   Quadratic in the seat count, but exact; an auxiliary-variable
//!   encoding would only bound the per-axis sum from below and admit
//!   seatings that are too close.
//! - maximum separation: per pair, two continuous auxiliaries bound the
//!   absolute row and column index differences, and their sum is capped.
//!   The per-axis sum over-approximates nothing and under-approximates
//!   true Manhattan distance; a documented modeling approximation.
//! - occupancy: each seat holds at most one entity (exactly one when the
//!   instance is full), each entity takes exactly one seat.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::{
    error::ConfigError,
    grid::{Cell, EntityId},
    model::{
        linear::{LinearConstraint, LinearExpr},
        objective::{self, ObjectivePolicy},
        variables::VariableSpace,
        SeatingModel,
    },
    problem::{SeatingProblem, SeparationRule},
};

pub struct ModelBuilder<'p> {
    problem: &'p SeatingProblem,
    space: VariableSpace,
    constraints: Vec<LinearConstraint>,
}

impl<'p> ModelBuilder<'p> {
    /// Validates `problem` and assembles the complete, immutable model.
    ///
    /// Only malformed input fails here. Rule sets that are individually
    /// well-formed but jointly unsatisfiable (say, a fixed seat outside an
    /// entity's allowed rows) build fine and surface as solver
    /// infeasibility.
    pub fn build(
        problem: &'p SeatingProblem,
        policy: ObjectivePolicy,
    ) -> Result<SeatingModel, ConfigError> {
        validate(problem)?;

        let space = VariableSpace::new(problem.entities, problem.height, problem.width)?;
        let objective = objective::compose(&space, policy);

        let mut builder = Self {
            problem,
            space,
            constraints: Vec::new(),
        };
        builder.fixed_seats();
        builder.row_restrictions();
        builder.min_separations();
        builder.max_separations();
        builder.seat_occupancy();
        builder.entity_placement();

        debug!(
            variables = builder.space.len(),
            constraints = builder.constraints.len(),
            "assembled seating model"
        );

        Ok(SeatingModel {
            space: builder.space,
            constraints: builder.constraints,
            objective,
        })
    }

    fn push(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    fn fixed_seats(&mut self) {
        for rule in &self.problem.fixed {
            let var = self.space.assignment(rule.entity, rule.cell);
            self.push(LinearConstraint::eq(
                format!(
                    "entity{}_fixed_r{}c{}",
                    rule.entity, rule.cell.row, rule.cell.col
                ),
                LinearExpr::new().term(var, 1.0),
                1.0,
            ));
        }
    }

    fn row_restrictions(&mut self) {
        for rule in &self.problem.rows {
            let mut expr = LinearExpr::with_capacity(rule.rows.len() * self.space.width() as usize);
            for &row in &rule.rows {
                for col in 0..self.space.width() {
                    expr.push(self.space.assignment(rule.entity, Cell::new(row, col)), 1.0);
                }
            }
            self.push(LinearConstraint::eq(
                format!("entity{}_rows{:?}", rule.entity, rule.rows),
                expr,
                1.0,
            ));
        }
    }

    /// Exact pairwise exclusion over every ordered cell pair closer than
    /// the required distance.
    fn min_separations(&mut self) {
        for rule in &self.problem.min_separation {
            let cells: Vec<Cell> = self.space.cells().collect();
            for &c1 in &cells {
                for &c2 in &cells {
                    if c1.manhattan(&c2) < rule.distance {
                        let expr = LinearExpr::new()
                            .term(self.space.assignment(rule.a, c1), 1.0)
                            .term(self.space.assignment(rule.b, c2), 1.0);
                        self.push(LinearConstraint::le(
                            format!(
                                "apart{}_{}_r{}c{}_r{}c{}",
                                rule.a, rule.b, c1.row, c1.col, c2.row, c2.col
                            ),
                            expr,
                            1.0,
                        ));
                    }
                }
            }
        }
    }

    /// Absolute-value linearization of the per-axis index differences.
    ///
    /// The `+1` offset keeps row and column weights strictly positive, so
    /// the bound chain is well-formed regardless of indexing origin.
    fn max_separations(&mut self) {
        for rule in &self.problem.max_separation {
            let alpha_row = self.space.push_auxiliary(0.0);
            let alpha_col = self.space.push_auxiliary(0.0);

            let mut row_diff = LinearExpr::with_capacity(2 * self.space.assignment_count());
            let mut col_diff = LinearExpr::with_capacity(2 * self.space.assignment_count());
            for cell in self.space.cells() {
                let va = self.space.assignment(rule.a, cell);
                let vb = self.space.assignment(rule.b, cell);
                row_diff.push(va, (cell.row + 1) as f64);
                row_diff.push(vb, -((cell.row + 1) as f64));
                col_diff.push(va, (cell.col + 1) as f64);
                col_diff.push(vb, -((cell.col + 1) as f64));
            }

            let tag = format!("close{}_{}", rule.a, rule.b);
            // -α ≤ Δ  and  Δ ≤ α, per axis.
            self.push(LinearConstraint::ge(
                format!("{tag}_row_lo"),
                row_diff.clone().term(alpha_row, 1.0),
                0.0,
            ));
            self.push(LinearConstraint::le(
                format!("{tag}_row_hi"),
                row_diff.term(alpha_row, -1.0),
                0.0,
            ));
            self.push(LinearConstraint::ge(
                format!("{tag}_col_lo"),
                col_diff.clone().term(alpha_col, 1.0),
                0.0,
            ));
            self.push(LinearConstraint::le(
                format!("{tag}_col_hi"),
                col_diff.term(alpha_col, -1.0),
                0.0,
            ));
            self.push(LinearConstraint::le(
                format!("{tag}_bound{}", rule.distance),
                LinearExpr::new().term(alpha_row, 1.0).term(alpha_col, 1.0),
                rule.distance as f64,
            ));
        }
    }

    /// One entity per seat. Exactly one when entities fill the grid, at
    /// most one otherwise; the choice is a fixed policy, not inferred from
    /// solver behavior.
    fn seat_occupancy(&mut self) {
        let full = self.problem.entities as u64 == self.problem.seats();
        for cell in self.space.cells().collect::<Vec<_>>() {
            let mut expr = LinearExpr::with_capacity(self.space.entities() as usize);
            for entity in 0..self.space.entities() {
                expr.push(self.space.assignment(entity, cell), 1.0);
            }
            let name = format!("seat_r{}c{}", cell.row, cell.col);
            self.push(if full {
                LinearConstraint::eq(name, expr, 1.0)
            } else {
                LinearConstraint::le(name, expr, 1.0)
            });
        }
    }

    /// Every entity takes exactly one seat.
    fn entity_placement(&mut self) {
        for entity in 0..self.space.entities() {
            let mut expr = LinearExpr::with_capacity(self.space.height() as usize * self.space.width() as usize);
            for cell in self.space.cells().collect::<Vec<_>>() {
                expr.push(self.space.assignment(entity, cell), 1.0);
            }
            self.push(LinearConstraint::eq(
                format!("entity{entity}_one_seat"),
                expr,
                1.0,
            ));
        }
    }
}

fn validate(problem: &SeatingProblem) -> Result<(), ConfigError> {
    if problem.height == 0 || problem.width == 0 {
        return Err(ConfigError::EmptyGrid {
            height: problem.height,
            width: problem.width,
        });
    }
    if problem.entities == 0 {
        return Err(ConfigError::NoEntities);
    }
    if problem.entities as u64 > problem.seats() {
        return Err(ConfigError::TooManyEntities {
            entities: problem.entities,
            height: problem.height,
            width: problem.width,
        });
    }

    let mut fixed_entities = HashSet::new();
    let mut fixed_cells: HashMap<Cell, EntityId> = HashMap::new();
    for rule in &problem.fixed {
        check_entity(rule.entity, problem)?;
        if rule.cell.row >= problem.height || rule.cell.col >= problem.width {
            return Err(ConfigError::CellOutOfRange {
                row: rule.cell.row,
                col: rule.cell.col,
                height: problem.height,
                width: problem.width,
            });
        }
        if !fixed_entities.insert(rule.entity) {
            return Err(ConfigError::DuplicateFixedSeat {
                entity: rule.entity,
            });
        }
        if let Some(&first) = fixed_cells.get(&rule.cell) {
            return Err(ConfigError::FixedSeatCollision {
                first,
                second: rule.entity,
                row: rule.cell.row,
                col: rule.cell.col,
            });
        }
        fixed_cells.insert(rule.cell, rule.entity);
    }

    let mut row_entities = HashSet::new();
    for rule in &problem.rows {
        check_entity(rule.entity, problem)?;
        if rule.rows.is_empty() {
            return Err(ConfigError::EmptyRowSet {
                entity: rule.entity,
            });
        }
        let mut seen_rows = HashSet::new();
        for &row in &rule.rows {
            if row >= problem.height {
                return Err(ConfigError::RowOutOfRange {
                    row,
                    height: problem.height,
                });
            }
            // A repeated row would double its variables in the row-sum
            // encoding, turning `Σ x = 1` into the unsatisfiable `Σ 2x = 1`.
            if !seen_rows.insert(row) {
                return Err(ConfigError::DuplicateRow {
                    entity: rule.entity,
                    row,
                });
            }
        }
        if !row_entities.insert(rule.entity) {
            return Err(ConfigError::DuplicateRowRule {
                entity: rule.entity,
            });
        }
    }

    validate_pairs(&problem.min_separation, problem)?;
    validate_pairs(&problem.max_separation, problem)?;
    Ok(())
}

fn validate_pairs(rules: &[SeparationRule], problem: &SeatingProblem) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for rule in rules {
        check_entity(rule.a, problem)?;
        check_entity(rule.b, problem)?;
        if rule.a == rule.b {
            return Err(ConfigError::SelfPair { entity: rule.a });
        }
        if !seen.insert(rule.key()) {
            let (a, b) = rule.key();
            return Err(ConfigError::DuplicatePair { a, b });
        }
    }
    Ok(())
}

fn check_entity(entity: EntityId, problem: &SeatingProblem) -> Result<(), ConfigError> {
    if entity >= problem.entities {
        return Err(ConfigError::UnknownEntity {
            entity,
            entities: problem.entities,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::model::linear::Relation;

    fn build(problem: &SeatingProblem) -> SeatingModel {
        ModelBuilder::build(problem, ObjectivePolicy::UniformCoverage).unwrap()
    }

    fn build_err(problem: &SeatingProblem) -> ConfigError {
        ModelBuilder::build(problem, ObjectivePolicy::UniformCoverage).unwrap_err()
    }

    // --- Validation ---

    #[test]
    fn rejects_zero_dimensions_and_counts() {
        assert_eq!(
            build_err(&SeatingProblem::new(0, 2, 1)),
            ConfigError::EmptyGrid {
                height: 0,
                width: 2
            }
        );
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 0)),
            ConfigError::NoEntities
        );
    }

    #[test]
    fn rejects_more_entities_than_seats() {
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 5)),
            ConfigError::TooManyEntities {
                entities: 5,
                height: 2,
                width: 2
            }
        );
    }

    #[test]
    fn rejects_out_of_range_references() {
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 2).fix(7, 0, 0)),
            ConfigError::UnknownEntity {
                entity: 7,
                entities: 2
            }
        );
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 2).fix(0, 2, 0)),
            ConfigError::CellOutOfRange {
                row: 2,
                col: 0,
                height: 2,
                width: 2
            }
        );
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 2).allow_rows(0, vec![3])),
            ConfigError::RowOutOfRange { row: 3, height: 2 }
        );
    }

    #[test]
    fn rejects_conflicting_fixed_seats() {
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 2).fix(0, 0, 0).fix(0, 1, 1)),
            ConfigError::DuplicateFixedSeat { entity: 0 }
        );
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 2).fix(0, 0, 0).fix(1, 0, 0)),
            ConfigError::FixedSeatCollision {
                first: 0,
                second: 1,
                row: 0,
                col: 0
            }
        );
    }

    #[test]
    fn rejects_malformed_row_rules() {
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 2).allow_rows(0, Vec::new())),
            ConfigError::EmptyRowSet { entity: 0 }
        );
        assert_eq!(
            build_err(
                &SeatingProblem::new(2, 2, 2)
                    .allow_rows(0, vec![0])
                    .allow_rows(0, vec![1])
            ),
            ConfigError::DuplicateRowRule { entity: 0 }
        );
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 4).allow_rows(0, vec![0, 0])),
            ConfigError::DuplicateRow { entity: 0, row: 0 }
        );
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert_eq!(
            build_err(&SeatingProblem::new(2, 2, 2).keep_apart(1, 1, 2)),
            ConfigError::SelfPair { entity: 1 }
        );
        // (b, a) is the same unordered pair as (a, b).
        assert_eq!(
            build_err(
                &SeatingProblem::new(2, 2, 3)
                    .keep_close(0, 1, 2)
                    .keep_close(1, 0, 3)
            ),
            ConfigError::DuplicatePair { a: 0, b: 1 }
        );
    }

    // --- Encoding shape ---

    #[test]
    fn bare_problem_gets_only_occupancy_constraints() {
        let model = build(&SeatingProblem::new(2, 2, 4));
        // 4 seat constraints + 4 entity constraints.
        assert_eq!(model.constraints.len(), 8);
        assert!(model
            .constraints
            .iter()
            .all(|c| c.relation == Relation::Equal && c.rhs == 1.0));
        assert_eq!(model.space.len(), 16);
    }

    #[test]
    fn seat_occupancy_relaxes_to_at_most_one_when_grid_is_not_full() {
        let model = build(&SeatingProblem::new(2, 2, 3));
        let seat_relations: Vec<Relation> = model
            .constraints
            .iter()
            .filter(|c| c.name.starts_with("seat_"))
            .map(|c| c.relation)
            .collect();
        assert_eq!(seat_relations, vec![Relation::LessEq; 4]);
    }

    #[test]
    fn fixed_seat_adds_a_single_unit_equality() {
        let model = build(&SeatingProblem::new(2, 2, 4).fix(3, 1, 0));
        let constraint = model
            .constraints
            .iter()
            .find(|c| c.name == "entity3_fixed_r1c0")
            .unwrap();
        assert_eq!(constraint.relation, Relation::Equal);
        assert_eq!(constraint.rhs, 1.0);
        assert_eq!(
            constraint.expr.terms(),
            &[(model.space.assignment(3, Cell::new(1, 0)), 1.0)]
        );
    }

    #[test]
    fn row_restriction_sums_over_allowed_rows_only() {
        let model = build(&SeatingProblem::new(3, 2, 6).allow_rows(2, vec![0, 2]));
        let constraint = model
            .constraints
            .iter()
            .find(|c| c.name.starts_with("entity2_rows"))
            .unwrap();
        // 2 allowed rows x 2 columns.
        assert_eq!(constraint.expr.len(), 4);
        let row1_var = model.space.assignment(2, Cell::new(1, 0));
        assert!(constraint.expr.terms().iter().all(|(v, _)| *v != row1_var));
    }

    #[test]
    fn min_separation_excludes_every_close_ordered_cell_pair() {
        // 1x3 grid, distance 2: ordered pairs closer than 2 are the three
        // identical pairs plus four adjacent ones.
        let model = build(&SeatingProblem::new(1, 3, 2).keep_apart(0, 1, 2));
        let exclusions: Vec<_> = model
            .constraints
            .iter()
            .filter(|c| c.name.starts_with("apart"))
            .collect();
        assert_eq!(exclusions.len(), 7);
        assert!(exclusions
            .iter()
            .all(|c| c.relation == Relation::LessEq && c.rhs == 1.0 && c.expr.len() == 2));
    }

    #[test]
    fn min_separation_of_zero_is_a_no_op() {
        let model = build(&SeatingProblem::new(2, 2, 2).keep_apart(0, 1, 0));
        assert!(!model.constraints.iter().any(|c| c.name.starts_with("apart")));
    }

    #[test]
    fn max_separation_adds_two_auxiliaries_and_five_constraints() {
        let problem = SeatingProblem::new(2, 3, 4).keep_close(1, 3, 2);
        let model = build(&problem);
        assert_eq!(model.space.len(), model.space.assignment_count() + 2);

        let close: Vec<_> = model
            .constraints
            .iter()
            .filter(|c| c.name.starts_with("close1_3"))
            .collect();
        assert_eq!(close.len(), 5);

        let bound = close.iter().find(|c| c.name == "close1_3_bound2").unwrap();
        assert_eq!(bound.relation, Relation::LessEq);
        assert_eq!(bound.rhs, 2.0);
        assert_eq!(bound.expr.len(), 2);
    }

    #[test]
    fn max_separation_weights_use_one_based_indices() {
        let model = build(&SeatingProblem::new(2, 2, 2).keep_close(0, 1, 1));
        let row_lo = model
            .constraints
            .iter()
            .find(|c| c.name == "close0_1_row_lo")
            .unwrap();
        let var = model.space.assignment(0, Cell::new(1, 1));
        let coef = row_lo
            .expr
            .terms()
            .iter()
            .find(|(v, _)| *v == var)
            .map(|(_, c)| *c)
            .unwrap();
        assert_eq!(coef, 2.0); // row index 1, offset to 2
    }

    proptest! {
        #[test]
        fn well_formed_problems_always_build(
            height in 1u32..5,
            width in 1u32..5,
            close_pairs in 0usize..3,
            distance in 0u32..6,
        ) {
            let entities = height * width;
            let mut problem = SeatingProblem::new(height, width, entities);
            if entities >= 2 {
                problem = problem.keep_apart(0, 1, distance);
                for i in 0..close_pairs.min((entities as usize - 1) / 2) {
                    let a = (2 * i) as u32;
                    let b = a + 1;
                    if (a, b) != (0, 1) {
                        problem = problem.keep_close(a, b, distance);
                    }
                }
            }
            let model = ModelBuilder::build(&problem, ObjectivePolicy::RandomTieBreak { seed: Some(7) })
                .unwrap();

            // Auxiliaries: two per close pair, appended after the binaries.
            let close = problem.max_separation.len();
            prop_assert_eq!(model.space.len(), model.space.assignment_count() + 2 * close);
            // The objective never touches auxiliaries.
            prop_assert!(model.objective.terms().iter()
                .all(|(v, _)| (*v as usize) < model.space.assignment_count()));
            // One placement constraint per entity, one occupancy per seat.
            let placements = model.constraints.iter()
                .filter(|c| c.name.ends_with("_one_seat")).count();
            prop_assert_eq!(placements, entities as usize);
            let seats = model.constraints.iter()
                .filter(|c| c.name.starts_with("seat_")).count();
            prop_assert_eq!(seats, (height * width) as usize);
        }
    }
}
