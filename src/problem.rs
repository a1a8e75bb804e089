//! The declarative input to a solve: grid dimensions, entity count and the
//! four rule families. A [`SeatingProblem`] is a plain value object; all
//! validation happens in the model builder so that malformed input is
//! reported before any solver invocation.

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, EntityId};

/// Pins an entity to one specific seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedSeat {
    pub entity: EntityId,
    pub cell: Cell,
}

/// Restricts an entity to a set of allowed rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRule {
    pub entity: EntityId,
    pub rows: Vec<u32>,
}

/// A spacing rule over an unordered entity pair.
///
/// In the `min_separation` family, `distance` is the minimum required
/// Manhattan distance between the pair's seats. In the `max_separation`
/// family it is an upper bound on the sum of per-axis index differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparationRule {
    pub a: EntityId,
    pub b: EntityId,
    pub distance: u32,
}

impl SeparationRule {
    pub fn new(a: EntityId, b: EntityId, distance: u32) -> Self {
        Self { a, b, distance }
    }

    /// Canonical key for unordered-pair deduplication.
    pub(crate) fn key(&self) -> (EntityId, EntityId) {
        (self.a.min(self.b), self.a.max(self.b))
    }
}

/// A full problem instance. Rule collections default to empty, so a bare
/// `SeatingProblem::new(h, w, n)` asks only for a collision-free assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingProblem {
    pub height: u32,
    pub width: u32,
    pub entities: u32,
    #[serde(default)]
    pub fixed: Vec<FixedSeat>,
    #[serde(default)]
    pub rows: Vec<RowRule>,
    #[serde(default)]
    pub min_separation: Vec<SeparationRule>,
    #[serde(default)]
    pub max_separation: Vec<SeparationRule>,
}

impl SeatingProblem {
    pub fn new(height: u32, width: u32, entities: u32) -> Self {
        Self {
            height,
            width,
            entities,
            ..Default::default()
        }
    }

    /// Total seat count.
    pub fn seats(&self) -> u64 {
        self.height as u64 * self.width as u64
    }

    /// Pins `entity` to `(row, col)`.
    pub fn fix(mut self, entity: EntityId, row: u32, col: u32) -> Self {
        self.fixed.push(FixedSeat {
            entity,
            cell: Cell::new(row, col),
        });
        self
    }

    /// Restricts `entity` to the given rows.
    pub fn allow_rows(mut self, entity: EntityId, rows: impl Into<Vec<u32>>) -> Self {
        self.rows.push(RowRule {
            entity,
            rows: rows.into(),
        });
        self
    }

    /// Requires `a` and `b` to sit at least `distance` apart (Manhattan).
    pub fn keep_apart(mut self, a: EntityId, b: EntityId, distance: u32) -> Self {
        self.min_separation.push(SeparationRule::new(a, b, distance));
        self
    }

    /// Requires `a` and `b` to sit within `distance` of each other
    /// (per-axis sum).
    pub fn keep_close(mut self, a: EntityId, b: EntityId, distance: u32) -> Self {
        self.max_separation.push(SeparationRule::new(a, b, distance));
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builder_methods_accumulate_rules() {
        let problem = SeatingProblem::new(2, 3, 6)
            .fix(0, 1, 2)
            .allow_rows(1, vec![0])
            .keep_apart(2, 3, 2)
            .keep_close(4, 5, 1);

        assert_eq!(problem.seats(), 6);
        assert_eq!(problem.fixed, vec![FixedSeat { entity: 0, cell: Cell::new(1, 2) }]);
        assert_eq!(problem.rows.len(), 1);
        assert_eq!(problem.min_separation, vec![SeparationRule::new(2, 3, 2)]);
        assert_eq!(problem.max_separation, vec![SeparationRule::new(4, 5, 1)]);
    }

    #[test]
    fn pair_key_is_order_independent() {
        assert_eq!(
            SeparationRule::new(7, 3, 1).key(),
            SeparationRule::new(3, 7, 4).key()
        );
    }

    #[test]
    fn serde_round_trip() {
        let problem = SeatingProblem::new(6, 7, 42)
            .fix(21, 2, 3)
            .allow_rows(1, vec![0, 1])
            .keep_apart(5, 7, 3)
            .keep_close(12, 14, 2);

        let json = serde_json::to_string(&problem).unwrap();
        let back: SeatingProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, problem);
    }

    #[test]
    fn rule_collections_default_to_empty_in_json() {
        let problem: SeatingProblem =
            serde_json::from_str(r#"{"height": 2, "width": 2, "entities": 4}"#).unwrap();
        assert_eq!(problem, SeatingProblem::new(2, 2, 4));
    }
}
