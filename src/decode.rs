//! Decodes solved variable values back into a seat grid.
//!
//! Solvers return floating-point values even for binary variables, so a
//! cell is considered occupied by an entity when that entity's assignment
//! variable is within [`INTEGRALITY_TOLERANCE`] of 1. The one-hot
//! invariants are re-checked defensively; a well-behaved backend can never
//! trip them, but a pathological tolerance failure must not decode into a
//! corrupt grid silently.

use crate::{
    error::ConsistencyError,
    grid::{EntityId, Seating},
    model::variables::VariableSpace,
};

/// Absolute band around 1.0 within which a relaxed binary counts as set.
pub const INTEGRALITY_TOLERANCE: f64 = 1e-4;

/// Pure function of `(space, values)`: the same inputs always decode to the
/// same grid.
pub fn decode(space: &VariableSpace, values: &[f64]) -> Result<Seating, ConsistencyError> {
    if values.len() < space.len() {
        return Err(ConsistencyError::MissingValues {
            expected: space.len(),
            got: values.len(),
        });
    }

    let width = space.width();
    let mut cells: Vec<Option<EntityId>> = vec![None; space.height() as usize * width as usize];

    for (entity, cell, var) in space.assignments() {
        if values[var as usize] > 1.0 - INTEGRALITY_TOLERANCE {
            let slot = &mut cells[(cell.row * width + cell.col) as usize];
            if let Some(first) = *slot {
                return Err(ConsistencyError::AmbiguousCell {
                    row: cell.row,
                    col: cell.col,
                    first,
                    second: entity,
                });
            }
            *slot = Some(entity);
        }
    }

    // Each entity must have landed on exactly one seat.
    let mut seats_per_entity = vec![0u32; space.entities() as usize];
    for entity in cells.iter().flatten() {
        seats_per_entity[*entity as usize] += 1;
    }
    for (entity, &seats) in seats_per_entity.iter().enumerate() {
        if seats != 1 {
            return Err(ConsistencyError::MisplacedEntity {
                entity: entity as EntityId,
                seats,
            });
        }
    }

    Ok(Seating::new(space.height(), width, cells))
}
