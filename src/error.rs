use crate::{grid::EntityId, solver::backend::SolveStatus};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Malformed or contradictory problem input, detected before any solver
/// invocation. Never silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive (got {height}x{width})")]
    EmptyGrid { height: u32, width: u32 },

    #[error("entity count must be positive")]
    NoEntities,

    #[error("{entities} entities cannot fit a {height}x{width} grid")]
    TooManyEntities {
        entities: u32,
        height: u32,
        width: u32,
    },

    #[error("entity {entity} is out of range (entity count is {entities})")]
    UnknownEntity { entity: EntityId, entities: u32 },

    #[error("cell ({row}, {col}) lies outside the {height}x{width} grid")]
    CellOutOfRange {
        row: u32,
        col: u32,
        height: u32,
        width: u32,
    },

    #[error("row {row} lies outside a grid of height {height}")]
    RowOutOfRange { row: u32, height: u32 },

    #[error("entity {entity} has an empty allowed-row set")]
    EmptyRowSet { entity: EntityId },

    #[error("entity {entity} repeats row {row} in its allowed-row set")]
    DuplicateRow { entity: EntityId, row: u32 },

    #[error("entity {entity} is fixed to more than one seat")]
    DuplicateFixedSeat { entity: EntityId },

    #[error("entities {first} and {second} are both fixed to cell ({row}, {col})")]
    FixedSeatCollision {
        first: EntityId,
        second: EntityId,
        row: u32,
        col: u32,
    },

    #[error("entity {entity} has more than one row restriction")]
    DuplicateRowRule { entity: EntityId },

    #[error("entity {entity} is paired with itself in a separation rule")]
    SelfPair { entity: EntityId },

    #[error("pair ({a}, {b}) appears more than once in the same rule family")]
    DuplicatePair { a: EntityId, b: EntityId },
}

/// A decoded solution that violates the one-entity-per-cell invariant.
///
/// The constraint model makes these states unreachable for an exact solver;
/// the decoder still checks for them because backends return floating-point
/// values for binary variables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("cell ({row}, {col}) is claimed by entities {first} and {second}")]
    AmbiguousCell {
        row: u32,
        col: u32,
        first: EntityId,
        second: EntityId,
    },

    #[error("entity {entity} occupies {seats} seats in the decoded grid")]
    MisplacedEntity { entity: EntityId, seats: u32 },

    #[error("solver returned {got} variable values, but the model has {expected}")]
    MissingValues { expected: usize, got: usize },
}

/// Top-level error taxonomy. Every variant is terminal for the current
/// invocation; there is no partial-result or degraded-mode output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid seating problem: {0}")]
    Config(#[from] ConfigError),

    #[error("no seating satisfies the rules (solver status: {status:?})")]
    Infeasible { status: SolveStatus },

    #[error("decoded seating is inconsistent: {0}")]
    Consistency(#[from] ConsistencyError),

    #[error("solver failure: {0}")]
    Solver(String),
}
