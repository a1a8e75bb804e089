use serde::{Deserialize, Serialize};

/// Identifies one entity (a student, in the classic instance). Entities are
/// numbered `0..n` within a single optimization run and have no lifecycle
/// beyond it.
pub type EntityId = u32;

/// A single seat position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance: sum of absolute row and column differences.
    pub fn manhattan(&self, other: &Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// The decoded seat grid: one optional entity per cell.
///
/// `None` marks an empty seat, which can only occur when the problem has
/// fewer entities than seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seating {
    height: u32,
    width: u32,
    cells: Vec<Option<EntityId>>,
}

impl Seating {
    pub(crate) fn new(height: u32, width: u32, cells: Vec<Option<EntityId>>) -> Self {
        debug_assert_eq!(cells.len(), (height * width) as usize);
        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// The entity seated at `(row, col)`, or `None` for an empty seat.
    /// Out-of-range coordinates also return `None` rather than aliasing a
    /// neighboring cell through the flat index.
    pub fn get(&self, row: u32, col: u32) -> Option<EntityId> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[(row * self.width + col) as usize]
    }

    /// Where `entity` ended up, if it is seated at all.
    pub fn position_of(&self, entity: EntityId) -> Option<Cell> {
        self.cells
            .iter()
            .position(|seat| *seat == Some(entity))
            .map(|i| Cell::new(i as u32 / self.width, i as u32 % self.width))
    }

    /// Iterates over the grid one row at a time, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<EntityId>]> {
        self.cells.chunks(self.width as usize)
    }

    /// Number of occupied seats.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|seat| seat.is_some()).count()
    }
}
