//! The decision variable space: one binary variable per (entity, row,
//! column) triple, plus continuous auxiliaries appended by the constraint
//! builder when linearizing absolute values.

use crate::{
    error::ConfigError,
    grid::{Cell, EntityId},
};

/// Dense index into the variable space.
pub type VariableId = u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableKind {
    /// Constrained to {0, 1}.
    Binary,
    /// Continuous with a lower bound.
    Continuous { min: f64 },
}

/// Allocates and indexes the model's variables.
///
/// Assignment variables occupy the dense prefix `0 .. n·h·w` with index
/// `((entity · h) + row) · w + col`; auxiliary variables follow. The space
/// is created once per invocation and never mutated after the model is
/// handed to a backend.
#[derive(Debug, Clone)]
pub struct VariableSpace {
    entities: u32,
    height: u32,
    width: u32,
    kinds: Vec<VariableKind>,
}

impl VariableSpace {
    pub fn new(entities: u32, height: u32, width: u32) -> Result<Self, ConfigError> {
        if height == 0 || width == 0 {
            return Err(ConfigError::EmptyGrid { height, width });
        }
        if entities == 0 {
            return Err(ConfigError::NoEntities);
        }
        let count = entities as usize * height as usize * width as usize;
        Ok(Self {
            entities,
            height,
            width,
            kinds: vec![VariableKind::Binary; count],
        })
    }

    pub fn entities(&self) -> u32 {
        self.entities
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// The binary variable meaning "`entity` occupies `cell`".
    pub fn assignment(&self, entity: EntityId, cell: Cell) -> VariableId {
        debug_assert!(entity < self.entities);
        debug_assert!(cell.row < self.height && cell.col < self.width);
        (entity * self.height + cell.row) * self.width + cell.col
    }

    /// Appends a continuous auxiliary variable with the given lower bound
    /// and returns its id.
    pub fn push_auxiliary(&mut self, min: f64) -> VariableId {
        self.kinds.push(VariableKind::Continuous { min });
        (self.kinds.len() - 1) as VariableId
    }

    pub fn kind(&self, id: VariableId) -> VariableKind {
        self.kinds[id as usize]
    }

    pub fn kinds(&self) -> impl Iterator<Item = VariableKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Total variable count, auxiliaries included.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Number of assignment variables (the dense binary prefix).
    pub fn assignment_count(&self) -> usize {
        self.entities as usize * self.height as usize * self.width as usize
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(row, col)))
    }

    /// Every (entity, cell, variable) triple in the assignment prefix.
    pub fn assignments(&self) -> impl Iterator<Item = (EntityId, Cell, VariableId)> + '_ {
        (0..self.entities).flat_map(move |entity| {
            self.cells()
                .map(move |cell| (entity, cell, self.assignment(entity, cell)))
        })
    }
}
