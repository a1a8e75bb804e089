//! The linear algebra vocabulary shared by the builder and the solver
//! backends: expressions as sparse term lists over [`VariableId`]s, and
//! named (in)equality constraints.

use crate::model::variables::VariableId;

/// A linear expression `Σ coefficient · variable`.
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    terms: Vec<(VariableId, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
        }
    }

    /// Appends a term. Duplicate variable ids are kept as-is; solvers sum
    /// their coefficients, which is what the encodings here rely on.
    pub fn term(mut self, variable: VariableId, coefficient: f64) -> Self {
        self.terms.push((variable, coefficient));
        self
    }

    pub fn push(&mut self, variable: VariableId, coefficient: f64) {
        self.terms.push((variable, coefficient));
    }

    pub fn terms(&self) -> &[(VariableId, f64)] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// The comparison side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    LessEq,
    GreaterEq,
}

/// A named linear constraint `expr <relation> rhs`.
///
/// Names are builder-generated and exist for trace output and debugging;
/// they carry no semantics.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn eq(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            relation: Relation::Equal,
            rhs,
        }
    }

    pub fn le(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            relation: Relation::LessEq,
            rhs,
        }
    }

    pub fn ge(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            relation: Relation::GreaterEq,
            rhs,
        }
    }
}
