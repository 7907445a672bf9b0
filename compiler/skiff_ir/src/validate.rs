//! Structural validation of function bodies.
//!
//! Checks the shape invariants every analysis and pass relies on:
//!
//! - the body and all child references point at allocated nodes;
//! - the body is a tree — no node is referenced from two parents
//!   (which also rules out cycles);
//! - local indices are in range for the function's slot table;
//! - every branch targets a label bound by an enclosing `block` or
//!   `loop`, and no label is bound twice.
//!
//! Detached nodes in the arena are fine; only the tree reachable from
//! the body root is checked.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::expr::ExprKind;
use crate::function::Function;
use crate::ids::{ExprId, LabelId, LocalId};

/// A structural defect found by [`validate_function`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("expression {parent:?} references unallocated child {child:?}")]
    ChildOutOfRange { parent: ExprId, child: ExprId },

    #[error("expression {child:?} is referenced by more than one parent")]
    SharedChild { child: ExprId },

    #[error("expression {expr:?} references out-of-range local {local:?}")]
    LocalOutOfRange { expr: ExprId, local: LocalId },

    #[error("branch {expr:?} targets label {label:?} with no enclosing binder")]
    UnboundLabel { expr: ExprId, label: LabelId },

    #[error("label {label:?} is bound more than once")]
    DuplicateLabel { label: LabelId },

    #[error("function body {body:?} is not an allocated node")]
    BodyOutOfRange { body: ExprId },
}

/// Validate a function's body tree.
pub fn validate_function(func: &Function) -> Result<(), ValidateError> {
    if !func.arena.contains(func.body) {
        return Err(ValidateError::BodyOutOfRange { body: func.body });
    }
    let mut ctx = Context {
        func,
        seen: FxHashSet::default(),
        scope: Vec::new(),
        bound: FxHashSet::default(),
    };
    ctx.seen.insert(func.body);
    ctx.check(func.body)
}

struct Context<'a> {
    func: &'a Function,
    /// Nodes already claimed by a parent (tree-ness check).
    seen: FxHashSet<ExprId>,
    /// Labels currently in scope, innermost last.
    scope: Vec<LabelId>,
    /// Labels bound anywhere so far (uniqueness check).
    bound: FxHashSet<LabelId>,
}

impl Context<'_> {
    fn check(&mut self, id: ExprId) -> Result<(), ValidateError> {
        for child in self.func.arena.kind(id).children() {
            if !self.func.arena.contains(child) {
                return Err(ValidateError::ChildOutOfRange { parent: id, child });
            }
            if !self.seen.insert(child) {
                return Err(ValidateError::SharedChild { child });
            }
        }

        match self.func.arena.kind(id) {
            ExprKind::LocalGet { local }
            | ExprKind::LocalSet { local, .. }
            | ExprKind::LocalTee { local, .. } => {
                if local.index() >= self.func.num_locals() {
                    return Err(ValidateError::LocalOutOfRange {
                        expr: id,
                        local: *local,
                    });
                }
            }
            ExprKind::Br { label, .. } | ExprKind::BrIf { label, .. } => {
                if !self.scope.contains(label) {
                    return Err(ValidateError::UnboundLabel {
                        expr: id,
                        label: *label,
                    });
                }
            }
            _ => {}
        }

        let binds = match self.func.arena.kind(id) {
            ExprKind::Block { label, .. } | ExprKind::Loop { label, .. } => *label,
            _ => None,
        };
        if let Some(label) = binds {
            if !self.bound.insert(label) {
                return Err(ValidateError::DuplicateLabel { label });
            }
            self.scope.push(label);
        }

        for child in self.func.arena.kind(id).children() {
            self.check(child)?;
        }

        if binds.is_some() {
            self.scope.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
