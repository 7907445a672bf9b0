//! S-expression rendering of IR trees.
//!
//! Single-line output, meant for test diffs and `tracing` payloads
//! rather than round-tripping. [`display`] renders one subtree;
//! `Function` implements `Display` on top of it.

use std::fmt;

use crate::arena::ExprArena;
use crate::expr::{ExprKind, Literal};
use crate::function::Function;
use crate::ids::ExprId;

/// Displayable view of one subtree.
pub struct DisplayExpr<'a> {
    arena: &'a ExprArena,
    id: ExprId,
}

/// Render the subtree under `id`.
pub fn display(arena: &ExprArena, id: ExprId) -> DisplayExpr<'_> {
    DisplayExpr { arena, id }
}

impl DisplayExpr<'_> {
    fn write(&self, f: &mut fmt::Formatter<'_>, id: ExprId) -> fmt::Result {
        let child = |id| DisplayExpr {
            arena: self.arena,
            id,
        };
        match self.arena.kind(id) {
            ExprKind::Nop => write!(f, "(nop)"),
            ExprKind::Const(lit) => match lit {
                Literal::I32(v) => write!(f, "(i32.const {v})"),
                Literal::I64(v) => write!(f, "(i64.const {v})"),
                Literal::F64(bits) => write!(f, "(f64.const {})", Literal::as_f64(*bits)),
            },
            ExprKind::LocalGet { local } => write!(f, "(local.get {local:?})"),
            ExprKind::LocalSet { local, value } => {
                write!(f, "(local.set {local:?} {})", child(*value))
            }
            ExprKind::LocalTee { local, value } => {
                write!(f, "(local.tee {local:?} {})", child(*value))
            }
            ExprKind::Unary { op, operand } => {
                write!(f, "({op:?} {})", child(*operand))
            }
            ExprKind::Binary { op, lhs, rhs } => {
                write!(f, "({op:?} {} {})", child(*lhs), child(*rhs))
            }
            ExprKind::Drop { value } => write!(f, "(drop {})", child(*value)),
            ExprKind::Block { label, children } => {
                write!(f, "(block")?;
                if let Some(label) = label {
                    write!(f, " {label:?}")?;
                }
                for &c in children {
                    write!(f, " {}", child(c))?;
                }
                write!(f, ")")
            }
            ExprKind::Loop { label, body } => {
                write!(f, "(loop")?;
                if let Some(label) = label {
                    write!(f, " {label:?}")?;
                }
                write!(f, " {})", child(*body))
            }
            ExprKind::If {
                cond,
                then_expr,
                else_expr,
            } => {
                write!(f, "(if {} {}", child(*cond), child(*then_expr))?;
                if let Some(e) = else_expr {
                    write!(f, " {}", child(*e))?;
                }
                write!(f, ")")
            }
            ExprKind::Br { label, value } => {
                write!(f, "(br {label:?}")?;
                if let Some(v) = value {
                    write!(f, " {}", child(*v))?;
                }
                write!(f, ")")
            }
            ExprKind::BrIf { label, cond, value } => {
                write!(f, "(br_if {label:?}")?;
                if let Some(v) = value {
                    write!(f, " {}", child(*v))?;
                }
                write!(f, " {})", child(*cond))
            }
        }
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, self.id)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(func ${}", self.name)?;
        for p in &self.params {
            write!(f, " (param {p:?})")?;
        }
        for l in &self.locals {
            write!(f, " (local {l:?})")?;
        }
        write!(f, " {})", display(&self.arena, self.body))
    }
}
