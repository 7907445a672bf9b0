//! Construction helpers for expression nodes.
//!
//! Free functions that allocate one node into an arena and return its
//! ID. They need no tree context beyond the child IDs they are given,
//! so a transformation can wrap an existing node (say, splice a
//! [`local_tee`] around a read it just matched) without knowing where
//! in the tree that node sits.

use crate::arena::ExprArena;
use crate::expr::{BinaryOp, ExprKind, Literal, UnaryOp};
use crate::ids::{ExprId, LabelId, LocalId};

/// Allocate a `Nop`.
pub fn nop(arena: &mut ExprArena) -> ExprId {
    arena.push(ExprKind::Nop)
}

/// Allocate a literal constant.
pub fn constant(arena: &mut ExprArena, literal: Literal) -> ExprId {
    arena.push(ExprKind::Const(literal))
}

/// Allocate an `i32` constant.
pub fn i32_const(arena: &mut ExprArena, value: i32) -> ExprId {
    constant(arena, Literal::I32(value))
}

/// Allocate a read of `local`.
pub fn local_get(arena: &mut ExprArena, local: LocalId) -> ExprId {
    arena.push(ExprKind::LocalGet { local })
}

/// Allocate a write of `value` into `local`.
pub fn local_set(arena: &mut ExprArena, local: LocalId, value: ExprId) -> ExprId {
    arena.push(ExprKind::LocalSet { local, value })
}

/// Allocate a tee of `value` into `local` (yields the stored value).
pub fn local_tee(arena: &mut ExprArena, local: LocalId, value: ExprId) -> ExprId {
    arena.push(ExprKind::LocalTee { local, value })
}

/// Allocate a unary operation.
pub fn unary(arena: &mut ExprArena, op: UnaryOp, operand: ExprId) -> ExprId {
    arena.push(ExprKind::Unary { op, operand })
}

/// Allocate a binary operation.
pub fn binary(arena: &mut ExprArena, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
    arena.push(ExprKind::Binary { op, lhs, rhs })
}

/// Allocate a `Drop` of `value`.
pub fn drop_value(arena: &mut ExprArena, value: ExprId) -> ExprId {
    arena.push(ExprKind::Drop { value })
}

/// Allocate an unlabeled block.
pub fn block(arena: &mut ExprArena, children: Vec<ExprId>) -> ExprId {
    arena.push(ExprKind::Block {
        label: None,
        children,
    })
}

/// Allocate a labeled block (branches to `label` exit the block).
pub fn labeled_block(arena: &mut ExprArena, label: LabelId, children: Vec<ExprId>) -> ExprId {
    arena.push(ExprKind::Block {
        label: Some(label),
        children,
    })
}

/// Allocate a labeled loop (branches to `label` restart the body).
pub fn labeled_loop(arena: &mut ExprArena, label: LabelId, body: ExprId) -> ExprId {
    arena.push(ExprKind::Loop {
        label: Some(label),
        body,
    })
}

/// Allocate a two-armed `If`.
pub fn if_else(arena: &mut ExprArena, cond: ExprId, then_expr: ExprId, else_expr: ExprId) -> ExprId {
    arena.push(ExprKind::If {
        cond,
        then_expr,
        else_expr: Some(else_expr),
    })
}

/// Allocate a one-armed `If`.
pub fn if_then(arena: &mut ExprArena, cond: ExprId, then_expr: ExprId) -> ExprId {
    arena.push(ExprKind::If {
        cond,
        then_expr,
        else_expr: None,
    })
}

/// Allocate an unconditional branch carrying no value.
pub fn br(arena: &mut ExprArena, label: LabelId) -> ExprId {
    arena.push(ExprKind::Br { label, value: None })
}

/// Allocate an unconditional branch carrying a value.
pub fn br_value(arena: &mut ExprArena, label: LabelId, value: ExprId) -> ExprId {
    arena.push(ExprKind::Br {
        label,
        value: Some(value),
    })
}

/// Allocate a conditional branch carrying no value.
pub fn br_if(arena: &mut ExprArena, label: LabelId, cond: ExprId) -> ExprId {
    arena.push(ExprKind::BrIf {
        label,
        cond,
        value: None,
    })
}
