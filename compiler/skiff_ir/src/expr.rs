//! Expression nodes for the Skiff IR.
//!
//! Function bodies are trees of [`ExprKind`] nodes stored in an
//! [`ExprArena`](crate::ExprArena) and referenced by [`ExprId`]. The
//! instruction set is a structured, stack-oriented bytecode: mutable
//! local slots, nested expressions, and structured control flow
//! (`block` / `loop` / `if` with labeled branches).

use smallvec::{smallvec, SmallVec};

use crate::ids::{ExprId, LabelId, LocalId};

// ── Value types ─────────────────────────────────────────────────────

/// Type of a value or local slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValType {
    I32,
    I64,
    F64,
}

// ── Literals ────────────────────────────────────────────────────────

/// Literal constant.
///
/// Floats are stored as raw bit patterns so the IR stays `Eq + Hash`;
/// use [`Literal::f64`] and [`Literal::as_f64`] at the boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    I32(i32),
    I64(i64),
    F64(u64),
}

impl Literal {
    /// Build an `F64` literal from a float value.
    #[inline]
    pub fn f64(value: f64) -> Self {
        Self::F64(value.to_bits())
    }

    /// Interpret an `F64` literal's bit pattern as a float.
    #[inline]
    pub fn as_f64(bits: u64) -> f64 {
        f64::from_bits(bits)
    }

    /// The type of this literal.
    pub fn val_type(self) -> ValType {
        match self {
            Self::I32(_) => ValType::I32,
            Self::I64(_) => ValType::I64,
            Self::F64(_) => ValType::F64,
        }
    }

    /// The zero value of a type — the initial value of a declared local.
    pub fn zero(ty: ValType) -> Self {
        match ty {
            ValType::I32 => Self::I32(0),
            ValType::I64 => Self::I64(0),
            ValType::F64 => Self::F64(0),
        }
    }
}

// ── Operators ───────────────────────────────────────────────────────

/// Unary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Equal-to-zero test; yields `I32` 0/1.
    Eqz,
}

/// Binary operator.
///
/// Integer arithmetic wraps; comparisons yield `I32` 0/1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Signed division; traps on zero divisor and on overflow.
    DivS,
    And,
    Or,
    Xor,
    Eq,
    Ne,
    LtS,
    GtS,
}

// ── Expression nodes ────────────────────────────────────────────────

/// A single expression node.
///
/// Child expressions are referenced by [`ExprId`] into the owning
/// function's arena. Listed child order is evaluation order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// No-op; yields nothing.
    Nop,

    /// Literal constant.
    Const(Literal),

    /// Read a local slot. Yields the slot's current value.
    LocalGet { local: LocalId },

    /// Write a local slot: `local = value`. Yields nothing.
    LocalSet { local: LocalId, value: ExprId },

    /// Combined write-read ("tee"): stores `value` into `local` and
    /// yields the stored value, so it can nest inside an expression.
    LocalTee { local: LocalId, value: ExprId },

    /// Unary operation.
    Unary { op: UnaryOp, operand: ExprId },

    /// Binary operation.
    Binary { op: BinaryOp, lhs: ExprId, rhs: ExprId },

    /// Evaluate `value` and discard its result.
    Drop { value: ExprId },

    /// Sequence of expressions; yields the last child's value.
    ///
    /// If labeled, branches to `label` jump to the *end* of the block,
    /// carrying the block's result value if any.
    Block {
        label: Option<LabelId>,
        children: Vec<ExprId>,
    },

    /// Loop; yields the body's value on fallthrough.
    ///
    /// If labeled, branches to `label` jump back to the *start* of the
    /// loop.
    Loop { label: Option<LabelId>, body: ExprId },

    /// Two-way conditional. `cond` must yield `I32`; nonzero selects
    /// `then_expr`. Without an else arm, a false condition yields
    /// nothing.
    If {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: Option<ExprId>,
    },

    /// Unconditional branch to an enclosing label, optionally carrying
    /// a value.
    Br { label: LabelId, value: Option<ExprId> },

    /// Conditional branch. `value` (if any) evaluates first, then
    /// `cond`; a nonzero condition branches, otherwise the carried
    /// value falls through as this node's result.
    BrIf {
        label: LabelId,
        cond: ExprId,
        value: Option<ExprId>,
    },
}

impl ExprKind {
    /// Child expression IDs in evaluation order.
    pub fn children(&self) -> SmallVec<[ExprId; 2]> {
        match self {
            Self::Nop | Self::Const(_) | Self::LocalGet { .. } => SmallVec::new(),
            Self::LocalSet { value, .. }
            | Self::LocalTee { value, .. }
            | Self::Drop { value } => smallvec![*value],
            Self::Unary { operand, .. } => smallvec![*operand],
            Self::Binary { lhs, rhs, .. } => smallvec![*lhs, *rhs],
            Self::Block { children, .. } => children.iter().copied().collect(),
            Self::Loop { body, .. } => smallvec![*body],
            Self::If {
                cond,
                then_expr,
                else_expr,
            } => {
                let mut out = smallvec![*cond, *then_expr];
                if let Some(e) = else_expr {
                    out.push(*e);
                }
                out
            }
            Self::Br { value, .. } => value.iter().copied().collect(),
            Self::BrIf { cond, value, .. } => {
                let mut out = SmallVec::new();
                if let Some(v) = value {
                    out.push(*v);
                }
                out.push(*cond);
                out
            }
        }
    }
}
