//! Tree-walking evaluation.
//!
//! Structured control flow evaluates by unwinding: a `br` produces a
//! [`Flow::Branch`] that propagates outward until the `block` or
//! `loop` binding the target label catches it. Integer arithmetic
//! wraps; division traps; comparisons yield `I32` 0/1.

use thiserror::Error;

use skiff_ir::{BinaryOp, ExprId, ExprKind, Function, LabelId, UnaryOp, ValType};

use crate::value::Value;

/// A trap or harness-level failure during evaluation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("wrong number of arguments: expected {expected}, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("argument {index} has type {got:?}, expected {expected:?}")]
    ArgType {
        index: usize,
        expected: ValType,
        got: ValType,
    },

    #[error("{op} expected a value-yielding operand")]
    MissingOperand { op: &'static str },

    #[error("type mismatch in {op}")]
    TypeMismatch { op: &'static str },

    #[error("integer division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("fuel exhausted")]
    OutOfFuel,

    #[error("branch to label {label:?} escaped the function body")]
    UnboundLabel { label: LabelId },
}

/// Result of evaluating one expression.
enum Flow {
    /// Normal completion, possibly yielding a value.
    Value(Option<Value>),
    /// An in-flight branch, unwinding toward its target label.
    Branch(LabelId, Option<Value>),
}

/// Evaluate `func` on `args`, spending at most `fuel` expression steps.
///
/// Returns the function body's result value, or `None` for a
/// non-yielding body.
pub fn evaluate(func: &Function, args: &[Value], fuel: u64) -> Result<Option<Value>, EvalError> {
    if args.len() != func.params.len() {
        return Err(EvalError::ArityMismatch {
            expected: func.params.len(),
            got: args.len(),
        });
    }
    for (index, (arg, &expected)) in args.iter().zip(&func.params).enumerate() {
        if arg.ty() != expected {
            return Err(EvalError::ArgType {
                index,
                expected,
                got: arg.ty(),
            });
        }
    }

    let mut locals: Vec<Value> = args.to_vec();
    locals.extend(func.locals.iter().map(|&ty| Value::zero(ty)));

    let mut interp = Interp { func, locals, fuel };
    match interp.eval(func.body)? {
        Flow::Value(v) => Ok(v),
        Flow::Branch(label, _) => Err(EvalError::UnboundLabel { label }),
    }
}

struct Interp<'a> {
    func: &'a Function,
    locals: Vec<Value>,
    fuel: u64,
}

/// Evaluate an operand that must yield a value; escapes the enclosing
/// `eval` call if the operand branches instead.
macro_rules! operand {
    ($self:ident, $id:expr, $op:expr) => {
        match $self.eval($id)? {
            Flow::Value(Some(v)) => v,
            Flow::Value(None) => return Err(EvalError::MissingOperand { op: $op }),
            escape @ Flow::Branch(..) => return Ok(escape),
        }
    };
}

impl Interp<'_> {
    fn eval(&mut self, id: ExprId) -> Result<Flow, EvalError> {
        self.fuel = self.fuel.checked_sub(1).ok_or(EvalError::OutOfFuel)?;

        let kind = self.func.arena.kind(id).clone();
        match kind {
            ExprKind::Nop => Ok(Flow::Value(None)),

            ExprKind::Const(lit) => Ok(Flow::Value(Some(Value::from_literal(lit)))),

            ExprKind::LocalGet { local } => {
                Ok(Flow::Value(Some(self.locals[local.index()])))
            }

            ExprKind::LocalSet { local, value } => {
                let v = operand!(self, value, "local.set");
                self.locals[local.index()] = v;
                Ok(Flow::Value(None))
            }

            ExprKind::LocalTee { local, value } => {
                let v = operand!(self, value, "local.tee");
                self.locals[local.index()] = v;
                Ok(Flow::Value(Some(v)))
            }

            ExprKind::Unary { op, operand } => {
                let v = operand!(self, operand, "unary");
                apply_unary(op, v).map(|r| Flow::Value(Some(r)))
            }

            ExprKind::Binary { op, lhs, rhs } => {
                let a = operand!(self, lhs, "binary");
                let b = operand!(self, rhs, "binary");
                apply_binary(op, a, b).map(|r| Flow::Value(Some(r)))
            }

            ExprKind::Drop { value } => {
                let _ = operand!(self, value, "drop");
                Ok(Flow::Value(None))
            }

            ExprKind::Block { label, children } => {
                let mut last = None;
                for child in children {
                    match self.eval(child)? {
                        Flow::Value(v) => last = v,
                        Flow::Branch(l, v) if Some(l) == label => {
                            return Ok(Flow::Value(v));
                        }
                        escape => return Ok(escape),
                    }
                }
                Ok(Flow::Value(last))
            }

            ExprKind::Loop { label, body } => loop {
                match self.eval(body)? {
                    // A back edge drops any carried value.
                    Flow::Branch(l, _) if Some(l) == label => {}
                    other => return Ok(other),
                }
            },

            ExprKind::If {
                cond,
                then_expr,
                else_expr,
            } => {
                let c = operand!(self, cond, "if");
                let Value::I32(c) = c else {
                    return Err(EvalError::TypeMismatch { op: "if" });
                };
                if c != 0 {
                    self.eval(then_expr)
                } else if let Some(else_id) = else_expr {
                    self.eval(else_id)
                } else {
                    Ok(Flow::Value(None))
                }
            }

            ExprKind::Br { label, value } => {
                let v = match value {
                    Some(value) => Some(operand!(self, value, "br")),
                    None => None,
                };
                Ok(Flow::Branch(label, v))
            }

            ExprKind::BrIf { label, cond, value } => {
                let v = match value {
                    Some(value) => Some(operand!(self, value, "br_if")),
                    None => None,
                };
                let c = operand!(self, cond, "br_if");
                let Value::I32(c) = c else {
                    return Err(EvalError::TypeMismatch { op: "br_if" });
                };
                if c != 0 {
                    Ok(Flow::Branch(label, v))
                } else {
                    Ok(Flow::Value(v))
                }
            }
        }
    }
}

fn apply_unary(op: UnaryOp, v: Value) -> Result<Value, EvalError> {
    match (op, v) {
        (UnaryOp::Neg, Value::I32(a)) => Ok(Value::I32(a.wrapping_neg())),
        (UnaryOp::Neg, Value::I64(a)) => Ok(Value::I64(a.wrapping_neg())),
        (UnaryOp::Neg, Value::F64(a)) => Ok(Value::F64(-a)),
        (UnaryOp::Eqz, Value::I32(a)) => Ok(Value::I32(i32::from(a == 0))),
        (UnaryOp::Eqz, Value::I64(a)) => Ok(Value::I32(i32::from(a == 0))),
        (UnaryOp::Eqz, Value::F64(_)) => Err(EvalError::TypeMismatch { op: "eqz" }),
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    use Value::{F64, I32, I64};
    let result = match (op, lhs, rhs) {
        (BinaryOp::Add, I32(a), I32(b)) => I32(a.wrapping_add(b)),
        (BinaryOp::Add, I64(a), I64(b)) => I64(a.wrapping_add(b)),
        (BinaryOp::Add, F64(a), F64(b)) => F64(a + b),

        (BinaryOp::Sub, I32(a), I32(b)) => I32(a.wrapping_sub(b)),
        (BinaryOp::Sub, I64(a), I64(b)) => I64(a.wrapping_sub(b)),
        (BinaryOp::Sub, F64(a), F64(b)) => F64(a - b),

        (BinaryOp::Mul, I32(a), I32(b)) => I32(a.wrapping_mul(b)),
        (BinaryOp::Mul, I64(a), I64(b)) => I64(a.wrapping_mul(b)),
        (BinaryOp::Mul, F64(a), F64(b)) => F64(a * b),

        (BinaryOp::DivS, I32(_), I32(0)) | (BinaryOp::DivS, I64(_), I64(0)) => {
            return Err(EvalError::DivisionByZero);
        }
        (BinaryOp::DivS, I32(a), I32(b)) => {
            I32(a.checked_div(b).ok_or(EvalError::IntegerOverflow)?)
        }
        (BinaryOp::DivS, I64(a), I64(b)) => {
            I64(a.checked_div(b).ok_or(EvalError::IntegerOverflow)?)
        }
        (BinaryOp::DivS, F64(a), F64(b)) => F64(a / b),

        (BinaryOp::And, I32(a), I32(b)) => I32(a & b),
        (BinaryOp::And, I64(a), I64(b)) => I64(a & b),
        (BinaryOp::Or, I32(a), I32(b)) => I32(a | b),
        (BinaryOp::Or, I64(a), I64(b)) => I64(a | b),
        (BinaryOp::Xor, I32(a), I32(b)) => I32(a ^ b),
        (BinaryOp::Xor, I64(a), I64(b)) => I64(a ^ b),

        (BinaryOp::Eq, I32(a), I32(b)) => I32(i32::from(a == b)),
        (BinaryOp::Eq, I64(a), I64(b)) => I32(i32::from(a == b)),
        (BinaryOp::Eq, F64(a), F64(b)) => I32(i32::from(a == b)),
        (BinaryOp::Ne, I32(a), I32(b)) => I32(i32::from(a != b)),
        (BinaryOp::Ne, I64(a), I64(b)) => I32(i32::from(a != b)),
        (BinaryOp::Ne, F64(a), F64(b)) => I32(i32::from(a != b)),
        (BinaryOp::LtS, I32(a), I32(b)) => I32(i32::from(a < b)),
        (BinaryOp::LtS, I64(a), I64(b)) => I32(i32::from(a < b)),
        (BinaryOp::LtS, F64(a), F64(b)) => I32(i32::from(a < b)),
        (BinaryOp::GtS, I32(a), I32(b)) => I32(i32::from(a > b)),
        (BinaryOp::GtS, I64(a), I64(b)) => I32(i32::from(a > b)),
        (BinaryOp::GtS, F64(a), F64(b)) => I32(i32::from(a > b)),

        _ => return Err(EvalError::TypeMismatch { op: "binary" }),
    };
    Ok(result)
}
