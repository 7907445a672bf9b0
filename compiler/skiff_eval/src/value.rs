//! Runtime values.

use skiff_ir::{Literal, ValType};

/// A runtime value.
///
/// Unlike [`Literal`], floats are carried as real `f64`s; equality is
/// bitwise so differential comparisons are exact (NaN == NaN).
#[derive(Clone, Copy, Debug)]
pub enum Value {
    I32(i32),
    I64(i64),
    F64(f64),
}

impl Value {
    /// The type of this value.
    pub fn ty(self) -> ValType {
        match self {
            Self::I32(_) => ValType::I32,
            Self::I64(_) => ValType::I64,
            Self::F64(_) => ValType::F64,
        }
    }

    /// The zero value of a type — what declared locals start as.
    pub fn zero(ty: ValType) -> Self {
        match ty {
            ValType::I32 => Self::I32(0),
            ValType::I64 => Self::I64(0),
            ValType::F64 => Self::F64(0.0),
        }
    }

    /// Convert a literal into its runtime value.
    pub fn from_literal(lit: Literal) -> Self {
        match lit {
            Literal::I32(v) => Self::I32(v),
            Literal::I64(v) => Self::I64(v),
            Literal::F64(bits) => Self::F64(f64::from_bits(bits)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Value {}
