//! Reference interpreter for the Skiff IR.
//!
//! A direct tree-walking evaluator with no optimizations, used as the
//! semantic baseline: transformation passes are correct exactly when
//! the observable result of [`evaluate`] is unchanged by them, for
//! every argument vector.
//!
//! Evaluation is fuel-bounded so randomized differential tests can
//! feed it arbitrary loops without hanging.

mod interp;
mod value;

pub use interp::{evaluate, EvalError};
pub use value::Value;
