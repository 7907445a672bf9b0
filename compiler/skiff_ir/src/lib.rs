//! Intermediate representation for the Skiff bytecode compiler.
//!
//! This crate provides:
//!
//! - **IR nodes** ([`ExprKind`], [`Literal`], [`ValType`]) — a
//!   structured, stack-oriented instruction set: mutable local slots,
//!   nested expressions, `block` / `loop` / `if` control flow with
//!   labeled branches.
//! - **Arena storage** ([`ExprArena`], [`ExprId`]) — every function
//!   owns a flat arena of nodes; an expression's identity is its arena
//!   index, which stays stable across transformations.
//! - **Containers** ([`Function`], [`Module`]) — functions share
//!   nothing, so passes can transform them in parallel.
//! - **Construction** ([`builder`]) — context-free node allocation
//!   helpers for lowering stages and passes.
//! - **Traversal** ([`postorder`], [`Visitor`], [`walk_function`]) —
//!   snapshot-based postorder walks; visitor mutations are never
//!   re-visited.
//! - **Printing** ([`print::display`]) and **validation**
//!   ([`validate_function`]).
//!
//! # Crate Dependencies
//!
//! `skiff_ir` sits at the bottom of the workspace; analyses and passes
//! build on it and never reach around it to share node references —
//! everything is keyed by [`ExprId`].

mod arena;
pub mod builder;
mod expr;
mod function;
mod ids;
pub mod print;
mod validate;
mod walk;

pub use arena::ExprArena;
pub use expr::{BinaryOp, ExprKind, Literal, UnaryOp, ValType};
pub use function::{Function, Module};
pub use ids::{ExprId, LabelId, LocalId};
pub use validate::{validate_function, ValidateError};
pub use walk::{postorder, walk_function, Visitor};
