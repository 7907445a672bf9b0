//! Optimization passes for the Skiff IR.
//!
//! This crate provides:
//!
//! - **The pass protocol** ([`Pass`], [`PassFactory`], [`PassError`]) —
//!   function-at-a-time transformations addressed by stable name,
//!   instantiated fresh per function, optionally parallel across
//!   functions.
//! - **Scheduling plumbing** ([`PassRegistry`], [`PassRunner`]) — name
//!   → factory lookup and module-level execution; function-parallel
//!   passes run on the rayon pool since functions share no state.
//! - **Passes** — currently [`MergeLocals`], which removes the
//!   artificial live-range overlap created by local-to-local copies so
//!   later coalescing can merge more slots.
//!
//! # Crate Dependencies
//!
//! Passes consume analyses from `skiff_analysis` through their query
//! interfaces and transform trees from `skiff_ir`; they implement no
//! dataflow internals themselves.

mod merge_locals;
mod pass;
mod registry;
mod runner;

pub use merge_locals::MergeLocals;
pub use pass::{Pass, PassError, PassFactory, PassResult};
pub use registry::PassRegistry;
pub use runner::PassRunner;

#[cfg(test)]
mod test_helpers;
