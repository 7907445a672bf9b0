//! Dataflow analyses over the Skiff IR.
//!
//! The central structure is [`LocalGraph`]: a per-function
//! reaching-definition graph connecting every read of a local slot to
//! the set of definitions (writes or the function entry) that may
//! produce its value, plus the inverted table connecting every write
//! to the reads it may influence.
//!
//! Consumers query the graph; they never reach into the flow engine.
//! Passes that need def-use information build the graph once over the
//! function body they are about to transform and key all lookups by
//! [`ExprId`](skiff_ir::ExprId) — node identity survives tree
//! mutation, so the graph stays meaningful while the consumer rewrites
//! the tree (as long as it does not change which writes reach which
//! reads).

mod local_graph;

pub use local_graph::{AnalysisError, Def, DefSet, LocalGraph};
