//! The pass protocol.
//!
//! A pass is a function-at-a-time IR transformation. The scheduler
//! addresses passes by their stable [`name`](Pass::name), creates one
//! instance per function through a [`PassFactory`], and may run a pass
//! advertising [`is_function_parallel`](Pass::is_function_parallel)
//! over many functions concurrently — instances are never shared.

use thiserror::Error;

use skiff_analysis::AnalysisError;
use skiff_ir::Function;

/// A function-local transformation.
pub trait Pass: Send {
    /// Stable identifying name the scheduler selects this pass by.
    fn name(&self) -> &'static str;

    /// Whether distinct functions may be processed on distinct threads.
    ///
    /// Only a pass with no cross-function state may return `true`.
    fn is_function_parallel(&self) -> bool {
        false
    }

    /// Transform one function body in place.
    ///
    /// The only failure mode is a compiler-internal defect; passes
    /// never reject well-formed input.
    fn run_function(&mut self, func: &mut Function) -> PassResult<()>;
}

/// Factory producing one fresh pass instance per invocation.
pub type PassFactory = fn() -> Box<dyn Pass>;

/// A fatal pass failure. All variants are compiler defects, not
/// properties of the input program; the runner aborts on the first.
#[derive(Debug, Error)]
pub enum PassError {
    /// The reaching-definition graph contradicted the pass's own
    /// bookkeeping. Either the graph construction or the pass is
    /// defective; retrying would reproduce the failure.
    #[error("pass {pass}: inconsistent reaching-definition graph: {detail}")]
    InconsistentGraph { pass: &'static str, detail: String },

    /// An analysis the pass depends on rejected the function body.
    #[error("pass {pass}: analysis failed")]
    Analysis {
        pass: &'static str,
        #[source]
        source: AnalysisError,
    },

    /// The scheduler asked for a name no factory is registered under.
    #[error("no pass registered under name {0:?}")]
    UnknownPass(String),
}

/// Result alias for pass execution.
pub type PassResult<T> = Result<T, PassError>;
