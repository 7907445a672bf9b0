//! Merge copied locals when it is beneficial to do so.
//!
//! A copy `x = y` gives two locals the same value over a range. If `y`
//! is read again after the copy, its live range necessarily overlaps
//! `x`'s, and the two appear to interfere during later coalescing even
//! though they hold the identical value. Rewriting those later reads
//! of `y` to read `x` instead extends `x`'s live range and shrinks
//! `y`'s; if the overlap disappears entirely, a later coalescing stage
//! can fold the two locals into one slot.
//!
//! # Algorithm
//!
//! 1. **Instrument.** One postorder walk finds every write whose value
//!    is a bare read of a different local and splices a self-tee of
//!    the source around that read:
//!
//!    ```text
//!    (local.set $x (local.get $y))
//!        ⇒ (local.set $x (local.tee $y (local.get $y)))
//!    ```
//!
//!    The tee re-stores the value `$y` already holds, so semantics are
//!    untouched — but it gives `$y` a fresh definition at the exact
//!    location of the copy, which the reaching-definition graph can
//!    then track like any other write.
//!
//! 2. **Decide.** Build the [`LocalGraph`] once over the instrumented
//!    body. For each recorded copy, every read influenced by its
//!    marker is inspected: a read whose *only* reaching definition is
//!    the marker can safely read `$x` instead; a read that also
//!    reaches other definitions of `$y` sits at a merge point and
//!    cannot. The rewrite is all-or-nothing per copy — retargeting
//!    only some reads would leave the ranges overlapping *and*
//!    desynchronize the rewritten reads from `$y`'s other definitions,
//!    so a copy with any blocked read is left alone entirely.
//!
//! 3. **Clean up.** Every marker is unwrapped again (the copy's value
//!    reverts to the inner read), merged or not. The instrumentation
//!    is never observable outside the pass.
//!
//! The scan over influenced reads deliberately does not short-circuit
//! on the first blocked read, keeping the decision a single
//! accumulated boolean.

use skiff_analysis::{Def, LocalGraph};
use skiff_ir::{builder, walk_function, ExprId, ExprKind, Function, LocalId, Visitor};

use crate::pass::{Pass, PassError, PassResult};

/// The merge-locals pass. One instance transforms one function.
pub struct MergeLocals {
    /// Copy writes found during instrumentation, in discovery order.
    copies: Vec<ExprId>,
}

impl MergeLocals {
    /// Stable name the scheduler selects this pass by.
    pub const NAME: &'static str = "merge-locals";

    /// Create a fresh instance.
    pub fn new() -> Self {
        Self { copies: Vec::new() }
    }

    /// Detect a copy-form write and splice its marker in.
    fn consider_copy(&mut self, func: &mut Function, id: ExprId) {
        let Some((dest, value)) = write_parts(func.arena.kind(id)) else {
            return;
        };
        let ExprKind::LocalGet { local: source } = *func.arena.kind(value) else {
            return;
        };
        // A write of a local to itself is not a copy — it is the
        // marker shape itself.
        if source == dest {
            return;
        }
        let marker = builder::local_tee(&mut func.arena, source, value);
        set_write_value(func.arena.kind_mut(id), marker);
        self.copies.push(id);
    }

    /// Decide and rewrite every recorded copy, then strip the markers.
    fn optimize_copies(&mut self, func: &mut Function) -> PassResult<()> {
        let mut graph = LocalGraph::build(func).map_err(|source| PassError::Analysis {
            pass: Self::NAME,
            source,
        })?;
        graph.compute_influences();

        let mut merged = 0usize;
        for &copy in &self.copies {
            let Some((dest, marker)) = write_parts(func.arena.kind(copy)) else {
                return Err(inconsistent("a recorded copy is no longer a write"));
            };
            let ExprKind::LocalTee {
                local: source,
                value: original,
            } = *func.arena.kind(marker)
            else {
                return Err(inconsistent("a recorded copy lost its marker"));
            };

            let influenced = graph.influenced_reads(marker);
            let mut can_do_them_all = true;
            for &read in influenced {
                let ExprKind::LocalGet { local } = *func.arena.kind(read) else {
                    return Err(inconsistent(format!(
                        "influenced node {read:?} of marker {marker:?} is not a read"
                    )));
                };
                if local != source {
                    return Err(inconsistent(format!(
                        "read {read:?} influenced by marker {marker:?} targets {local:?}, \
                         not {source:?}"
                    )));
                }
                let reaching = graph.reaching_writes(read);
                if reaching.len() == 1 {
                    if !reaching.contains(&Def::Write(marker)) {
                        return Err(inconsistent(format!(
                            "read {read:?} has a sole definition other than marker {marker:?}"
                        )));
                    }
                } else {
                    // A merge point: other definitions of the source
                    // are live here as well.
                    can_do_them_all = false;
                }
            }

            if can_do_them_all {
                for &read in influenced {
                    if let ExprKind::LocalGet { local } = func.arena.kind_mut(read) {
                        *local = dest;
                    }
                }
                merged += 1;
            }

            // Merged or not, unwrap the marker.
            set_write_value(func.arena.kind_mut(copy), original);
        }

        tracing::debug!(
            function = %func.name,
            copies = self.copies.len(),
            merged,
            "merge-locals finished"
        );
        Ok(())
    }
}

impl Default for MergeLocals {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for MergeLocals {
    fn visit_local_set(&mut self, func: &mut Function, id: ExprId) {
        self.consider_copy(func, id);
    }

    fn visit_local_tee(&mut self, func: &mut Function, id: ExprId) {
        self.consider_copy(func, id);
    }
}

impl Pass for MergeLocals {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_function_parallel(&self) -> bool {
        true
    }

    fn run_function(&mut self, func: &mut Function) -> PassResult<()> {
        self.copies.clear();
        walk_function(self, func);
        if self.copies.is_empty() {
            return Ok(());
        }
        self.optimize_copies(func)
    }
}

fn inconsistent(detail: impl Into<String>) -> PassError {
    PassError::InconsistentGraph {
        pass: MergeLocals::NAME,
        detail: detail.into(),
    }
}

fn write_parts(kind: &ExprKind) -> Option<(LocalId, ExprId)> {
    match kind {
        ExprKind::LocalSet { local, value } | ExprKind::LocalTee { local, value } => {
            Some((*local, *value))
        }
        _ => None,
    }
}

/// Replace a write's value child. Caller guarantees `kind` is a write.
fn set_write_value(kind: &mut ExprKind, new_value: ExprId) {
    if let ExprKind::LocalSet { value, .. } | ExprKind::LocalTee { value, .. } = kind {
        *value = new_value;
    }
}
