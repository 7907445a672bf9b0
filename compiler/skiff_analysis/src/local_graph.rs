//! Reaching-definition graph for function locals.
//!
//! For every `LocalGet` in a function body, computes the set of
//! definitions that may produce the value it reads; a definition is
//! either a write node (`LocalSet` / `LocalTee`) or the function entry
//! (parameter value / zero initialization). The inverted view — which
//! reads a given write may influence — is built on demand by
//! [`LocalGraph::compute_influences`].
//!
//! # Algorithm
//!
//! Forward flow over the structured body tree, carrying one def-set
//! per local slot:
//!
//! - a write replaces its slot's set with the singleton `{Write(id)}`;
//! - `if` forks the state per arm and unions at the join;
//! - a labeled `block` unions the states recorded at every branch that
//!   targets it into the fallthrough state at its end;
//! - a labeled `loop` re-runs its body until the union of the pre-loop
//!   state and all back-branch states stops changing (sets only grow,
//!   so the iteration terminates);
//! - an unconditional `br` makes the continuation unreachable; an
//!   unreachable state contributes nothing at merges and records no
//!   reads.
//!
//! A read with more than one reaching definition sits at a dataflow
//! merge point.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use skiff_ir::{ExprId, ExprKind, Function, LabelId};

/// One definition of a local slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Def {
    /// The value the slot holds at function entry — the argument for a
    /// parameter, zero for a declared local.
    Entry,
    /// A write node (`LocalSet` or `LocalTee`).
    Write(ExprId),
}

/// Set of definitions reaching one program point for one slot.
pub type DefSet = FxHashSet<Def>;

/// A malformed body encountered during flow analysis.
///
/// Analyses assume validated IR; this survives as a typed error rather
/// than a panic so a pass can surface it as an internal defect.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("branch {expr:?} targets label {label:?} with no enclosing binder")]
    UnboundLabel { expr: ExprId, label: LabelId },
}

/// Per-function reaching-definition graph.
#[derive(Debug)]
pub struct LocalGraph {
    /// read (`LocalGet`) → definitions that may produce its value.
    reaching: FxHashMap<ExprId, DefSet>,
    /// write → reads it may influence. Empty until
    /// [`compute_influences`](Self::compute_influences) runs.
    influences: FxHashMap<ExprId, FxHashSet<ExprId>>,
    empty_defs: DefSet,
    empty_reads: FxHashSet<ExprId>,
}

impl LocalGraph {
    /// Build the graph for a function body.
    pub fn build(func: &Function) -> Result<Self, AnalysisError> {
        let mut flow = Flow {
            func,
            reaching: FxHashMap::default(),
            branch_states: FxHashMap::default(),
        };
        let mut state = FlowState::entry(func.num_locals());
        flow.walk(func.body, &mut state)?;

        tracing::debug!(
            function = %func.name,
            reads = flow.reaching.len(),
            "reaching definitions computed"
        );

        Ok(Self {
            reaching: flow.reaching,
            influences: FxHashMap::default(),
            empty_defs: DefSet::default(),
            empty_reads: FxHashSet::default(),
        })
    }

    /// Invert the read table into the write → influenced-reads table.
    ///
    /// Call once, after [`build`](Self::build); lookups through
    /// [`influenced_reads`](Self::influenced_reads) return empty sets
    /// until this has run.
    pub fn compute_influences(&mut self) {
        for (&read, defs) in &self.reaching {
            for def in defs {
                if let Def::Write(write) = def {
                    self.influences.entry(*write).or_default().insert(read);
                }
            }
        }
    }

    /// Definitions that may produce the value read by `read`.
    pub fn reaching_writes(&self, read: ExprId) -> &DefSet {
        self.reaching.get(&read).unwrap_or(&self.empty_defs)
    }

    /// Reads that may observe the value stored by `write`.
    pub fn influenced_reads(&self, write: ExprId) -> &FxHashSet<ExprId> {
        self.influences.get(&write).unwrap_or(&self.empty_reads)
    }
}

// ── Flow engine ─────────────────────────────────────────────────────

/// Per-slot reaching sets at one program point.
#[derive(Clone, Debug, PartialEq, Eq)]
struct FlowState {
    defs: Vec<DefSet>,
    reachable: bool,
}

impl FlowState {
    /// The state at function entry: every slot defined by `Def::Entry`.
    fn entry(num_locals: usize) -> Self {
        let defs = (0..num_locals)
            .map(|_| {
                let mut set = DefSet::default();
                set.insert(Def::Entry);
                set
            })
            .collect();
        Self {
            defs,
            reachable: true,
        }
    }

    /// Union `other` into `self`. Unreachable inputs contribute
    /// nothing; merging into an unreachable state adopts `other`.
    fn merge_from(&mut self, other: &Self) {
        if !other.reachable {
            return;
        }
        if !self.reachable {
            self.clone_from(other);
            return;
        }
        for (mine, theirs) in self.defs.iter_mut().zip(&other.defs) {
            mine.extend(theirs.iter().copied());
        }
    }
}

struct Flow<'a> {
    func: &'a Function,
    reaching: FxHashMap<ExprId, DefSet>,
    /// States captured at branches, keyed by target label. An entry
    /// exists for every label currently in scope.
    branch_states: FxHashMap<LabelId, Vec<FlowState>>,
}

impl Flow<'_> {
    fn walk(&mut self, id: ExprId, state: &mut FlowState) -> Result<(), AnalysisError> {
        let kind = self.func.arena.kind(id).clone();
        match kind {
            ExprKind::Nop | ExprKind::Const(_) => {}

            ExprKind::LocalGet { local } => {
                if state.reachable {
                    self.reaching.insert(id, state.defs[local.index()].clone());
                }
            }

            ExprKind::LocalSet { local, value } | ExprKind::LocalTee { local, value } => {
                self.walk(value, state)?;
                if state.reachable {
                    let slot = &mut state.defs[local.index()];
                    slot.clear();
                    slot.insert(Def::Write(id));
                }
            }

            ExprKind::Unary { operand, .. } => self.walk(operand, state)?,

            ExprKind::Binary { lhs, rhs, .. } => {
                self.walk(lhs, state)?;
                self.walk(rhs, state)?;
            }

            ExprKind::Drop { value } => self.walk(value, state)?,

            ExprKind::Block { label, children } => {
                if let Some(label) = label {
                    self.branch_states.insert(label, Vec::new());
                }
                for child in children {
                    self.walk(child, state)?;
                }
                if let Some(label) = label {
                    let states = self.branch_states.remove(&label).unwrap_or_default();
                    for s in &states {
                        state.merge_from(s);
                    }
                }
            }

            ExprKind::Loop { label, body } => match label {
                None => self.walk(body, state)?,
                Some(label) => {
                    let before = state.clone();
                    let mut entry = before.clone();
                    let mut iterations = 0u32;
                    loop {
                        iterations += 1;
                        self.branch_states.insert(label, Vec::new());
                        let mut body_state = entry.clone();
                        self.walk(body, &mut body_state)?;
                        let backs = self.branch_states.remove(&label).unwrap_or_default();

                        let mut next_entry = before.clone();
                        for s in &backs {
                            next_entry.merge_from(s);
                        }
                        if next_entry == entry {
                            *state = body_state;
                            break;
                        }
                        entry = next_entry;
                    }
                    tracing::trace!(?label, iterations, "loop reaching-defs converged");
                }
            },

            ExprKind::If {
                cond,
                then_expr,
                else_expr,
            } => {
                self.walk(cond, state)?;
                let mut then_state = state.clone();
                self.walk(then_expr, &mut then_state)?;
                if let Some(else_id) = else_expr {
                    self.walk(else_id, state)?;
                }
                // Without an else arm the untaken path is the current
                // state, so the same merge covers both shapes.
                state.merge_from(&then_state);
            }

            ExprKind::Br { label, value } => {
                if let Some(v) = value {
                    self.walk(v, state)?;
                }
                self.record_branch(id, label, state)?;
                state.reachable = false;
            }

            ExprKind::BrIf { label, cond, value } => {
                if let Some(v) = value {
                    self.walk(v, state)?;
                }
                self.walk(cond, state)?;
                self.record_branch(id, label, state)?;
            }
        }
        Ok(())
    }

    fn record_branch(
        &mut self,
        expr: ExprId,
        label: LabelId,
        state: &FlowState,
    ) -> Result<(), AnalysisError> {
        let states = self
            .branch_states
            .get_mut(&label)
            .ok_or(AnalysisError::UnboundLabel { expr, label })?;
        states.push(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
