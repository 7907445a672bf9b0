//! Function and module containers.
//!
//! A [`Function`] owns its expression arena, so distinct functions are
//! fully independent units of work — a pass runner may transform them
//! on separate threads with no shared mutable state.

use crate::arena::ExprArena;
use crate::expr::{ExprKind, ValType};
use crate::ids::{ExprId, LabelId, LocalId};

/// A single function: signature, local slots, and body tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    /// Function name, unique within a module.
    pub name: String,
    /// Parameter types. Parameters occupy local indices `0..params.len()`.
    pub params: Vec<ValType>,
    /// Declared (non-parameter) local types, zero-initialized on entry.
    pub locals: Vec<ValType>,
    /// Storage for all expression nodes of this function.
    pub arena: ExprArena,
    /// Root of the body tree.
    pub body: ExprId,
    next_label: u32,
}

impl Function {
    /// Build a function from an already-populated arena.
    ///
    /// The label counter resumes after the highest label mentioned in
    /// the arena, so [`fresh_label`](Self::fresh_label) never collides
    /// with labels the caller allocated by hand.
    pub fn new(
        name: impl Into<String>,
        params: Vec<ValType>,
        locals: Vec<ValType>,
        arena: ExprArena,
        body: ExprId,
    ) -> Self {
        let mut next_label = 0;
        for idx in 0..arena.len() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "arena length fits in u32 by construction"
            )]
            let id = ExprId::new(idx as u32);
            let label = match arena.kind(id) {
                ExprKind::Block { label, .. } | ExprKind::Loop { label, .. } => *label,
                ExprKind::Br { label, .. } | ExprKind::BrIf { label, .. } => Some(*label),
                _ => None,
            };
            if let Some(label) = label {
                next_label = next_label.max(label.raw() + 1);
            }
        }
        Self {
            name: name.into(),
            params,
            locals,
            arena,
            body,
            next_label,
        }
    }

    /// Total number of local slots (parameters plus declared locals).
    pub fn num_locals(&self) -> usize {
        self.params.len() + self.locals.len()
    }

    /// The type of a local slot.
    pub fn local_type(&self, local: LocalId) -> ValType {
        let idx = local.index();
        if idx < self.params.len() {
            self.params[idx]
        } else {
            self.locals[idx - self.params.len()]
        }
    }

    /// Returns `true` if the slot is a parameter.
    pub fn is_param(&self, local: LocalId) -> bool {
        local.index() < self.params.len()
    }

    /// Append a declared local of the given type, returning its ID.
    pub fn add_local(&mut self, ty: ValType) -> LocalId {
        let idx = self.num_locals();
        assert!(idx < u32::MAX as usize, "local index overflow");
        self.locals.push(ty);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "index bounded by the assert above"
        )]
        LocalId::new(idx as u32)
    }

    /// Allocate a label unused anywhere in this function.
    pub fn fresh_label(&mut self) -> LabelId {
        let label = LabelId::new(self.next_label);
        self.next_label += 1;
        label
    }
}

/// A module: a flat list of functions.
///
/// Functions share nothing; each owns its arena and label space.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
    pub functions: Vec<Function>,
}

impl Module {
    /// Create an empty module.
    pub fn new() -> Self {
        Self::default()
    }
}
