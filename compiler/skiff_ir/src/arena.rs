//! Expression arena.
//!
//! Every function owns one [`ExprArena`] holding all of its expression
//! nodes in a flat vector indexed by [`ExprId`]. Nodes are never
//! removed — a transformation that splices a node out of the tree
//! simply leaves it unreferenced. This keeps every `ExprId` stable for
//! the lifetime of the function, which is what lets analyses key their
//! tables by node ID instead of aliasing into the tree.

use crate::expr::ExprKind;
use crate::ids::ExprId;

/// Flat storage for a function's expression nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExprArena {
    kinds: Vec<ExprKind>,
}

impl ExprArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Create an arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            kinds: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a node, returning its ID.
    pub fn push(&mut self, kind: ExprKind) -> ExprId {
        assert!(
            self.kinds.len() < u32::MAX as usize,
            "expression arena overflow"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "length bounded by the assert above"
        )]
        let id = ExprId::new(self.kinds.len() as u32);
        self.kinds.push(kind);
        id
    }

    /// Get the node for an ID.
    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.kinds[id.index()]
    }

    /// Get the node for an ID, mutably.
    #[inline]
    pub fn kind_mut(&mut self, id: ExprId) -> &mut ExprKind {
        &mut self.kinds[id.index()]
    }

    /// Number of allocated nodes (including detached ones).
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no nodes have been allocated.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Returns `true` if `id` refers to an allocated node.
    pub fn contains(&self, id: ExprId) -> bool {
        id.index() < self.kinds.len()
    }
}
