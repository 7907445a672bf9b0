//! Shared test utilities for pass tests.

#![allow(clippy::unwrap_used, reason = "tests can panic")]

use skiff_ir::{postorder, print::display, ExprId, ExprKind, Function, LocalId};

use crate::pass::Pass;
use crate::MergeLocals;

/// Shorthand for `LocalId::new(n)`.
pub(crate) fn l(n: u32) -> LocalId {
    LocalId::new(n)
}

/// Run the merge-locals pass over one function, panicking on defects.
pub(crate) fn run_merge(func: &mut Function) {
    let mut pass = MergeLocals::new();
    pass.run_function(func).unwrap();
}

/// The function body rendered as an s-expression.
pub(crate) fn printed(func: &Function) -> String {
    display(&func.arena, func.body).to_string()
}

/// Count marker-shaped nodes (a tee whose value is a bare read of the
/// same local) reachable from the body.
pub(crate) fn marker_count(func: &Function) -> usize {
    postorder(&func.arena, func.body)
        .into_iter()
        .filter(|&id| {
            let ExprKind::LocalTee { local, value } = *func.arena.kind(id) else {
                return false;
            };
            matches!(
                *func.arena.kind(value),
                ExprKind::LocalGet { local: read } if read == local
            )
        })
        .count()
}

/// The local a `LocalGet` node reads. Panics on any other kind.
pub(crate) fn read_local(func: &Function, id: ExprId) -> LocalId {
    match *func.arena.kind(id) {
        ExprKind::LocalGet { local } => local,
        ref other => panic!("expected a read, found {other:?}"),
    }
}
