//! Tree traversal and the visitor protocol.
//!
//! [`postorder`] flattens a body tree into evaluation-order postorder
//! (children before parents) using an iterative, explicit-stack walk.
//! [`walk_function`] drives a [`Visitor`] over that order, dispatching
//! per-kind hooks.
//!
//! The visit order is snapshotted before the first callback runs, so a
//! visitor that splices new nodes into the tree (a pass instrumenting
//! what it just matched) does not get re-entered for them — every node
//! present at walk start is visited exactly once.

use crate::arena::ExprArena;
use crate::function::Function;
use crate::ids::ExprId;
use crate::ExprKind;

/// Flatten the tree under `root` into postorder.
///
/// Children appear before their parents, siblings in evaluation order.
/// Iterative with an explicit stack, so arbitrarily deep trees do not
/// overflow the call stack.
pub fn postorder(arena: &ExprArena, root: ExprId) -> Vec<ExprId> {
    let mut order = Vec::new();
    // Stack entries: (node, children_pushed). The first pop pushes the
    // node's children; the second emits the node itself.
    let mut stack: Vec<(ExprId, bool)> = vec![(root, false)];

    while let Some(&mut (id, ref mut children_done)) = stack.last_mut() {
        if *children_done {
            order.push(id);
            stack.pop();
            continue;
        }
        *children_done = true;

        // Push in reverse so the first child is processed first.
        for child in arena.kind(id).children().into_iter().rev() {
            stack.push((child, false));
        }
    }

    order
}

/// Callbacks invoked by [`walk_function`], once per node in postorder.
///
/// The per-kind hooks cover the operations analyses care about (reads
/// and writes of locals); `visit_expr` fires for every node. Hooks
/// receive the owning function mutably and may rewrite the tree —
/// mutations are not re-visited within the same walk.
pub trait Visitor {
    /// Called for every node, before any per-kind hook.
    fn visit_expr(&mut self, _func: &mut Function, _id: ExprId) {}

    /// Called for each `LocalGet`.
    fn visit_local_get(&mut self, _func: &mut Function, _id: ExprId) {}

    /// Called for each `LocalSet`.
    fn visit_local_set(&mut self, _func: &mut Function, _id: ExprId) {}

    /// Called for each `LocalTee`.
    fn visit_local_tee(&mut self, _func: &mut Function, _id: ExprId) {}
}

/// Drive `visitor` over `func`'s body in postorder.
pub fn walk_function<V: Visitor>(visitor: &mut V, func: &mut Function) {
    let order = postorder(&func.arena, func.body);
    for id in order {
        visitor.visit_expr(func, id);
        match func.arena.kind(id) {
            ExprKind::LocalGet { .. } => visitor.visit_local_get(func, id),
            ExprKind::LocalSet { .. } => visitor.visit_local_set(func, id),
            ExprKind::LocalTee { .. } => visitor.visit_local_tee(func, id),
            _ => {}
        }
    }
}
