#![allow(clippy::unwrap_used, reason = "tests can panic")]

use pretty_assertions::assert_eq;

use skiff_ir::{builder, ExprArena, Function, LabelId, LocalId, ValType};

use super::*;

fn l(n: u32) -> LocalId {
    LocalId::new(n)
}

fn defs(items: &[Def]) -> DefSet {
    items.iter().copied().collect()
}

/// `(func (param i32) (drop (local.get $0)))` — the read sees only the
/// entry definition.
#[test]
fn param_read_reaches_entry() {
    let mut arena = ExprArena::new();
    let get = builder::local_get(&mut arena, l(0));
    let body = builder::drop_value(&mut arena, get);
    let func = Function::new("f", vec![ValType::I32], vec![], arena, body);

    let graph = LocalGraph::build(&func).unwrap();
    assert_eq!(*graph.reaching_writes(get), defs(&[Def::Entry]));
}

/// A write shadows the entry definition for later reads.
#[test]
fn write_shadows_entry() {
    let mut arena = ExprArena::new();
    let one = builder::i32_const(&mut arena, 1);
    let set = builder::local_set(&mut arena, l(0), one);
    let get = builder::local_get(&mut arena, l(0));
    let drop = builder::drop_value(&mut arena, get);
    let body = builder::block(&mut arena, vec![set, drop]);
    let func = Function::new("f", vec![ValType::I32], vec![], arena, body);

    let graph = LocalGraph::build(&func).unwrap();
    assert_eq!(*graph.reaching_writes(get), defs(&[Def::Write(set)]));
}

/// `LocalTee` is a definition like `LocalSet`.
#[test]
fn tee_is_a_definition() {
    let mut arena = ExprArena::new();
    let one = builder::i32_const(&mut arena, 1);
    let tee = builder::local_tee(&mut arena, l(0), one);
    let drop_tee = builder::drop_value(&mut arena, tee);
    let get = builder::local_get(&mut arena, l(0));
    let drop_get = builder::drop_value(&mut arena, get);
    let body = builder::block(&mut arena, vec![drop_tee, drop_get]);
    let func = Function::new("f", vec![ValType::I32], vec![], arena, body);

    let graph = LocalGraph::build(&func).unwrap();
    assert_eq!(*graph.reaching_writes(get), defs(&[Def::Write(tee)]));
}

/// A write on one arm of an `if` merges with the entry definition at
/// the join: the read after the `if` has two reaching defs.
#[test]
fn one_armed_if_is_a_merge_point() {
    let mut arena = ExprArena::new();
    let cond = builder::local_get(&mut arena, l(0));
    let one = builder::i32_const(&mut arena, 1);
    let set = builder::local_set(&mut arena, l(1), one);
    let if_ = builder::if_then(&mut arena, cond, set);
    let get = builder::local_get(&mut arena, l(1));
    let drop = builder::drop_value(&mut arena, get);
    let body = builder::block(&mut arena, vec![if_, drop]);
    let func = Function::new("f", vec![ValType::I32, ValType::I32], vec![], arena, body);

    let graph = LocalGraph::build(&func).unwrap();
    assert_eq!(
        *graph.reaching_writes(get),
        defs(&[Def::Entry, Def::Write(set)])
    );
}

/// Writes on both arms: the join sees both, the entry def is dead.
#[test]
fn two_armed_if_merges_both_writes() {
    let mut arena = ExprArena::new();
    let cond = builder::local_get(&mut arena, l(0));
    let one = builder::i32_const(&mut arena, 1);
    let set_then = builder::local_set(&mut arena, l(1), one);
    let two = builder::i32_const(&mut arena, 2);
    let set_else = builder::local_set(&mut arena, l(1), two);
    let if_ = builder::if_else(&mut arena, cond, set_then, set_else);
    let get = builder::local_get(&mut arena, l(1));
    let drop = builder::drop_value(&mut arena, get);
    let body = builder::block(&mut arena, vec![if_, drop]);
    let func = Function::new("f", vec![ValType::I32, ValType::I32], vec![], arena, body);

    let graph = LocalGraph::build(&func).unwrap();
    assert_eq!(
        *graph.reaching_writes(get),
        defs(&[Def::Write(set_then), Def::Write(set_else)])
    );
}

/// A `br_if` out of a labeled block carries the pre-write state to the
/// block end, so the read after the block is a merge point.
#[test]
fn br_if_skips_a_write() {
    let mut arena = ExprArena::new();
    let label = LabelId::new(0);
    let cond = builder::local_get(&mut arena, l(0));
    let skip = builder::br_if(&mut arena, label, cond);
    let one = builder::i32_const(&mut arena, 1);
    let set = builder::local_set(&mut arena, l(1), one);
    let inner = builder::labeled_block(&mut arena, label, vec![skip, set]);
    let get = builder::local_get(&mut arena, l(1));
    let drop = builder::drop_value(&mut arena, get);
    let body = builder::block(&mut arena, vec![inner, drop]);
    let func = Function::new("f", vec![ValType::I32, ValType::I32], vec![], arena, body);

    let graph = LocalGraph::build(&func).unwrap();
    assert_eq!(
        *graph.reaching_writes(get),
        defs(&[Def::Entry, Def::Write(set)])
    );
}

/// A read at the top of a loop body sees both the entry definition and
/// the write from the previous iteration (via the back edge).
#[test]
fn loop_back_edge_reaches_body_read() {
    let mut arena = ExprArena::new();
    let label = LabelId::new(0);
    let get_y = builder::local_get(&mut arena, l(1));
    let drop_y = builder::drop_value(&mut arena, get_y);
    let one = builder::i32_const(&mut arena, 1);
    let set_y = builder::local_set(&mut arena, l(1), one);
    let cond = builder::local_get(&mut arena, l(0));
    let back = builder::br_if(&mut arena, label, cond);
    let seq = builder::block(&mut arena, vec![drop_y, set_y, back]);
    let lp = builder::labeled_loop(&mut arena, label, seq);
    let func = Function::new("f", vec![ValType::I32, ValType::I32], vec![], arena, lp);

    let graph = LocalGraph::build(&func).unwrap();
    assert_eq!(
        *graph.reaching_writes(get_y),
        defs(&[Def::Entry, Def::Write(set_y)])
    );
    // The loop condition read is unaffected by the body write.
    assert_eq!(*graph.reaching_writes(cond), defs(&[Def::Entry]));
}

/// Code after an unconditional branch is unreachable; its reads record
/// no reaching definitions.
#[test]
fn reads_after_br_are_unreachable() {
    let mut arena = ExprArena::new();
    let label = LabelId::new(0);
    let exit = builder::br(&mut arena, label);
    let get = builder::local_get(&mut arena, l(0));
    let drop = builder::drop_value(&mut arena, get);
    let inner = builder::labeled_block(&mut arena, label, vec![exit, drop]);
    let func = Function::new("f", vec![ValType::I32], vec![], arena, inner);

    let graph = LocalGraph::build(&func).unwrap();
    assert_eq!(*graph.reaching_writes(get), DefSet::default());
}

/// `compute_influences` inverts the read table.
#[test]
fn influences_are_the_inverse_of_reaching() {
    let mut arena = ExprArena::new();
    let one = builder::i32_const(&mut arena, 1);
    let set = builder::local_set(&mut arena, l(0), one);
    let get_a = builder::local_get(&mut arena, l(0));
    let drop_a = builder::drop_value(&mut arena, get_a);
    let get_b = builder::local_get(&mut arena, l(0));
    let drop_b = builder::drop_value(&mut arena, get_b);
    let body = builder::block(&mut arena, vec![set, drop_a, drop_b]);
    let func = Function::new("f", vec![ValType::I32], vec![], arena, body);

    let mut graph = LocalGraph::build(&func).unwrap();
    graph.compute_influences();

    let influenced: FxHashSet<ExprId> = [get_a, get_b].into_iter().collect();
    assert_eq!(*graph.influenced_reads(set), influenced);
}

/// Before `compute_influences`, lookups fall back to the empty set.
#[test]
fn influences_empty_until_computed() {
    let mut arena = ExprArena::new();
    let one = builder::i32_const(&mut arena, 1);
    let set = builder::local_set(&mut arena, l(0), one);
    let get = builder::local_get(&mut arena, l(0));
    let drop = builder::drop_value(&mut arena, get);
    let body = builder::block(&mut arena, vec![set, drop]);
    let func = Function::new("f", vec![ValType::I32], vec![], arena, body);

    let graph = LocalGraph::build(&func).unwrap();
    assert!(graph.influenced_reads(set).is_empty());
}

/// Malformed branches surface as a typed error, not a panic.
#[test]
fn unbound_label_is_an_error() {
    let mut arena = ExprArena::new();
    let stray = LabelId::new(7);
    let br = builder::br(&mut arena, stray);
    let func = Function::new("f", vec![], vec![], arena, br);

    assert_eq!(
        LocalGraph::build(&func).unwrap_err(),
        AnalysisError::UnboundLabel {
            expr: br,
            label: stray
        }
    );
}
