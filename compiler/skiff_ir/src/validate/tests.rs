use pretty_assertions::assert_eq;

use crate::builder;
use crate::{ExprArena, Function, LabelId, LocalId, ValType};

use super::*;

fn l(n: u32) -> LocalId {
    LocalId::new(n)
}

#[test]
fn well_formed_function_passes() {
    let mut arena = ExprArena::new();
    let label = LabelId::new(0);
    let get = builder::local_get(&mut arena, l(0));
    let brif = builder::br_if(&mut arena, label, get);
    let one = builder::i32_const(&mut arena, 1);
    let set = builder::local_set(&mut arena, l(1), one);
    let body = builder::labeled_block(&mut arena, label, vec![brif, set]);
    let func = Function::new("f", vec![ValType::I32], vec![ValType::I32], arena, body);

    assert_eq!(validate_function(&func), Ok(()));
}

#[test]
fn shared_child_is_rejected() {
    let mut arena = ExprArena::new();
    let get = builder::local_get(&mut arena, l(0));
    // The same read referenced from two parents.
    let set_a = builder::local_set(&mut arena, l(1), get);
    let set_b = builder::local_set(&mut arena, l(1), get);
    let body = builder::block(&mut arena, vec![set_a, set_b]);
    let func = Function::new("f", vec![ValType::I32, ValType::I32], vec![], arena, body);

    assert_eq!(
        validate_function(&func),
        Err(ValidateError::SharedChild { child: get })
    );
}

#[test]
fn unbound_label_is_rejected() {
    let mut arena = ExprArena::new();
    let stray = LabelId::new(9);
    let br = builder::br(&mut arena, stray);
    let body = builder::block(&mut arena, vec![br]);
    let func = Function::new("f", vec![], vec![], arena, body);

    assert_eq!(
        validate_function(&func),
        Err(ValidateError::UnboundLabel {
            expr: br,
            label: stray
        })
    );
}

#[test]
fn duplicate_label_is_rejected() {
    let mut arena = ExprArena::new();
    let label = LabelId::new(0);
    let nop = builder::nop(&mut arena);
    let inner = builder::labeled_block(&mut arena, label, vec![nop]);
    let body = builder::labeled_block(&mut arena, label, vec![inner]);
    let func = Function::new("f", vec![], vec![], arena, body);

    assert_eq!(
        validate_function(&func),
        Err(ValidateError::DuplicateLabel { label })
    );
}

#[test]
fn out_of_range_local_is_rejected() {
    let mut arena = ExprArena::new();
    let get = builder::local_get(&mut arena, l(3));
    let body = builder::drop_value(&mut arena, get);
    let func = Function::new("f", vec![ValType::I32], vec![], arena, body);

    assert_eq!(
        validate_function(&func),
        Err(ValidateError::LocalOutOfRange {
            expr: get,
            local: l(3)
        })
    );
}

#[test]
fn branch_may_not_escape_its_binder() {
    let mut arena = ExprArena::new();
    let label = LabelId::new(0);
    let nop = builder::nop(&mut arena);
    let binder = builder::labeled_block(&mut arena, label, vec![nop]);
    // Branch placed after the block has closed its scope.
    let br = builder::br(&mut arena, label);
    let body = builder::block(&mut arena, vec![binder, br]);
    let func = Function::new("f", vec![], vec![], arena, body);

    assert_eq!(
        validate_function(&func),
        Err(ValidateError::UnboundLabel { expr: br, label })
    );
}

#[test]
fn detached_nodes_are_ignored() {
    let mut arena = ExprArena::new();
    // Allocated but never referenced from the body.
    let _orphan = builder::local_get(&mut arena, l(42));
    let body = builder::nop(&mut arena);
    let func = Function::new("f", vec![], vec![], arena, body);

    assert_eq!(validate_function(&func), Ok(()));
}

#[test]
fn fresh_labels_skip_existing_ones() {
    let mut arena = ExprArena::new();
    let nop = builder::nop(&mut arena);
    let body = builder::labeled_block(&mut arena, LabelId::new(4), vec![nop]);
    let mut func = Function::new("f", vec![], vec![], arena, body);

    assert_eq!(func.fresh_label(), LabelId::new(5));
    assert_eq!(func.fresh_label(), LabelId::new(6));
}
