use graft_core::stmt::{BinaryOp, Expr, Value};

// ---------------------------------------------------------------------------
// Eq / Ne
// ---------------------------------------------------------------------------

#[test]
fn eq_equal_i64() {
    assert_eq!(
        Expr::eq(1i64, 1i64).eval_const().unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn eq_different_strings() {
    assert_eq!(
        Expr::eq("foo", "bar").eval_const().unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn eq_compares_numbers_across_types() {
    assert_eq!(Expr::eq(2i64, 2.0).eval_const().unwrap(), Value::Bool(true));
}

#[test]
fn eq_with_null_is_null() {
    assert_eq!(
        Expr::eq(Value::Null, 1i64).eval_const().unwrap(),
        Value::Null
    );
    assert_eq!(
        Expr::eq(1i64, Value::Null).eval_const().unwrap(),
        Value::Null
    );
}

#[test]
fn ne_different_i64() {
    assert_eq!(Expr::ne(1i64, 2i64).eval_const().unwrap(), Value::Bool(true));
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn ordering_i64() {
    assert_eq!(Expr::lt(1i64, 2i64).eval_const().unwrap(), Value::Bool(true));
    assert_eq!(Expr::le(2i64, 2i64).eval_const().unwrap(), Value::Bool(true));
    assert_eq!(Expr::gt(1i64, 2i64).eval_const().unwrap(), Value::Bool(false));
    assert_eq!(Expr::ge(3i64, 2i64).eval_const().unwrap(), Value::Bool(true));
}

#[test]
fn ordering_strings() {
    assert_eq!(
        Expr::lt("apple", "banana").eval_const().unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn ordering_mixed_kinds_fails() {
    let err = Expr::lt("apple", 1i64).eval_const().unwrap_err();
    assert!(err.is_expression_evaluation_failed());
    assert_eq!(
        err.to_string(),
        "expression evaluation failed: cannot compare string with i64"
    );
}

// ---------------------------------------------------------------------------
// In
// ---------------------------------------------------------------------------

#[test]
fn in_list_contains() {
    let list = Value::list_from_vec(vec![1i64.into(), 2i64.into(), 3i64.into()]);
    assert_eq!(
        Expr::in_list(2i64, list.clone()).eval_const().unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        Expr::in_list(5i64, list).eval_const().unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn in_empty_list_is_false() {
    assert_eq!(
        Expr::binary_op(1i64, BinaryOp::In, Value::list_from_vec(vec![]))
            .eval_const()
            .unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn in_requires_list() {
    let err = Expr::in_list(1i64, 1i64).eval_const().unwrap_err();
    assert!(err.is_expression_evaluation_failed());
}
