use crate::{
    stmt::{BinaryOp, ConstInput, Expr, ExprFunc, Input, NaryOp, UnaryOp, Value},
    Error, Result,
};
use std::cmp::Ordering;

impl Expr {
    pub fn eval(&self, mut input: impl Input) -> Result<Value> {
        self.eval_ref(&mut input)
    }

    /// Evaluates a predicate. Null counts as false.
    pub fn eval_bool(&self, mut input: impl Input) -> Result<bool> {
        self.eval_ref_bool(&mut input)
    }

    pub fn eval_const(&self) -> Result<Value> {
        self.eval(ConstInput::new())
    }

    fn eval_ref_bool(&self, input: &mut impl Input) -> Result<bool> {
        match self.eval_ref(input)? {
            Value::Bool(v) => Ok(v),
            Value::Null => Ok(false),
            value => Err(Error::expression_evaluation_failed(format!(
                "expected a boolean, found {}",
                value.kind()
            ))),
        }
    }

    fn eval_ref(&self, input: &mut impl Input) -> Result<Value> {
        match self {
            Expr::BinaryOp(expr_binary_op) => {
                let lhs = expr_binary_op.lhs.eval_ref(input)?;
                let rhs = expr_binary_op.rhs.eval_ref(input)?;
                eval_binary_op(expr_binary_op.op, &lhs, &rhs)
            }
            Expr::Cast(expr_cast) => expr_cast.ty.cast(expr_cast.expr.eval_ref(input)?),
            Expr::Column(expr_column) => input.resolve_column(expr_column).ok_or_else(|| {
                Error::expression_evaluation_failed(format!("unknown column `{expr_column}`"))
            }),
            Expr::Cond(expr_cond) => {
                if expr_cond.cond.eval_ref_bool(input)? {
                    expr_cond.then.eval_ref(input)
                } else {
                    expr_cond.otherwise.eval_ref(input)
                }
            }
            Expr::Func(expr_func) => {
                let args = expr_func
                    .args
                    .iter()
                    .map(|arg| arg.eval_ref(input))
                    .collect::<Result<Vec<_>>>()?;
                eval_func(expr_func, args)
            }
            Expr::NaryOp(expr_nary_op) => match expr_nary_op.op {
                // Three-valued logic: a definite answer wins over null.
                NaryOp::And => {
                    let mut saw_null = false;
                    for operand in &expr_nary_op.operands {
                        match operand.eval_ref(input)? {
                            Value::Bool(false) => return Ok(false.into()),
                            Value::Bool(true) => {}
                            Value::Null => saw_null = true,
                            value => return Err(not_boolean("and", &value)),
                        }
                    }
                    Ok(if saw_null { Value::Null } else { true.into() })
                }
                NaryOp::Or => {
                    let mut saw_null = false;
                    for operand in &expr_nary_op.operands {
                        match operand.eval_ref(input)? {
                            Value::Bool(true) => return Ok(true.into()),
                            Value::Bool(false) => {}
                            Value::Null => saw_null = true,
                            value => return Err(not_boolean("or", &value)),
                        }
                    }
                    Ok(if saw_null { Value::Null } else { false.into() })
                }
                NaryOp::Coalesce => {
                    for operand in &expr_nary_op.operands {
                        let value = operand.eval_ref(input)?;
                        if !value.is_null() {
                            return Ok(value);
                        }
                    }
                    Ok(Value::Null)
                }
            },
            Expr::Param(expr_param) => match &expr_param.value {
                Some(value) => Ok(value.clone()),
                None => Err(Error::unbound_parameter(expr_param.id())),
            },
            Expr::UnaryOp(expr_unary_op) => {
                let value = expr_unary_op.expr.eval_ref(input)?;
                match (expr_unary_op.op, value) {
                    (_, Value::Null) => Ok(Value::Null),
                    (UnaryOp::Neg, Value::I64(v)) => v.checked_neg().map(Value::I64).ok_or_else(
                        || Error::expression_evaluation_failed("integer overflow in negation"),
                    ),
                    (UnaryOp::Neg, Value::F64(v)) => Ok(Value::F64(-v)),
                    (UnaryOp::Not, Value::Bool(v)) => Ok(Value::Bool(!v)),
                    (op, value) => Err(Error::expression_evaluation_failed(format!(
                        "cannot apply `{op}` to {}",
                        value.kind()
                    ))),
                }
            }
            Expr::Value(value) => Ok(value.clone()),
        }
    }
}

fn eval_binary_op(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value> {
    if lhs.is_null() {
        return Ok(Value::Null);
    }

    if op == BinaryOp::In {
        let Value::List(items) = rhs else {
            return Err(Error::expression_evaluation_failed(format!(
                "`in` requires a list, found {}",
                rhs.kind()
            )));
        };
        return Ok(items.iter().any(|item| values_eq(lhs, item)).into());
    }

    if rhs.is_null() {
        return Ok(Value::Null);
    }

    let ret = match op {
        BinaryOp::Eq => values_eq(lhs, rhs),
        BinaryOp::Ne => !values_eq(lhs, rhs),
        BinaryOp::Ge => cmp_ordered(lhs, rhs)? != Ordering::Less,
        BinaryOp::Gt => cmp_ordered(lhs, rhs)? == Ordering::Greater,
        BinaryOp::Le => cmp_ordered(lhs, rhs)? != Ordering::Greater,
        BinaryOp::Lt => cmp_ordered(lhs, rhs)? == Ordering::Less,
        BinaryOp::In => unreachable!(),
    };

    Ok(ret.into())
}

/// Equality with integers and floats compared numerically.
fn values_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::I64(a), Value::F64(b)) | (Value::F64(b), Value::I64(a)) => (*a as f64) == *b,
        _ => lhs == rhs,
    }
}

fn cmp_ordered(lhs: &Value, rhs: &Value) -> Result<Ordering> {
    let ordering = match (lhs, rhs) {
        (Value::I64(a), Value::I64(b)) => Some(a.cmp(b)),
        (Value::F64(a), Value::F64(b)) => a.partial_cmp(b),
        (Value::I64(a), Value::F64(b)) => (*a as f64).partial_cmp(b),
        (Value::F64(a), Value::I64(b)) => a.partial_cmp(&(*b as f64)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    };

    ordering.ok_or_else(|| {
        Error::expression_evaluation_failed(format!(
            "cannot compare {} with {}",
            lhs.kind(),
            rhs.kind()
        ))
    })
}

fn eval_func(func: &ExprFunc, args: Vec<Value>) -> Result<Value> {
    let [arg] = <[Value; 1]>::try_from(args).map_err(|args| {
        Error::expression_evaluation_failed(format!(
            "`{}` takes one argument, {} given",
            func.name,
            args.len()
        ))
    })?;

    let ret = match (func.name.as_str(), arg) {
        (_, Value::Null) => Value::Null,
        ("lower", Value::String(v)) => Value::String(v.to_lowercase()),
        ("upper", Value::String(v)) => Value::String(v.to_uppercase()),
        ("length", Value::String(v)) => Value::I64(v.chars().count() as i64),
        ("length", Value::List(v)) => Value::I64(v.len() as i64),
        ("abs", Value::I64(v)) => Value::I64(v.checked_abs().ok_or_else(|| {
            Error::expression_evaluation_failed("integer overflow in `abs`")
        })?),
        ("abs", Value::F64(v)) => Value::F64(v.abs()),
        ("lower" | "upper" | "length" | "abs", arg) => {
            return Err(Error::expression_evaluation_failed(format!(
                "`{}` is not defined for {}",
                func.name,
                arg.kind()
            )))
        }
        (name, _) => {
            return Err(Error::expression_evaluation_failed(format!(
                "unknown function `{name}`"
            )))
        }
    };

    Ok(ret)
}

fn not_boolean(op: &str, value: &Value) -> Error {
    Error::expression_evaluation_failed(format!(
        "`{op}` operand must be a boolean, found {}",
        value.kind()
    ))
}
