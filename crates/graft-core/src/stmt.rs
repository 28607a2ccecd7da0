mod cardinality;
pub use cardinality::Cardinality;

mod eval;

mod expr;
pub use expr::Expr;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_cast;
pub use expr_cast::ExprCast;

mod expr_column;
pub use expr_column::{col, ExprColumn};

mod expr_cond;
pub use expr_cond::ExprCond;

mod expr_func;
pub use expr_func::ExprFunc;

mod expr_nary_op;
pub use expr_nary_op::ExprNaryOp;

mod expr_param;
pub use expr_param::{param, ExprParam};

mod expr_unary_op;
pub use expr_unary_op::ExprUnaryOp;

mod input;
pub use input::{ConstInput, Input};

mod op_binary;
pub use op_binary::BinaryOp;

mod op_nary;
pub use op_nary::NaryOp;

mod op_unary;
pub use op_unary::UnaryOp;

mod params;

mod patch;

mod path;
pub use path::{Path, Step};

mod query;
pub use query::Query;

mod select;
pub use select::Select;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_lazy;
pub use value_lazy::Lazy;

mod value_list;
pub use value_list::ValueList;

mod value_record;
pub use value_record::ValueRecord;

mod value_serde;

mod where_value;
pub use where_value::WhereValue;
