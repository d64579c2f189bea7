//! Expressions derived from a graph: the structural call tree, the operation
//! table and its evaluator.

pub mod annotate;
pub mod builder;
pub mod eval;
pub mod ops;
pub mod tree;

pub use annotate::render_with_operations;
pub use builder::BUILD_FAILURE;
pub use eval::{Evaluator, evaluate_graph};
pub use ops::{
    Arity, Operation, OperationTable, Operator, load_operation_file, parse_operation_table,
};
pub use tree::Expr;
