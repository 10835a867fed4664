//! Abstract Syntax Tree (AST) types for SQL statements.

mod expression;
mod statement;
mod types;

pub use expression::{
    BinaryOp, Expr, FrameBound, FrameExclusion, FrameUnit, FunctionCall, Literal, UnaryOp,
    WindowFrame, WindowRef, WindowSpec,
};
pub use statement::{
    CallStatement, ColumnDefinition, CommonTableExpr, ConflictAction, CreateIndexStatement,
    CreateTableStatement, CreateViewStatement, DeleteStatement, DropTableStatement,
    InsertSource, InsertStatement, IsolationLevel, JoinClause, JoinType, MergeAction,
    MergeStatement, MergeWhenClause, NullOrdering, OnConflict, OrderBy, OrderDirection,
    SelectColumn, SelectStatement, SetOperationStatement, SetOperator, SetStatement, ShowStatement,
    Statement, TableRef, TransactionStatement, TruncateStatement, UpdateAssignment,
    UpdateStatement, UseStatement, WithStatement,
};
pub use types::{ColumnDef, DataType};
