//! Rejects constructs the parser accepts but the command runtime does
//! not implement, so they fail fast at `prepare()` time with a stable
//! error variant instead of surfacing as a confusing failure once
//! handed to the session.

use crate::ast::{JoinType, SelectStatement, Statement, TableRef};

use super::error::{EngineError, Result};

/// Checks `stmt` for any use of a construct the runtime intentionally
/// does not support.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedFeature`] naming the construct.
pub fn check(stmt: &Statement) -> Result<()> {
    match stmt {
        Statement::Select(s) => check_select(s),
        Statement::With(w) => {
            for cte in &w.ctes {
                check_select(&cte.query)?;
            }
            check(&w.body)
        }
        Statement::SetOperation(op) => {
            check(&op.left)?;
            check(&op.right)
        }
        Statement::Explain { statement, .. } => check(statement),
        Statement::Insert(i) => {
            if let crate::ast::InsertSource::Query(q) = &i.values {
                check_select(q)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_select(select: &SelectStatement) -> Result<()> {
    if let Some(from) = &select.from {
        check_table_ref(from)?;
    }
    Ok(())
}

fn check_table_ref(table: &TableRef) -> Result<()> {
    match table {
        TableRef::Table { .. } => Ok(()),
        TableRef::Subquery { query, .. } => check_select(query),
        TableRef::Join { left, join } => {
            if join.join_type == JoinType::Full {
                return Err(EngineError::UnsupportedFeature(
                    "FULL OUTER JOIN".to_string(),
                ));
            }
            check_table_ref(left)?;
            check_table_ref(&join.table)
        }
    }
}
