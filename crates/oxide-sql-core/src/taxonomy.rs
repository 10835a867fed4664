//! Stable statement-kind codes and their capability predicates.
//!
//! Client tooling depends on these numeric codes remaining stable across
//! releases, so they are a compatibility surface rather than an
//! implementation detail: never renumber a variant once shipped.

use crate::ast::Statement;

/// A stable, closed enumeration of statement kinds.
///
/// Numeric codes follow a fixed band layout: `0` for `Unknown`, DDL in
/// `1..53` / `85..105`, DML in `54..68`, transaction/admin in `69..84,
/// 91`. `NoOperation` and `Replace` are kept at distinct codes (see
/// DESIGN.md) rather than sharing one, to keep every code unambiguous.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// Statement kind could not be determined.
    Unknown = 0,
    /// `CREATE TABLE`.
    CreateTable = 30,
    /// `CREATE INDEX`.
    CreateIndex = 31,
    /// `CREATE [MATERIALIZED] VIEW`.
    CreateView = 32,
    /// `DROP TABLE`.
    DropTable = 33,
    /// `ALTER TABLE ADD COLUMN`.
    AlterTableAddColumn = 7,
    /// `TRUNCATE`.
    Truncate = 50,
    /// `INSERT`.
    Insert = 61,
    /// `MERGE`.
    Merge = 62,
    /// `DELETE`.
    Delete = 58,
    /// `UPDATE`.
    Update = 68,
    /// `SELECT` (includes `WITH ... SELECT` and set operations).
    Select = 66,
    /// `CALL`.
    Call = 69,
    /// `BEGIN` / start a transaction.
    Begin = 70,
    /// `COMMIT`.
    Commit = 71,
    /// `ROLLBACK`.
    Rollback = 72,
    /// `SAVEPOINT`.
    Savepoint = 74,
    /// `RELEASE SAVEPOINT`.
    ReleaseSavepoint = 75,
    /// `SET` a session/database option.
    Set = 77,
    /// `SHOW`.
    Show = 78,
    /// `EXPLAIN [ANALYZE]`.
    Explain = 79,
    /// `SHUTDOWN [IMMEDIATELY]`.
    Shutdown = 80,
    /// `CHECKPOINT [SYNC]`.
    Checkpoint = 81,
    /// `USE`.
    Use = 91,
    /// No-op statement (empty input). Kept distinct from `Replace`
    /// rather than sharing its numeric code; see DESIGN.md.
    NoOperation = 92,
    /// `REPLACE` (dialect upsert). Kept distinct from `NoOperation`.
    Replace = 93,
}

impl StatementKind {
    /// Classifies a parsed statement into its stable kind code.
    #[must_use]
    pub const fn of(statement: &Statement) -> Self {
        match statement {
            Statement::Select(_) | Statement::SetOperation(_) => Self::Select,
            Statement::With(with) => Self::of(&with.body),
            Statement::Insert(_) => Self::Insert,
            Statement::Update(_) => Self::Update,
            Statement::Delete(_) => Self::Delete,
            Statement::Merge(_) => Self::Merge,
            Statement::Transaction(txn) => match txn {
                crate::ast::TransactionStatement::Begin { .. } => Self::Begin,
                crate::ast::TransactionStatement::Commit => Self::Commit,
                crate::ast::TransactionStatement::Rollback { .. } => Self::Rollback,
                crate::ast::TransactionStatement::Savepoint(_) => Self::Savepoint,
                crate::ast::TransactionStatement::Release(_) => Self::ReleaseSavepoint,
            },
            Statement::Set(_) => Self::Set,
            Statement::Show(_) => Self::Show,
            Statement::Explain { .. } => Self::Explain,
            Statement::Call(_) => Self::Call,
            Statement::Truncate(_) => Self::Truncate,
            Statement::Use(_) => Self::Use,
            Statement::CreateTable(_) => Self::CreateTable,
            Statement::DropTable(_) => Self::DropTable,
            Statement::CreateIndex(_) => Self::CreateIndex,
            Statement::CreateView(_) => Self::CreateView,
            Statement::Checkpoint => Self::Checkpoint,
            Statement::Shutdown { .. } => Self::Shutdown,
            Statement::NoOperation => Self::NoOperation,
        }
    }

    /// True for statements that produce a result set rather than an
    /// update count.
    #[must_use]
    pub const fn is_query(self) -> bool {
        matches!(self, Self::Select)
    }

    /// True for statements that participate in transactional bookkeeping
    /// (begin/commit/rollback/savepoint), as opposed to DDL which forces
    /// an implicit commit.
    #[must_use]
    pub const fn is_transactional(self) -> bool {
        matches!(
            self,
            Self::Begin | Self::Commit | Self::Rollback | Self::Savepoint | Self::ReleaseSavepoint
        )
    }

    /// True for DML whose execution may be safely retried on a
    /// concurrent-update conflict. DDL is never retryable.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Insert | Self::Update | Self::Delete | Self::Merge)
    }

    /// True for statements that are non-transactional and therefore
    /// force a commit on `stop()` regardless of the session's
    /// auto-commit setting (DDL semantics).
    #[must_use]
    pub const fn is_ddl(self) -> bool {
        matches!(
            self,
            Self::CreateTable
                | Self::CreateIndex
                | Self::CreateView
                | Self::DropTable
                | Self::AlterTableAddColumn
                | Self::Truncate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn kind_of(sql: &str) -> StatementKind {
        let stmt = Parser::new(sql).parse_statement().unwrap();
        StatementKind::of(&stmt)
    }

    #[test]
    fn test_select_kind() {
        assert_eq!(kind_of("SELECT 1"), StatementKind::Select);
        assert!(StatementKind::Select.is_query());
        assert!(!StatementKind::Select.is_retryable());
    }

    #[test]
    fn test_insert_is_retryable_not_query() {
        let kind = kind_of("INSERT INTO t VALUES (1)");
        assert_eq!(kind, StatementKind::Insert);
        assert!(kind.is_retryable());
        assert!(!kind.is_query());
    }

    #[test]
    fn test_create_table_is_ddl_not_retryable() {
        let kind = kind_of("CREATE TABLE t (id INTEGER)");
        assert_eq!(kind, StatementKind::CreateTable);
        assert!(kind.is_ddl());
        assert!(!kind.is_retryable());
    }

    #[test]
    fn test_transaction_kinds() {
        assert_eq!(kind_of("BEGIN"), StatementKind::Begin);
        assert_eq!(kind_of("COMMIT"), StatementKind::Commit);
        assert_eq!(kind_of("ROLLBACK"), StatementKind::Rollback);
        assert!(StatementKind::Commit.is_transactional());
    }

    #[test]
    fn test_with_cte_reports_inner_kind() {
        let kind = kind_of("WITH c AS (SELECT 1) SELECT * FROM c");
        assert_eq!(kind, StatementKind::Select);
    }

    #[test]
    fn test_no_operation_distinct_from_replace() {
        assert_ne!(
            StatementKind::NoOperation as i32,
            StatementKind::Replace as i32
        );
    }
}
