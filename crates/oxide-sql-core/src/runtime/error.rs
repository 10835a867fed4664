//! Engine error taxonomy.
//!
//! Every error the command runtime can raise maps to one of these stable
//! kinds. Client tooling matches on the variant, not on the message text,
//! so new variants are additive and existing ones are never renamed.

use crate::parser::ParseError;

/// Result alias used throughout the runtime layer.
pub type Result<T> = std::result::Result<T, EngineError>;

/// The engine's error taxonomy, mirroring the abstract kinds from the
/// statement-processing specification.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Malformed SQL. Carries the offending text and byte offset via the
    /// wrapped `ParseError`.
    #[error("syntax error: {0}")]
    Syntax(ParseError),

    /// An identifier exceeded the dialect's maximum length.
    #[error("name too long: '{name}' exceeds the {max}-byte limit")]
    NameTooLong {
        /// The offending identifier.
        name: String,
        /// The configured maximum.
        max: usize,
    },

    /// A literal was present while the session's literal policy forbids
    /// it.
    #[error("literals are not allowed in this context")]
    LiteralsNotAllowed,

    /// A hex string literal (`X'...'`) had malformed contents.
    #[error("malformed hex string literal: {0}")]
    HexStringWrong(String),

    /// A numeric or temporal value was out of range for its declared
    /// scale/precision.
    #[error("value out of range for declared scale/precision: {0}")]
    InvalidValueScalePrecision(String),

    /// A bound or literal value was invalid for its target type.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// An unrecognized type name appeared in a type position.
    #[error("unknown data type: {0}")]
    UnknownDataType(String),

    /// The same column name appeared twice where uniqueness is required.
    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    /// A column list did not match the expected arity.
    #[error("column count does not match: expected {expected}, found {found}")]
    ColumnCountDoesNotMatch {
        /// Expected column count.
        expected: usize,
        /// Actual column count.
        found: usize,
    },

    /// A referenced column could not be resolved.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A referenced table or view could not be resolved.
    #[error("table or view not found: {0}")]
    TableOrViewNotFound(String),

    /// A referenced schema could not be resolved.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// A referenced sequence could not be resolved.
    #[error("sequence not found: {0}")]
    SequenceNotFound(String),

    /// A referenced function/alias could not be resolved.
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    /// A `CREATE ALIAS`/function definition collided with an existing one.
    #[error("function alias already exists: {0}")]
    FunctionAliasAlreadyExists(String),

    /// A `CREATE CONSTANT` collided with an existing one.
    #[error("constant already exists: {0}")]
    ConstantAlreadyExists(String),

    /// A referenced catalog/database could not be resolved.
    #[error("database not found: {0}")]
    DatabaseNotFound(String),

    /// A statement used both `?N` and `?` placeholders.
    #[error("cannot mix indexed and unindexed parameters")]
    CannotMixIndexedAndUnindexedParams,

    /// `cancel()` was observed at a checkpoint.
    #[error("statement cancelled")]
    StatementCancelled,

    /// A concurrent-update conflict; retryable for DML.
    #[error("concurrent update conflict")]
    ConcurrentUpdate,

    /// A targeted row vanished from the primary index before it could be
    /// read; retryable for DML.
    #[error("row not found in primary index")]
    RowNotFoundInPrimaryIndex,

    /// A targeted row vanished before it could be deleted; retryable for
    /// DML.
    #[error("row not found when deleting")]
    RowNotFoundWhenDeleting,

    /// The retry budget (the session's lock timeout) was exhausted.
    #[error("lock timeout")]
    LockTimeout,

    /// A true deadlock was detected; forces a full rollback rather than a
    /// savepoint rollback.
    #[error("deadlock detected")]
    Deadlock,

    /// The engine ran out of memory; fatal, forces immediate shutdown.
    #[error("out of memory")]
    OutOfMemory,

    /// The underlying connection was broken mid-operation.
    #[error("connection broken")]
    ConnectionBroken,

    /// `execute_update` was called on a query, or a query-only method was
    /// called on a non-query statement.
    #[error("method not allowed for a query statement")]
    MethodNotAllowedForQuery,

    /// `execute_query` was called on a non-query statement.
    #[error("method only allowed for a query statement")]
    MethodOnlyAllowedForQuery,

    /// A recognized but intentionally unsupported construct (e.g. `FULL
    /// OUTER JOIN`).
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// SQL text and byte offset decoration, attached to any of the above
    /// via [`EngineError::with_sql`] (mirrors the original `addSQL`).
    #[error("{source}\n-- in SQL: {sql}")]
    WithSql {
        /// The decorated error.
        #[source]
        source: Box<EngineError>,
        /// The statement text being executed when the error occurred.
        sql: String,
    },
}

impl EngineError {
    /// Attaches the SQL text that was executing when this error occurred,
    /// mirroring the original engine's `addSQL` decoration. Idempotent:
    /// decorating an already-decorated error replaces the attached text
    /// rather than nesting.
    #[must_use]
    pub fn with_sql(self, sql: impl Into<String>) -> Self {
        match self {
            Self::WithSql { source, .. } => Self::WithSql {
                source,
                sql: sql.into(),
            },
            other => Self::WithSql {
                source: Box::new(other),
                sql: sql.into(),
            },
        }
    }

    /// The byte offset of the failing token, if this error (or the error
    /// it decorates) carries one.
    #[must_use]
    pub fn position(&self) -> Option<u32> {
        match self {
            Self::Syntax(e) => Some(e.span.start),
            Self::WithSql { source, .. } => source.position(),
            _ => None,
        }
    }

    /// True for statements whose re-execution after this error is safe:
    /// `ConcurrentUpdate`, `RowNotFoundInPrimaryIndex`,
    /// `RowNotFoundWhenDeleting`. The caller must additionally check that
    /// the statement itself is retryable (DDL never is) before looping.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConcurrentUpdate | Self::RowNotFoundInPrimaryIndex | Self::RowNotFoundWhenDeleting
        )
    }

    /// True for the one error kind that must escape the retry loop,
    /// trigger an immediate database shutdown, and always be rethrown.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfMemory)
    }

    /// Builds a `CannotMixIndexedAndUnindexedParams` error from a parser
    /// error, recognizing the tokenizer's mixed-placeholder message.
    /// Mirrors how the tokenizer surfaces this specific case as a plain
    /// syntax error internally (see `lexer::tokenizer::scan_param`) while
    /// the runtime layer needs the stable, matchable variant.
    #[must_use]
    pub fn from_parse_error(err: ParseError) -> Self {
        if err.message.contains("mix indexed") {
            Self::CannotMixIndexedAndUnindexedParams
        } else {
            Self::Syntax(err)
        }
    }
}

impl From<ParseError> for EngineError {
    fn from(err: ParseError) -> Self {
        Self::from_parse_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    #[test]
    fn test_with_sql_is_idempotent() {
        let err = EngineError::Deadlock.with_sql("SELECT 1").with_sql("SELECT 2");
        match err {
            EngineError::WithSql { sql, .. } => assert_eq!(sql, "SELECT 2"),
            _ => panic!("expected WithSql"),
        }
    }

    #[test]
    fn test_retryable_classification() {
        assert!(EngineError::ConcurrentUpdate.is_retryable());
        assert!(EngineError::RowNotFoundInPrimaryIndex.is_retryable());
        assert!(!EngineError::Deadlock.is_retryable());
        assert!(!EngineError::LockTimeout.is_retryable());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(EngineError::OutOfMemory.is_fatal());
        assert!(!EngineError::ConnectionBroken.is_fatal());
    }

    #[test]
    fn test_position_from_syntax_error() {
        let parse_err = ParseError::new("bad token", Span::new(5, 9));
        let err = EngineError::Syntax(parse_err);
        assert_eq!(err.position(), Some(5));
    }

    #[test]
    fn test_mixed_parameter_message_maps_to_dedicated_variant() {
        let parse_err = ParseError::new(
            "cannot mix indexed (?N) and unindexed (?) parameter placeholders",
            Span::new(0, 1),
        );
        assert!(matches!(
            EngineError::from(parse_err),
            EngineError::CannotMixIndexedAndUnindexedParams
        ));
    }
}
