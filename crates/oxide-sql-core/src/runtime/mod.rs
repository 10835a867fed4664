//! The command runtime: turns a parsed [`crate::ast::Statement`] into a
//! [`prepared::Prepared`] statement, wraps it in a [`command::Command`]
//! that drives one execution attempt against a [`session::Session`], and
//! dispatches semicolon-separated batches via [`batch::CommandList`].
//!
//! The catalog, execution engine, and session internals are external
//! collaborators (see [`session::Session`]); this module owns only the
//! statement-processing side of the pipeline: parameter binding,
//! statement-kind classification, the prepared-statement lifecycle, and
//! the locking/retry/commit protocol around one execution attempt.

pub mod batch;
pub mod command;
pub mod error;
pub mod lifecycle;
mod param_scan;
pub mod prepared;
pub mod session;
mod unsupported;

pub use batch::{BatchOutcome, CommandList, StatementOutcome};
pub use command::Command;
pub use error::{EngineError, Result};
pub use lifecycle::{Lifecycle, State};
pub use param_scan::collect as collect_parameter_positions;
pub use prepared::{Parameter, ParameterList, ParameterMode, Prepared};
pub use session::{
    BatchResult, CastContext, ExclusiveMode, ExecutionOutcome, ExecutionRequest,
    GeneratedKeysRequest, ResultRows, SavepointId, Session, SessionLockGuard, UpdateCountWithKeys,
};

use crate::parser::Parser;

/// Parses `sql` as a single statement and compiles it into a
/// [`Prepared`], collecting its parameter positions and deriving its
/// statement-kind code in one step.
///
/// # Errors
///
/// Returns a syntax error for malformed SQL, or
/// [`EngineError::CannotMixIndexedAndUnindexedParams`] if the statement
/// mixes `?` and `?N` placeholders.
pub fn prepare_statement(sql: &str, catalog_epoch: u64) -> Result<Prepared> {
    let statement = Parser::new(sql).parse_statement()?;
    unsupported::check(&statement)?;
    let positions = param_scan::collect(&statement);
    let indexed = has_indexed_placeholder(sql);
    let parameters = ParameterList::from_positions(positions, indexed)?;
    Ok(Prepared::new(statement, parameters, catalog_epoch))
}

fn has_indexed_placeholder(sql: &str) -> bool {
    let bytes = sql.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'?' {
            return bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
        }
    }
    false
}
