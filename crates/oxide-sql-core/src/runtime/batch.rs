//! `CommandList`: dispatch for a semicolon-separated batch of statements
//! submitted as a single unit (e.g. a driver's "execute script" call or
//! a multi-statement stored block).
//!
//! The batch splits into a head (the first statement) and a remainder
//! (every subsequent statement), each prepared up front and run in
//! order. Every statement is dispatched by shape: a query is executed
//! and drained for its row count, everything else runs as an update.
//! `BatchOutcome` reports every statement's result so a caller can read
//! off the head's, the last statement's, or any statement in between.

use crate::ast::Literal;
use crate::parser::Parser;

use super::command::Command;
use super::error::Result;
use super::prepared::{ParameterList, Prepared};
use super::session::{GeneratedKeysRequest, ResultRows, Session, UpdateCountWithKeys};

/// What running one list member produced: an update count for DML/DDL,
/// or a drained row count for a query (queries in a batch are run for
/// effect, so their rows are fully consumed here rather than handed
/// back as a lazy stream the caller would need a live `Command` to
/// finish).
#[derive(Debug)]
pub enum StatementOutcome {
    /// An update count plus optional generated keys.
    Update(UpdateCountWithKeys),
    /// A query's row count, after fully draining its result stream.
    Query(usize),
}

/// The outcome of running one [`CommandList`]: the head statement's
/// result, plus the result of every remainder statement, in order.
#[derive(Debug)]
pub struct BatchOutcome {
    /// The first statement's result.
    pub head: StatementOutcome,
    /// Each remainder statement's result, in execution order.
    pub tail: Vec<StatementOutcome>,
}

impl BatchOutcome {
    /// Number of remainder statements executed.
    #[must_use]
    pub fn tail_count(&self) -> usize {
        self.tail.len()
    }

    /// The last statement's result in the list (the tail's last entry,
    /// or the head if the list has no tail).
    #[must_use]
    pub fn last(&self) -> &StatementOutcome {
        self.tail.last().unwrap_or(&self.head)
    }
}

/// Runs `cmd` to completion, dispatching on whether its wrapped
/// statement is a query or an update, draining a query's rows here
/// (the list runs every statement purely for its side effect or count,
/// never handing a lazy result back to the caller) and always calling
/// `stop()` once finished.
fn run_one(cmd: &mut Command<'_>) -> Result<StatementOutcome> {
    if cmd.prepared().is_query() {
        let mut rows = cmd.execute_query(&[], 0, 0, false)?;
        let mut count = 0usize;
        while rows.advance()? {
            count += 1;
        }
        rows.close();
        cmd.finish_lazy();
        cmd.stop()?;
        Ok(StatementOutcome::Query(count))
    } else {
        let result = cmd.execute_update(&[], GeneratedKeysRequest::None)?;
        cmd.stop()?;
        Ok(StatementOutcome::Update(result))
    }
}

/// A parsed, ready-to-run batch of statements separated by `;` in the
/// original source text.
pub struct CommandList {
    head: Prepared,
    tail: Vec<Prepared>,
}

impl CommandList {
    /// Splits `sql` on statement boundaries and prepares each one
    /// against `catalog_epoch`. Empty statements between consecutive
    /// `;` (or a trailing `;`) are dropped rather than producing
    /// `NoOperation` entries in the list.
    ///
    /// # Errors
    ///
    /// Returns the first statement's parse error, or `NoOperation` if
    /// the whole batch was empty.
    pub fn parse(sql: &str, catalog_epoch: u64) -> Result<Self> {
        let mut prepared = Vec::new();
        for part in split_statements(sql) {
            if part.trim().is_empty() {
                continue;
            }
            let stmt = Parser::new(part).parse_statement()?;
            super::unsupported::check(&stmt)?;
            let positions = super::param_scan::collect(&stmt);
            let indexed = positions_are_indexed(part);
            let parameters = ParameterList::from_positions(positions, indexed)?;
            prepared.push(Prepared::new(stmt, parameters, catalog_epoch));
        }
        let mut iter = prepared.into_iter();
        let head = iter
            .next()
            .unwrap_or_else(|| Prepared::new(crate::ast::Statement::NoOperation, ParameterList::empty(), catalog_epoch));
        Ok(Self {
            head,
            tail: iter.collect(),
        })
    }

    /// Number of statements in the list, including the head.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// True only for an empty source (a batch that parsed to no
    /// statements at all, i.e. the head is `NoOperation` and there is no
    /// tail).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tail.is_empty() && matches!(self.head.statement, crate::ast::Statement::NoOperation)
    }

    /// The head statement, the one whose result the caller receives.
    #[must_use]
    pub const fn head(&self) -> &Prepared {
        &self.head
    }

    /// The remainder statements, executed for effect only.
    #[must_use]
    pub fn tail(&self) -> &[Prepared] {
        &self.tail
    }

    /// Runs every statement in the list against `session`, in order:
    /// the head first, then each tail statement. Each statement gets its
    /// own [`Command`], prepared, executed, and stopped in turn; a
    /// failure anywhere aborts the remainder and returns that error,
    /// leaving prior statements' effects exactly as the session's own
    /// commit/rollback behavior dictates (this type does not wrap the
    /// whole list in an additional transaction of its own).
    ///
    /// # Errors
    ///
    /// Returns the first error any statement in the list raises.
    pub fn run(&self, session: &dyn Session) -> Result<BatchOutcome> {
        let head_result = {
            let mut cmd = Command::new(session, self.head.clone());
            cmd.prepare();
            run_one(&mut cmd)?
        };

        let mut tail_results = Vec::with_capacity(self.tail.len());
        for stmt in &self.tail {
            let mut cmd = Command::new(session, stmt.clone());
            cmd.prepare();
            tail_results.push(run_one(&mut cmd)?);
        }

        Ok(BatchOutcome {
            head: head_result,
            tail: tail_results,
        })
    }
}

/// Splits `sql` on top-level `;` boundaries, respecting string/blob
/// literal quoting so a `;` inside `'...'` or `X'...'` does not split
/// the statement.
fn split_statements(sql: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut quote_char = '\0';
    for (i, c) in sql.char_indices() {
        if in_string {
            if c == quote_char {
                in_string = false;
            }
        } else if c == '\'' || c == '"' {
            in_string = true;
            quote_char = c;
        } else if c == ';' {
            parts.push(&sql[start..i]);
            start = i + c.len_utf8();
        }
    }
    if start < sql.len() {
        parts.push(&sql[start..]);
    }
    parts
}

/// Whether a statement text's placeholders are indexed (`?N`) rather
/// than positional (`?`); a cheap textual check since the tokenizer
/// already rejects any statement mixing the two.
fn positions_are_indexed(sql: &str) -> bool {
    let bytes = sql.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'?' {
            return bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
        }
    }
    false
}
