//! The `Session` contract: the external collaborator that couples the
//! command runtime to transaction state, locking, the catalog, and the
//! execution engine.
//!
//! None of these are implemented here: the catalog, execution engine,
//! session internals, and result stream are external collaborators
//! referenced only through the contracts below. Embedders implement
//! [`Session`] and [`ResultRows`] against their own storage engine;
//! this crate ships a fake implementation (`tests/common/fake_session.rs`)
//! purely to exercise the runtime laws.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::ast::Literal;
use crate::dialect::LiteralsPolicy;

use super::error::Result;
use super::prepared::Prepared;

/// A snapshot identifier for a savepoint created by
/// [`Session::create_savepoint`]; opaque to the command runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SavepointId(pub u64);

/// Whether the session currently holds, or is waiting for, exclusive
/// (single-writer) access to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExclusiveMode {
    /// No exclusive-mode contention.
    #[default]
    None,
    /// This session holds exclusive mode.
    Held,
    /// Another session holds exclusive mode; callers must wait.
    HeldByOther,
}

/// A tagged union describing which generated keys, if any, a caller wants
/// back from an update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GeneratedKeysRequest {
    /// No generated keys are requested (the default).
    #[default]
    None,
    /// Return whichever columns the target table designates as
    /// auto-generated.
    Auto,
    /// Return the columns at these zero-based indices.
    ByIndex(Vec<u32>),
    /// Return the columns with these names.
    ByName(Vec<String>),
}

/// The result of a single `execute_update`: the affected-row count plus
/// any requested generated keys.
#[derive(Debug)]
pub struct UpdateCountWithKeys {
    /// Number of rows affected.
    pub count: u64,
    /// Generated keys, if requested and available.
    pub generated_keys: Option<Box<dyn ResultRows>>,
}

/// The result of `execute_batch_update`: one count per input parameter
/// row, plus any requested generated keys across the whole batch.
#[derive(Debug)]
pub struct BatchResult {
    /// Per-row affected-row counts, in input order.
    pub counts: Vec<u64>,
    /// Generated keys across the batch, if requested and available.
    pub generated_keys: Option<Box<dyn ResultRows>>,
}

/// A lazily-produced row stream, owned by the execution engine.
///
/// The command runtime never inspects row contents (result formatting is
/// a non-goal); it only drives iteration and observes cancellation so
/// that `Command::stop()` can be deferred correctly for lazy query
/// results (see "Lazy result" in the glossary).
pub trait ResultRows: std::fmt::Debug {
    /// Advances to the next row. Returns `Ok(false)` once exhausted.
    /// Implementations are expected to check the cooperative cancel flag
    /// at row-scan boundaries (every 128 rows) and return
    /// `Err(EngineError::StatementCancelled)` when it is set.
    fn advance(&mut self) -> Result<bool>;

    /// Releases any resources held by this stream. Called once the
    /// consumer is done iterating (or abandons iteration), which is the
    /// point at which a lazy query's `Command` is finally stopped.
    fn close(&mut self);
}

/// Materializes a deferred-decode string literal given a cast context.
///
/// The tokenizer defers unicode decoding of string literals until a cast
/// context is available (see `Token::needs_unicode_decode`); this trait
/// is that context, owned by the session.
pub trait CastContext {
    /// Decodes `raw` into its final string value.
    fn decode_string(&self, raw: &str) -> String;
}

/// A scoped guard representing the session's execution lock.
///
/// Acquired by `Command::execute_query`/`execute_update` for the
/// duration of one retry-loop attempt and released on every exit path
/// (including panics) via `Drop`, so a lock is never held past the end
/// of the attempt that acquired it.
pub struct SessionLockGuard<'s> {
    release: Box<dyn FnMut() + 's>,
}

impl<'s> SessionLockGuard<'s> {
    /// Wraps a release callback in a guard that invokes it exactly once,
    /// on drop.
    #[must_use]
    pub fn new(release: impl FnMut() + 's) -> Self {
        Self {
            release: Box::new(release),
        }
    }
}

impl Drop for SessionLockGuard<'_> {
    fn drop(&mut self) {
        (self.release)();
    }
}

/// The external collaborator a `Command` executes against: transaction
/// state, the savepoint stack, locking, the catalog epoch, and (as the
/// facade over the execution engine) the ability to actually run a
/// prepared statement.
pub trait Session {
    /// The session's current schema name.
    fn current_schema(&self) -> String;

    /// The session's search path (schema resolution order).
    fn search_path(&self) -> Vec<String>;

    /// The authenticated user name.
    fn user(&self) -> String;

    /// Whether auto-commit is currently enabled.
    fn auto_commit(&self) -> bool;

    /// Sets the auto-commit flag (`SET AUTOCOMMIT`).
    fn set_auto_commit(&self, value: bool);

    /// The configured lock-acquisition timeout; bounds the retry loop.
    fn lock_timeout(&self) -> Duration;

    /// Current exclusive-mode state as observed by this session.
    fn exclusive_mode(&self) -> ExclusiveMode;

    /// Blocks until exclusive mode, if held by another session, is
    /// released. A no-op when `exclusive_mode()` is not `HeldByOther`.
    fn wait_for_exclusive(&self);

    /// Acquires the session's single execution lock for the scope of the
    /// returned guard.
    fn acquire_lock(&self) -> SessionLockGuard<'_>;

    /// Pushes a new savepoint, returning its identifier.
    fn create_savepoint(&self) -> Result<SavepointId>;

    /// Rolls back to (but not past) `id`, leaving the surrounding
    /// transaction open.
    fn rollback_to_savepoint(&self, id: SavepointId) -> Result<()>;

    /// Releases `id` without rolling back (on successful completion).
    fn release_savepoint(&self, id: SavepointId) -> Result<()>;

    /// Rolls back the entire current transaction (used for `Deadlock`,
    /// as opposed to a savepoint-scoped rollback).
    fn rollback(&self) -> Result<()>;

    /// Commits the current transaction.
    fn commit(&self) -> Result<()>;

    /// The catalog's current modification epoch; a `Prepared` must
    /// recompile if this has advanced since it was last prepared.
    fn catalog_epoch(&self) -> u64;

    /// Whether bare literals are accepted in statement text.
    fn literals_policy(&self) -> LiteralsPolicy;

    /// Words the session has opted out of treating as reserved keywords.
    fn non_keyword_overrides(&self) -> Vec<String>;

    /// Whether `VARCHAR`-family columns should be treated as variable
    /// binary rather than character data (affects literal coercion).
    fn variable_binary(&self) -> bool;

    /// The cast-data provider used to materialize deferred string
    /// literals.
    fn cast_context(&self) -> &dyn CastContext;

    /// The slow-query trace threshold; `Command::stop()` emits an
    /// `info!` trace when elapsed execution exceeds it.
    fn slow_query_threshold(&self) -> Duration;

    /// Whether per-statement timing/tracing is enabled at all (gates the
    /// nanosecond start-time capture).
    fn tracing_enabled(&self) -> bool;

    /// Forces an immediate database shutdown. Invoked by the command
    /// runtime's retry loop when a statement's execution fails with
    /// `EngineError::OutOfMemory`, which is always fatal and always
    /// rethrown after this call returns.
    fn shutdown_immediately(&self);

    /// Delegates actual execution to the catalog/execution engine this
    /// session fronts. This is the one point at which the command
    /// runtime crosses into the (non-goal, external) execution engine.
    fn execute(
        &self,
        prepared: &Prepared,
        params: &[Literal],
        request: ExecutionRequest,
        cancelled: Arc<AtomicBool>,
    ) -> Result<ExecutionOutcome>;
}

/// What kind of execution is being requested of the session.
#[derive(Debug, Clone)]
pub enum ExecutionRequest {
    /// `execute_query`.
    Query {
        /// Maximum rows to return (0 = unlimited).
        max_rows: u64,
        /// Driver fetch-size hint.
        fetch_size: u32,
        /// Whether the result must support backward scrolling.
        scrollable: bool,
    },
    /// `execute_update`.
    Update {
        /// Which generated keys, if any, to collect.
        generated_keys: GeneratedKeysRequest,
    },
}

/// What a single `Session::execute` call produced.
#[derive(Debug)]
pub enum ExecutionOutcome {
    /// A lazily-iterated row stream.
    Query(Box<dyn ResultRows>),
    /// An update count plus optional generated keys.
    Update(UpdateCountWithKeys),
}
