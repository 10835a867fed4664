//! The `Command` wrapper: drives a single [`Prepared`] statement through
//! one execution attempt against a [`Session`], including the
//! exclusive-mode wait, session lock, savepoint-bounded retry loop, and
//! commit/slow-query bookkeeping on `stop()`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::RngExt;

use crate::ast::Literal;

use super::error::{EngineError, Result};
use super::lifecycle::Lifecycle;
use super::prepared::Prepared;
use super::session::{
    BatchResult, ExecutionOutcome, ExecutionRequest, GeneratedKeysRequest, ResultRows, Session,
    UpdateCountWithKeys,
};

/// A single prepared statement bound to a session, ready to execute.
///
/// Every `execute_query`/`execute_update` call runs the full command
/// protocol: wait for exclusive mode, acquire the session's execution
/// lock, capture a savepoint (for updates only), then retry inside the
/// session's lock timeout on the narrow set of conflict errors that are
/// safe to retry. `stop()` is a separate, explicit call — matching the
/// deferred-commit behavior lazy query results need (see "Lazy result"
/// in the glossary) — that commits when required and traces slow
/// executions.
pub struct Command<'s> {
    session: &'s dyn Session,
    prepared: Prepared,
    lifecycle: Lifecycle,
    cancel_flag: Arc<AtomicBool>,
    started_at: Option<Instant>,
}

impl<'s> Command<'s> {
    /// Wraps `prepared` for execution against `session`.
    #[must_use]
    pub fn new(session: &'s dyn Session, prepared: Prepared) -> Self {
        Self {
            session,
            prepared,
            lifecycle: Lifecycle::new(),
            cancel_flag: Arc::new(AtomicBool::new(false)),
            started_at: None,
        }
    }

    /// The wrapped statement.
    #[must_use]
    pub const fn prepared(&self) -> &Prepared {
        &self.prepared
    }

    /// The lifecycle state machine's current state, for diagnostics.
    #[must_use]
    pub const fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Recompiles the wrapped statement if the catalog has advanced past
    /// the epoch it was last prepared against, then marks the lifecycle
    /// `Prepared`. Idempotent.
    pub fn prepare(&mut self) {
        let epoch = self.session.catalog_epoch();
        if self.prepared.needs_recompile(epoch) {
            self.prepared.prepare(epoch);
        }
        self.lifecycle.mark_prepared();
    }

    /// Runs a query, returning its lazily-iterated row stream. Leaves the
    /// lifecycle `Suspended` until [`Command::finish_lazy`] is called by
    /// the consumer once iteration is complete.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MethodOnlyAllowedForQuery`] if the wrapped
    /// statement is not a query, or any error the retry loop exhausts.
    pub fn execute_query(
        &mut self,
        params: &[Literal],
        max_rows: u64,
        fetch_size: u32,
        scrollable: bool,
    ) -> Result<Box<dyn ResultRows>> {
        if !self.prepared.is_query() {
            return Err(EngineError::MethodOnlyAllowedForQuery);
        }
        let request = ExecutionRequest::Query {
            max_rows,
            fetch_size,
            scrollable,
        };
        match self.run(request, params)? {
            ExecutionOutcome::Query(rows) => {
                self.lifecycle.suspend();
                Ok(rows)
            }
            ExecutionOutcome::Update(_) => Err(EngineError::MethodOnlyAllowedForQuery),
        }
    }

    /// Runs an update (`INSERT`/`UPDATE`/`DELETE`/DDL), returning its
    /// affected-row count and any requested generated keys.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MethodNotAllowedForQuery`] if the wrapped
    /// statement is a query, or any error the retry loop exhausts.
    pub fn execute_update(
        &mut self,
        params: &[Literal],
        generated_keys: GeneratedKeysRequest,
    ) -> Result<UpdateCountWithKeys> {
        if self.prepared.is_query() {
            return Err(EngineError::MethodNotAllowedForQuery);
        }
        let request = ExecutionRequest::Update { generated_keys };
        match self.run(request, params)? {
            ExecutionOutcome::Update(result) => {
                self.lifecycle.finish_execute();
                Ok(result)
            }
            ExecutionOutcome::Query(_) => Err(EngineError::MethodNotAllowedForQuery),
        }
    }

    /// Runs the same update statement once per row of `batches`, in
    /// order, stopping at the first error. Generated keys are only
    /// collected for the final row's request, matching how batched JDBC
    /// updates report a single generated-keys result set for the whole
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns the first error any row's execution raises; counts
    /// collected for prior rows in the batch are discarded, since a
    /// batch either fully succeeds or the caller re-examines the whole
    /// batch.
    pub fn execute_batch_update(
        &mut self,
        batches: &[Vec<Literal>],
        generated_keys: GeneratedKeysRequest,
    ) -> Result<BatchResult> {
        if self.prepared.is_query() {
            return Err(EngineError::MethodNotAllowedForQuery);
        }
        let mut counts = Vec::with_capacity(batches.len());
        let mut last_keys = None;
        for (i, params) in batches.iter().enumerate() {
            let is_last = i + 1 == batches.len();
            let request_keys = if is_last {
                generated_keys.clone()
            } else {
                GeneratedKeysRequest::None
            };
            let result = self.execute_update(params, request_keys)?;
            counts.push(result.count);
            if is_last {
                last_keys = result.generated_keys;
            }
        }
        Ok(BatchResult {
            counts,
            generated_keys: last_keys,
        })
    }

    /// Called by a query's consumer once its [`ResultRows`] has been
    /// fully drained or abandoned, returning the lifecycle to `Prepared`
    /// so `stop()` can run.
    pub fn finish_lazy(&mut self) {
        self.lifecycle.finish_execute();
    }

    /// Requests cooperative cancellation of the current or next
    /// execution. The session checks this flag at row-scan boundaries
    /// (every 128 rows) and returns [`EngineError::StatementCancelled`].
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Closes the command. Idempotent; a closed command can only be
    /// revived via [`Command::reuse`].
    pub fn close(&mut self) {
        self.lifecycle.close();
        self.cancel_flag.store(false, Ordering::SeqCst);
    }

    /// Clears the wrapped statement's parameter bindings and returns the
    /// lifecycle to `Fresh` so it can be prepared and executed again.
    ///
    /// # Errors
    ///
    /// Returns an error if the command has not been closed first.
    pub fn reuse(&mut self) -> Result<()> {
        self.lifecycle.reuse()?;
        self.prepared.parameters.clear();
        self.cancel_flag.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Commits the transaction if the wrapped statement is DDL or the
    /// session is in auto-commit mode, then emits a slow-query trace if
    /// the just-finished execution exceeded the session's threshold.
    ///
    /// # Errors
    ///
    /// Propagates any error the session's `commit()` raises.
    pub fn stop(&mut self) -> Result<()> {
        if self.prepared.is_ddl() || self.session.auto_commit() {
            self.session.commit()?;
        }
        if let Some(started) = self.started_at.take() {
            let elapsed = started.elapsed();
            if elapsed >= self.session.slow_query_threshold() {
                tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    sql = %self.prepared.plan_sql(false),
                    "slow query"
                );
            }
        }
        Ok(())
    }

    /// The full execution protocol: exclusive-mode wait, lock
    /// acquisition, savepoint-bounded retry loop. Retries sleep a
    /// bounded random 1-11ms interval between attempts to de-correlate
    /// competing sessions retrying the same row.
    fn run(&mut self, request: ExecutionRequest, params: &[Literal]) -> Result<ExecutionOutcome> {
        self.lifecycle.begin_execute()?;
        if self.session.tracing_enabled() {
            self.started_at = Some(Instant::now());
        }

        self.session.wait_for_exclusive();
        let _guard = self.session.acquire_lock();

        let epoch = self.session.catalog_epoch();
        if self.prepared.needs_recompile(epoch) {
            self.prepared.prepare(epoch);
        }

        if !self.prepared.parameters.is_empty() {
            for (i, value) in params.iter().enumerate() {
                self.prepared.parameters.bind(i, value.clone())?;
            }
        }

        let is_update = matches!(request, ExecutionRequest::Update { .. });
        let savepoint = if is_update && !self.prepared.is_ddl() {
            Some(self.session.create_savepoint()?)
        } else {
            None
        };

        let sql = self.prepared.plan_sql(false);
        let deadline = Instant::now() + self.session.lock_timeout();

        loop {
            let attempt = self.session.execute(
                &self.prepared,
                params,
                request.clone(),
                Arc::clone(&self.cancel_flag),
            );

            match attempt {
                Ok(outcome) => {
                    if let Some(sp) = savepoint {
                        self.session.release_savepoint(sp)?;
                    }
                    return Ok(outcome);
                }
                Err(err) if err.is_fatal() => {
                    self.session.shutdown_immediately();
                    self.lifecycle.finish_execute();
                    return Err(err.with_sql(sql));
                }
                Err(EngineError::Deadlock) => {
                    self.session.rollback()?;
                    self.lifecycle.finish_execute();
                    return Err(EngineError::Deadlock.with_sql(sql));
                }
                Err(err) if err.is_retryable() && self.prepared.is_retryable() => {
                    if let Some(sp) = savepoint {
                        self.session.rollback_to_savepoint(sp)?;
                    }
                    if Instant::now() >= deadline {
                        self.lifecycle.finish_execute();
                        return Err(EngineError::LockTimeout.with_sql(sql));
                    }
                    let jitter_ms = rand::rng().random_range(1..=11);
                    thread::sleep(Duration::from_millis(jitter_ms));
                }
                Err(err) => {
                    if let Some(sp) = savepoint {
                        self.session.rollback_to_savepoint(sp)?;
                    }
                    self.lifecycle.finish_execute();
                    return Err(err.with_sql(sql));
                }
            }
        }
    }
}
