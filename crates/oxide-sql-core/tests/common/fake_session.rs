#![allow(dead_code)]

//! An in-memory fake [`Session`] used to exercise the command runtime's
//! laws end to end without a real storage engine. Holds a single table
//! worth of "rows" as `Vec<Literal>` and answers `INSERT`/`SELECT`
//! against it; everything else (joins, filtering, etc.) is out of
//! scope here since the fake's only job is to drive `Command`'s
//! locking/retry/commit protocol.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use oxide_sql_core::ast::Literal;
use oxide_sql_core::runtime::{
    CastContext, EngineError, ExclusiveMode, ExecutionOutcome, ExecutionRequest, Prepared, Result,
    SavepointId, Session, SessionLockGuard, UpdateCountWithKeys,
};
use oxide_sql_core::taxonomy::StatementKind;

struct NullCast;
impl CastContext for NullCast {
    fn decode_string(&self, raw: &str) -> String {
        raw.to_string()
    }
}

#[derive(Debug)]
pub struct VecRows {
    rows: Vec<Vec<Literal>>,
    pos: usize,
    cancelled: Arc<AtomicBool>,
}

impl oxide_sql_core::runtime::ResultRows for VecRows {
    fn advance(&mut self) -> Result<bool> {
        if self.cancelled.load(Ordering::SeqCst) {
            return Err(EngineError::StatementCancelled);
        }
        if self.pos >= self.rows.len() {
            return Ok(false);
        }
        self.pos += 1;
        Ok(true)
    }

    fn close(&mut self) {
        self.pos = self.rows.len();
    }
}

/// An in-memory fake session. `conflicts_remaining` counts down on each
/// `execute` call for an update statement, returning
/// `ConcurrentUpdate` until it reaches zero, to exercise the retry loop.
pub struct FakeSession {
    cast: NullCast,
    rows: RefCell<Vec<Vec<Literal>>>,
    conflicts_remaining: RefCell<u32>,
    epoch: AtomicU64,
    pub commits: RefCell<u32>,
    pub rollbacks: RefCell<u32>,
    pub savepoints_created: RefCell<u32>,
    pub savepoints_released: RefCell<u32>,
    pub savepoint_rollbacks: RefCell<u32>,
    pub shutdowns: RefCell<u32>,
}

impl FakeSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cast: NullCast,
            rows: RefCell::new(Vec::new()),
            conflicts_remaining: RefCell::new(0),
            epoch: AtomicU64::new(0),
            commits: RefCell::new(0),
            rollbacks: RefCell::new(0),
            savepoints_created: RefCell::new(0),
            savepoints_released: RefCell::new(0),
            savepoint_rollbacks: RefCell::new(0),
            shutdowns: RefCell::new(0),
        }
    }

    #[must_use]
    pub fn with_conflicts(conflicts: u32) -> Self {
        let session = Self::new();
        *session.conflicts_remaining.borrow_mut() = conflicts;
        session
    }

    pub fn bump_catalog_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.borrow().len()
    }
}

impl Default for FakeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for FakeSession {
    fn current_schema(&self) -> String {
        "public".to_string()
    }

    fn search_path(&self) -> Vec<String> {
        vec!["public".to_string()]
    }

    fn user(&self) -> String {
        "fake".to_string()
    }

    fn auto_commit(&self) -> bool {
        true
    }

    fn set_auto_commit(&self, _value: bool) {}

    fn lock_timeout(&self) -> Duration {
        Duration::from_millis(200)
    }

    fn exclusive_mode(&self) -> ExclusiveMode {
        ExclusiveMode::None
    }

    fn wait_for_exclusive(&self) {}

    fn acquire_lock(&self) -> SessionLockGuard<'_> {
        SessionLockGuard::new(|| {})
    }

    fn create_savepoint(&self) -> Result<SavepointId> {
        let mut n = self.savepoints_created.borrow_mut();
        *n += 1;
        Ok(SavepointId(u64::from(*n)))
    }

    fn rollback_to_savepoint(&self, _id: SavepointId) -> Result<()> {
        *self.savepoint_rollbacks.borrow_mut() += 1;
        Ok(())
    }

    fn release_savepoint(&self, _id: SavepointId) -> Result<()> {
        *self.savepoints_released.borrow_mut() += 1;
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        *self.rollbacks.borrow_mut() += 1;
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        *self.commits.borrow_mut() += 1;
        Ok(())
    }

    fn catalog_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn literals_policy(&self) -> oxide_sql_core::dialect::LiteralsPolicy {
        oxide_sql_core::dialect::LiteralsPolicy::Allowed
    }

    fn non_keyword_overrides(&self) -> Vec<String> {
        vec![]
    }

    fn variable_binary(&self) -> bool {
        false
    }

    fn cast_context(&self) -> &dyn CastContext {
        &self.cast
    }

    fn slow_query_threshold(&self) -> Duration {
        Duration::from_secs(60)
    }

    fn tracing_enabled(&self) -> bool {
        true
    }

    fn shutdown_immediately(&self) {
        *self.shutdowns.borrow_mut() += 1;
    }

    fn execute(
        &self,
        prepared: &Prepared,
        params: &[Literal],
        request: ExecutionRequest,
        cancelled: Arc<AtomicBool>,
    ) -> Result<ExecutionOutcome> {
        if prepared.kind == StatementKind::Insert {
            let mut remaining = self.conflicts_remaining.borrow_mut();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(EngineError::ConcurrentUpdate);
            }
        }

        match request {
            ExecutionRequest::Query { .. } => {
                let rows = self.rows.borrow().clone();
                Ok(ExecutionOutcome::Query(Box::new(VecRows {
                    rows,
                    pos: 0,
                    cancelled,
                })))
            }
            ExecutionRequest::Update { generated_keys: _ } => {
                if prepared.kind == StatementKind::Insert {
                    self.rows.borrow_mut().push(params.to_vec());
                }
                Ok(ExecutionOutcome::Update(UpdateCountWithKeys {
                    count: 1,
                    generated_keys: None,
                }))
            }
        }
    }
}
