//! The prepared-statement lifecycle state machine.
//!
//! `Fresh -> Prepared -> (Executing <-> Suspended) -> Closed`. A `Command`
//! owns one `Lifecycle` and consults it before every operation so that,
//! e.g., calling `execute_query` on a closed command is a programmer
//! error caught here rather than surfacing as a confusing downstream
//! failure from the session.

use super::error::{EngineError, Result};

/// The state of a prepared statement's command wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed but never prepared.
    Fresh,
    /// Prepared and idle, ready to execute.
    Prepared,
    /// Currently inside an `execute_*` call.
    Executing,
    /// A lazy query result is open but not being actively iterated.
    Suspended,
    /// `close()` has been called; only `reuse()` can revive it.
    Closed,
}

/// Tracks a `Command`'s lifecycle state and enforces valid transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    state: State,
}

impl Lifecycle {
    /// Starts a new lifecycle in the `Fresh` state.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: State::Fresh }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// `Fresh -> Prepared` or `Closed -> Prepared`. Idempotent: calling
    /// `prepare()` again while already `Prepared` is a no-op.
    pub fn mark_prepared(&mut self) {
        self.state = State::Prepared;
    }

    /// `Prepared -> Executing`, or `Suspended -> Executing` when resuming
    /// iteration of a lazy query result.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MethodNotAllowedForQuery`]-shaped guidance
    /// via a dedicated message when called from `Fresh` or `Closed`.
    pub fn begin_execute(&mut self) -> Result<()> {
        match self.state {
            State::Prepared | State::Suspended => {
                self.state = State::Executing;
                Ok(())
            }
            State::Fresh => Err(EngineError::InvalidValue(
                "statement must be prepared before it can execute".to_string(),
            )),
            State::Executing => Err(EngineError::InvalidValue(
                "statement is already executing".to_string(),
            )),
            State::Closed => Err(EngineError::InvalidValue(
                "statement is closed".to_string(),
            )),
        }
    }

    /// `Executing -> Prepared`, once `stop()` has committed or rolled
    /// back the attempt and no lazy result remains open.
    pub fn finish_execute(&mut self) {
        self.state = State::Prepared;
    }

    /// `Executing -> Suspended`, when a lazy query result is handed back
    /// to the caller without having been fully drained.
    pub fn suspend(&mut self) {
        self.state = State::Suspended;
    }

    /// Any state `-> Closed`. Idempotent.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    /// `Closed -> Fresh`, clearing parameter bindings is the caller's
    /// responsibility (`ParameterList::clear`); this only resets the
    /// state machine so the command can be re-prepared.
    ///
    /// # Errors
    ///
    /// Returns an error if called while not `Closed`, since reusing a
    /// command that is still open would abandon in-flight state.
    pub fn reuse(&mut self) -> Result<()> {
        if self.state != State::Closed {
            return Err(EngineError::InvalidValue(
                "cannot reuse a command that has not been closed".to_string(),
            ));
        }
        self.state = State::Fresh;
        Ok(())
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
