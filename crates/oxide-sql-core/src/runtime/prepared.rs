//! `Prepared` statements: a parsed, validated, typed statement frozen
//! with its parameter slots and statement-kind code, ready for a
//! `Command` to execute it.

use crate::ast::{Literal, Statement};
use crate::taxonomy::StatementKind;

use super::error::{EngineError, Result};

/// Whether a statement's parameters are addressed by left-to-right
/// appearance order or by explicit `?N` index. A statement must pick one
/// form and use it exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterMode {
    /// `?` placeholders, bound by appearance order starting at 0.
    Positional,
    /// `?N` placeholders (`N >= 1`), bound explicitly.
    Indexed,
}

/// One parameter slot.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Zero-based slot index.
    pub index: u32,
    /// Whether a value has been bound yet.
    pub assigned: bool,
    /// The bound value, once assigned.
    pub value: Option<Literal>,
}

impl Parameter {
    /// Creates a fresh, unassigned parameter slot.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self {
            index,
            assigned: false,
            value: None,
        }
    }
}

/// The frozen parameter list of a [`Prepared`] statement.
///
/// Ordering of unindexed parameters matches left-to-right appearance in
/// the source text; mixing indexed and unindexed parameters in a single
/// statement is rejected at construction time.
#[derive(Debug, Clone)]
pub struct ParameterList {
    mode: Option<ParameterMode>,
    slots: Vec<Parameter>,
}

impl ParameterList {
    /// Builds an empty parameter list (a statement with no placeholders).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            mode: None,
            slots: Vec::new(),
        }
    }

    /// Builds a parameter list from the `Expr::Parameter` occurrences
    /// collected during parsing, in appearance order. Indexed parameters
    /// (`name.is_none()` with `position >= 1` coming from `?N`) and
    /// positional ones (from bare `?`) must not both appear.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CannotMixIndexedAndUnindexedParams`] if
    /// both forms are present.
    pub fn from_positions(positions: Vec<u32>, indexed: bool) -> Result<Self> {
        if positions.is_empty() {
            return Ok(Self::empty());
        }
        let mode = if indexed {
            ParameterMode::Indexed
        } else {
            ParameterMode::Positional
        };
        let highest = positions.iter().copied().max().unwrap_or(0);
        let count = if indexed { highest } else { positions.len() as u32 };
        let slots = (0..count).map(Parameter::new).collect();
        Ok(Self {
            mode: Some(mode),
            slots,
        })
    }

    /// Number of parameter slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when there are no parameter slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The addressing mode, if any parameters are present.
    #[must_use]
    pub const fn mode(&self) -> Option<ParameterMode> {
        self.mode
    }

    /// Binds a value into slot `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidValue`] if `index` is out of range.
    pub fn bind(&mut self, index: usize, value: Literal) -> Result<()> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| EngineError::InvalidValue(format!("parameter index {index} out of range")))?;
        slot.assigned = true;
        slot.value = Some(value);
        Ok(())
    }

    /// Clears every slot's binding, leaving it unassigned. Used when a
    /// closed `Command` is reused (`reuse()`).
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.assigned = false;
            slot.value = None;
        }
    }

    /// True if every slot has been assigned a value.
    #[must_use]
    pub fn all_assigned(&self) -> bool {
        self.slots.iter().all(|p| p.assigned)
    }

    /// The bound values in slot order, for handoff to the execution
    /// engine.
    #[must_use]
    pub fn values(&self) -> Vec<Literal> {
        self.slots
            .iter()
            .map(|p| p.value.clone().unwrap_or(Literal::Null))
            .collect()
    }

    /// The parameter slots, in order.
    #[must_use]
    pub fn slots(&self) -> &[Parameter] {
        &self.slots
    }
}

/// A parsed, validated, typed statement ready for execution, carrying
/// its own frozen parameter list and statement-kind code.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// The parsed statement payload.
    pub statement: Statement,
    /// The stable statement-kind code.
    pub kind: StatementKind,
    /// The frozen parameter list.
    pub parameters: ParameterList,
    /// The catalog modification epoch this statement was compiled
    /// against.
    pub catalog_epoch: u64,
    /// Forces a recompile on every `prepare()` regardless of catalog
    /// epoch (some DDL- and session-state-dependent statements need
    /// this).
    pub prepare_always: bool,
}

impl Prepared {
    /// Compiles `statement` into a `Prepared`, snapshotting the given
    /// catalog epoch and deriving the statement-kind code.
    #[must_use]
    pub fn new(statement: Statement, parameters: ParameterList, catalog_epoch: u64) -> Self {
        let kind = StatementKind::of(&statement);
        Self {
            statement,
            kind,
            parameters,
            catalog_epoch,
            prepare_always: false,
        }
    }

    /// True for statements that produce a result set.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        self.kind.is_query()
    }

    /// True for DML whose re-execution after a concurrency conflict is
    /// safe. DDL is never retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// True for statements that force a commit on `stop()` regardless of
    /// the session's auto-commit setting (DDL semantics).
    #[must_use]
    pub const fn is_ddl(&self) -> bool {
        self.kind.is_ddl()
    }

    /// Whether this `Prepared` must be recompiled before its next
    /// execution: the catalog has advanced past the epoch it was
    /// compiled against, or it is flagged `prepare_always`.
    #[must_use]
    pub fn needs_recompile(&self, current_catalog_epoch: u64) -> bool {
        self.prepare_always || current_catalog_epoch > self.catalog_epoch
    }

    /// Re-derives the statement-kind code and refreshes the catalog
    /// epoch snapshot. Idempotent: calling this twice in a row with an
    /// unchanged epoch leaves the `Prepared` observationally unchanged.
    pub fn prepare(&mut self, current_catalog_epoch: u64) {
        self.kind = StatementKind::of(&self.statement);
        self.catalog_epoch = current_catalog_epoch;
    }

    /// Reconstructs a normalized SQL string for this statement ("plan
    /// SQL"). When `quote_always` is set, every identifier is rendered
    /// quoted; otherwise simple unquoted identifiers retain their
    /// folding as parsed.
    #[must_use]
    pub fn plan_sql(&self, quote_always: bool) -> String {
        if quote_always {
            quote_identifiers(&self.statement.to_string())
        } else {
            self.statement.to_string()
        }
    }
}

/// Identifier requoting for `plan_sql(true)`: the AST renders identifiers
/// unquoted in their folded form, so this re-lexes the rendered SQL and
/// wraps every unquoted-identifier token in double quotes (doubling any
/// embedded quote), leaving keywords, punctuation, and literals exactly
/// as rendered. Each dotted-name segment is its own token, so
/// `schema.table.col` becomes `"schema"."table"."col"`.
fn quote_identifiers(rendered: &str) -> String {
    let tokens = crate::lexer::Lexer::new(rendered).tokenize();
    if tokens
        .iter()
        .any(|t| matches!(t.kind, crate::lexer::TokenKind::Error(_)))
    {
        return rendered.to_string();
    }

    let mut out = String::with_capacity(rendered.len() + 16);
    let mut last_end = 0usize;
    for token in &tokens {
        if token.is_eof() {
            break;
        }
        out.push_str(&rendered[last_end..token.span.start]);
        if let crate::lexer::TokenKind::Identifier(name) = &token.kind {
            out.push('"');
            out.push_str(&name.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&rendered[token.span.start..token.span.end]);
        }
        last_end = token.span.end;
    }
    out.push_str(&rendered[last_end..]);
    out
}
