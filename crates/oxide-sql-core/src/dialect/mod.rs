//! Dialect configuration.
//!
//! The parser and lexer are generalized over a flat configuration record
//! rather than a dialect trait hierarchy: every engine embedding this crate
//! picks its own combination of identifier case folding, non-standard
//! keyword sets, and literal policy without needing to implement a new
//! type. This mirrors how the engine treats dialects as data, not code.

/// How unquoted identifiers are case-folded before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierCase {
    /// Fold to uppercase (the default; matches the bundled engine's catalog).
    #[default]
    Upper,
    /// Fold to lowercase.
    Lower,
    /// Preserve exactly as written.
    Preserve,
}

/// Which compatibility grammar extensions are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompatibilityMode {
    /// No vendor-specific extensions; strict ANSI-adjacent grammar.
    #[default]
    Regular,
    /// Accept `#` line comments and `DATE '...'`-free literal dates.
    MySql,
    /// Accept `::` type-cast shorthand and dollar-quoted strings.
    PostgreSql,
    /// Accept `TOP n` and bracketed identifiers.
    MsSqlServer,
    /// Accept Oracle `(+)` outer join shorthand and `ROWNUM`.
    Oracle,
}

/// Whether unparameterized literals are accepted in a statement's text.
///
/// Hosts that require all values to travel through bind parameters (to
/// keep plan caches small and avoid literal-driven injection) set this to
/// `Forbidden` and the parser raises `LiteralsNotAllowed` for any bare
/// literal appearing outside of DDL contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralsPolicy {
    /// Literals are accepted anywhere an expression is accepted.
    #[default]
    Allowed,
    /// Literals are rejected outside of DDL/administrative statements.
    Forbidden,
}

/// Flat, data-driven dialect configuration.
///
/// Every flag defaults to the bundled engine's own behavior, so
/// `DialectFlags::default()` reproduces the historical single built-in
/// dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectFlags {
    /// Case folding applied to unquoted identifiers.
    pub identifier_case: IdentifierCase,
    /// Additional words accepted as non-reserved (usable as identifiers
    /// even though the grammar also recognizes them as keywords).
    pub non_keywords: Vec<String>,
    /// Which vendor compatibility grammar is active.
    pub compatibility_mode: CompatibilityMode,
    /// Whether bare literals are accepted in query text.
    pub literals_policy: LiteralsPolicy,
    /// Maximum identifier length in bytes before `NameTooLong` is raised.
    pub max_identifier_length: usize,
}

impl Default for DialectFlags {
    fn default() -> Self {
        Self {
            identifier_case: IdentifierCase::Upper,
            non_keywords: Vec::new(),
            compatibility_mode: CompatibilityMode::Regular,
            literals_policy: LiteralsPolicy::Allowed,
            max_identifier_length: 128,
        }
    }
}

impl DialectFlags {
    /// Creates a new flag set using all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `word` has been configured as usable as a plain
    /// identifier despite also being a grammar keyword.
    #[must_use]
    pub fn is_non_keyword(&self, word: &str) -> bool {
        self.non_keywords.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    /// Returns true if bare (non-parameterized) literals are rejected.
    #[must_use]
    pub const fn forbids_literals(&self) -> bool {
        matches!(self.literals_policy, LiteralsPolicy::Forbidden)
    }

    /// Applies this dialect's identifier case-folding rule to `name`.
    #[must_use]
    pub fn fold_identifier(&self, name: &str) -> String {
        match self.identifier_case {
            IdentifierCase::Upper => name.to_ascii_uppercase(),
            IdentifierCase::Lower => name.to_ascii_lowercase(),
            IdentifierCase::Preserve => name.to_string(),
        }
    }
}
