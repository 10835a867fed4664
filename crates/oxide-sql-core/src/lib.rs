//! # oxide-sql-core
//!
//! A SQL front end: tokenizer, recursive-descent/Pratt parser, and a
//! command runtime that turns parsed statements into prepared,
//! parameter-bound commands ready to hand to an embedding storage
//! engine.
//!
//! This crate provides:
//! - A hand-written tokenizer and recursive-descent parser with Pratt
//!   expression parsing, covering DQL/DML/DDL and window functions
//! - A stable statement-kind taxonomy for dispatch and capability checks
//!   (`is_query`, `is_retryable`, `is_ddl`)
//! - A `Prepared`/`Command`/`CommandList` runtime implementing the
//!   locking, savepoint, and retry protocol around statement execution
//!
//! The catalog and execution engine themselves are out of scope: this
//! crate defines the [`runtime::Session`] trait as the seam an embedder
//! implements to plug its own storage engine in underneath.
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_sql_core::parser::Parser;
//!
//! let stmt = Parser::new("SELECT id, name FROM users WHERE active = ?")
//!     .parse_statement()
//!     .unwrap();
//! assert_eq!(stmt.to_string(), "SELECT id, name FROM users WHERE active = ?");
//! ```
//!
//! ## Preparing a statement
//!
//! ```rust
//! use oxide_sql_core::runtime::prepare_statement;
//!
//! let prepared = prepare_statement("SELECT * FROM users WHERE id = ?", 0).unwrap();
//! assert!(prepared.is_query());
//! assert_eq!(prepared.parameters.len(), 1);
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod taxonomy;

pub use ast::{Expr, Statement};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use runtime::{Command, CommandList, EngineError, Prepared};
pub use taxonomy::StatementKind;
