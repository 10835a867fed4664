//! oxide-sql CLI
//!
//! Command-line exerciser for the `oxide-sql-core` statement pipeline:
//! parses SQL text, reports its statement-kind classification, and
//! prints the re-rendered ("plan") SQL the parser produced.

use std::io::{self, Read};

use clap::{Parser as ClapParser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_sql_core::parser::Parser;
use oxide_sql_core::runtime::CommandList;

/// Parse and inspect SQL statements without executing them.
#[derive(ClapParser)]
#[command(name = "oxide-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single statement and print its statement-kind and plan SQL.
    Parse {
        /// SQL text. Reads from stdin when omitted.
        sql: Option<String>,
    },

    /// Split a `;`-separated batch and report each statement's kind.
    Batch {
        /// SQL text. Reads from stdin when omitted.
        sql: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Parse { sql } => {
            let sql = sql.map_or_else(read_stdin, Ok)?;
            let statement = Parser::new(&sql).parse_statement()?;
            let kind = oxide_sql_core::StatementKind::of(&statement);
            println!("kind: {kind:?} ({})", kind as i32);
            println!("is_query: {}", kind.is_query());
            println!("is_retryable: {}", kind.is_retryable());
            println!("is_ddl: {}", kind.is_ddl());
            println!("plan: {statement}");
        }

        Commands::Batch { sql } => {
            let sql = sql.map_or_else(read_stdin, Ok)?;
            let list = CommandList::parse(&sql, 0)?;
            info!(statement_count = list.len(), "parsed batch");
            println!("head: {}", list.head().statement);
            for (i, stmt) in list.tail().iter().enumerate() {
                println!("tail[{i}]: {}", stmt.statement);
            }
        }
    }

    Ok(())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
