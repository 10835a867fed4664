mod common;

use common::fake_session::FakeSession;
use oxide_sql_core::runtime::{CommandList, StatementOutcome};

#[test]
fn multi_statement_list_runs_head_then_tail_in_order() {
    let session = FakeSession::new();
    let list = CommandList::parse(
        "INSERT INTO t VALUES (1); INSERT INTO t VALUES (2); INSERT INTO t VALUES (3)",
        0,
    )
    .unwrap();
    assert_eq!(list.len(), 3);
    let outcome = list.run(&session).unwrap();
    match outcome.head {
        StatementOutcome::Update(result) => assert_eq!(result.count, 1),
        StatementOutcome::Query(_) => panic!("expected an update outcome"),
    }
    assert_eq!(outcome.tail_count(), 2);
    assert_eq!(session.row_count(), 3);
}

/// End-to-end scenario 5: a batch that creates a table, inserts one row,
/// then ends in a `SELECT` — the last statement must run as a query
/// rather than hit the update-only dispatch path.
#[test]
fn batch_ending_in_a_query_runs_every_statement_in_order() {
    let session = FakeSession::new();
    let list = CommandList::parse(
        "CREATE TABLE t (id INT); INSERT INTO t VALUES (1); SELECT count(*) FROM t",
        0,
    )
    .unwrap();
    assert_eq!(list.len(), 3);
    let outcome = list.run(&session).unwrap();
    assert_eq!(outcome.tail_count(), 2);
    match outcome.head {
        StatementOutcome::Update(result) => assert_eq!(result.count, 1),
        StatementOutcome::Query(_) => panic!("head is CREATE TABLE, not a query"),
    }
    match outcome.last() {
        StatementOutcome::Query(row_count) => assert_eq!(*row_count, 1),
        StatementOutcome::Update(_) => panic!("last statement is a SELECT, not an update"),
    }
    assert_eq!(session.row_count(), 1);
}

#[test]
fn single_statement_list_has_empty_tail() {
    let session = FakeSession::new();
    let list = CommandList::parse("INSERT INTO t VALUES (1)", 0).unwrap();
    assert!(list.tail().is_empty());
    let outcome = list.run(&session).unwrap();
    assert_eq!(outcome.tail_count(), 0);
}

#[test]
fn semicolon_inside_a_string_literal_does_not_split_the_statement() {
    let list = CommandList::parse("INSERT INTO t VALUES ('a;b')", 0).unwrap();
    assert_eq!(list.len(), 1);
}

#[test]
fn a_failing_statement_aborts_the_remainder() {
    let session = FakeSession::new();
    let list = CommandList::parse(
        "INSERT INTO t VALUES (1); SELECT * FROM a FULL OUTER JOIN b ON a.id = b.id",
        0,
    );
    assert!(list.is_err());
}

#[test]
fn empty_batch_text_parses_to_a_no_op_list() {
    let list = CommandList::parse("   ", 0).unwrap();
    assert!(list.is_empty());
    assert_eq!(list.len(), 1);
}
