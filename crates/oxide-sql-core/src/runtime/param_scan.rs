//! Walks a parsed statement to collect the positions of its parameter
//! placeholders, in left-to-right appearance order.
//!
//! Applying [`collect`] to different AST roots is what gives parameter
//! scoping: calling it on the whole outer statement yields every
//! placeholder including ones nested inside subqueries, while calling it
//! on a subquery's own `SelectStatement` (pulled out of an
//! `Expr::Subquery`/`Expr::Exists`) yields only that subquery's own
//! placeholders. This is how `Parser base`'s "parameter-scope push/pop"
//! is realized without a mutable scope stack: each `SelectStatement` is
//! its own scannable scope.

use crate::ast::{
    CallStatement, DeleteStatement, Expr, InsertSource, InsertStatement, MergeAction,
    MergeStatement, SelectStatement, SetOperationStatement, Statement, TableRef, UpdateStatement,
    WithStatement,
};

/// Returns the appearance-order positions of every `Expr::Parameter` in
/// `stmt`, descending into nested subqueries.
#[must_use]
pub fn collect(stmt: &Statement) -> Vec<u32> {
    let mut out = Vec::new();
    scan_statement(stmt, &mut out);
    out
}

/// Returns the positions of every `Expr::Parameter` directly reachable
/// from `select` and its own `FROM`/`WHERE`/etc. clauses, without
/// descending into nested subqueries it contains (those are a separate
/// scope; scan them with a fresh `collect_select` call if needed).
#[must_use]
pub fn collect_select_own_scope(select: &SelectStatement) -> Vec<u32> {
    let mut out = Vec::new();
    scan_select(select, &mut out, false);
    out
}

fn scan_statement(stmt: &Statement, out: &mut Vec<u32>) {
    match stmt {
        Statement::Select(s) => scan_select(s, out, true),
        Statement::Insert(i) => scan_insert(i, out),
        Statement::Update(u) => scan_update(u, out),
        Statement::Delete(d) => scan_delete(d, out),
        Statement::Merge(m) => scan_merge(m, out),
        Statement::With(w) => scan_with(w, out),
        Statement::SetOperation(s) => scan_set_operation(s, out),
        Statement::Call(c) => scan_call(c, out),
        Statement::Explain { statement, .. } => scan_statement(statement, out),
        Statement::Set(s) => scan_expr(&s.value, out, true),
        Statement::Transaction(_)
        | Statement::Show(_)
        | Statement::Truncate(_)
        | Statement::Use(_)
        | Statement::CreateTable(_)
        | Statement::DropTable(_)
        | Statement::CreateIndex(_)
        | Statement::CreateView(_)
        | Statement::Checkpoint
        | Statement::Shutdown { .. }
        | Statement::NoOperation => {}
    }
}

fn scan_select(select: &SelectStatement, out: &mut Vec<u32>, descend: bool) {
    for col in &select.columns {
        scan_expr(&col.expr, out, descend);
    }
    if let Some(from) = &select.from {
        scan_table_ref(from, out, descend);
    }
    if let Some(w) = &select.where_clause {
        scan_expr(w, out, descend);
    }
    for g in &select.group_by {
        scan_expr(g, out, descend);
    }
    if let Some(h) = &select.having {
        scan_expr(h, out, descend);
    }
    for (_, window) in &select.window_defs {
        for e in &window.partition_by {
            scan_expr(e, out, descend);
        }
        for o in &window.order_by {
            scan_expr(&o.expr, out, descend);
        }
    }
    for o in &select.order_by {
        scan_expr(&o.expr, out, descend);
    }
    if let Some(l) = &select.limit {
        scan_expr(l, out, descend);
    }
    if let Some(o) = &select.offset {
        scan_expr(o, out, descend);
    }
}

fn scan_table_ref(table: &TableRef, out: &mut Vec<u32>, descend: bool) {
    match table {
        TableRef::Table { .. } => {}
        TableRef::Subquery { query, .. } => {
            if descend {
                scan_select(query, out, descend);
            }
        }
        TableRef::Join { left, join } => {
            scan_table_ref(left, out, descend);
            scan_table_ref(&join.table, out, descend);
            if let Some(on) = &join.on {
                scan_expr(on, out, descend);
            }
        }
    }
}

fn scan_insert(insert: &InsertStatement, out: &mut Vec<u32>) {
    match &insert.values {
        InsertSource::Values(rows) => {
            for row in rows {
                for e in row {
                    scan_expr(e, out, true);
                }
            }
        }
        InsertSource::Query(q) => scan_select(q, out, true),
        InsertSource::DefaultValues => {}
    }
    if let Some(oc) = &insert.on_conflict {
        if let crate::ast::ConflictAction::DoUpdate(assignments) = &oc.action {
            for a in assignments {
                scan_expr(&a.value, out, true);
            }
        }
    }
}

fn scan_update(update: &UpdateStatement, out: &mut Vec<u32>) {
    for a in &update.assignments {
        scan_expr(&a.value, out, true);
    }
    if let Some(w) = &update.where_clause {
        scan_expr(w, out, true);
    }
}

fn scan_delete(delete: &DeleteStatement, out: &mut Vec<u32>) {
    if let Some(w) = &delete.where_clause {
        scan_expr(w, out, true);
    }
}

fn scan_merge(merge: &MergeStatement, out: &mut Vec<u32>) {
    scan_table_ref(&merge.source, out, true);
    scan_expr(&merge.on, out, true);
    for clause in &merge.clauses {
        if let Some(cond) = &clause.condition {
            scan_expr(cond, out, true);
        }
        match &clause.action {
            MergeAction::Update(assignments) => {
                for a in assignments {
                    scan_expr(&a.value, out, true);
                }
            }
            MergeAction::Insert { values, .. } => {
                for v in values {
                    scan_expr(v, out, true);
                }
            }
            MergeAction::Delete => {}
        }
    }
}

fn scan_with(with: &WithStatement, out: &mut Vec<u32>) {
    for cte in &with.ctes {
        scan_select(&cte.query, out, true);
    }
    scan_statement(&with.body, out);
}

fn scan_set_operation(set_op: &SetOperationStatement, out: &mut Vec<u32>) {
    scan_statement(&set_op.left, out);
    scan_statement(&set_op.right, out);
}

fn scan_call(call: &CallStatement, out: &mut Vec<u32>) {
    for a in &call.args {
        scan_expr(a, out, true);
    }
}

fn scan_expr(expr: &Expr, out: &mut Vec<u32>, descend: bool) {
    match expr {
        // Named (`:name`) parameters are a separate binding style the
        // indexed/positional exclusivity rule does not govern; they carry
        // no appearance position (always 0) and are bound by name instead.
        Expr::Parameter {
            name: None,
            position,
        } => out.push(*position as u32),
        Expr::Parameter { name: Some(_), .. } => {}
        Expr::Literal(_) | Expr::Column { .. } | Expr::Wildcard { .. } => {}
        Expr::Binary { left, right, .. } => {
            scan_expr(left, out, descend);
            scan_expr(right, out, descend);
        }
        Expr::Unary { operand, .. } => scan_expr(operand, out, descend),
        Expr::Function(call) => {
            for a in &call.args {
                scan_expr(a, out, descend);
            }
            if let Some(crate::ast::WindowRef::Inline(spec)) = &call.over {
                for e in &spec.partition_by {
                    scan_expr(e, out, descend);
                }
                for o in &spec.order_by {
                    scan_expr(&o.expr, out, descend);
                }
            }
        }
        Expr::Subquery(q) => {
            if descend {
                scan_select(q, out, descend);
            }
        }
        Expr::IsNull { expr, .. } => scan_expr(expr, out, descend),
        Expr::In { expr, list, .. } => {
            scan_expr(expr, out, descend);
            for v in list {
                scan_expr(v, out, descend);
            }
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            scan_expr(expr, out, descend);
            scan_expr(low, out, descend);
            scan_expr(high, out, descend);
        }
        Expr::Case {
            operand,
            when_clauses,
            else_clause,
        } => {
            if let Some(o) = operand {
                scan_expr(o, out, descend);
            }
            for (when, then) in when_clauses {
                scan_expr(when, out, descend);
                scan_expr(then, out, descend);
            }
            if let Some(e) = else_clause {
                scan_expr(e, out, descend);
            }
        }
        Expr::Cast { expr, .. } => scan_expr(expr, out, descend),
        Expr::Paren(inner) => scan_expr(inner, out, descend),
        Expr::Exists { subquery, .. } => {
            if descend {
                scan_select(subquery, out, descend);
            }
        }
        Expr::ArrayLiteral(items) | Expr::RowLiteral(items) => {
            for v in items {
                scan_expr(v, out, descend);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn parse(sql: &str) -> Statement {
        Parser::new(sql).parse_statement().unwrap()
    }

    #[test]
    fn test_outer_query_sees_both_parameters() {
        let stmt = parse("SELECT ?1, (SELECT ?2 FROM dual)");
        assert_eq!(collect(&stmt), vec![1, 2]);
    }

    #[test]
    fn test_inner_query_sees_only_its_own_parameter() {
        let stmt = parse("SELECT ?1, (SELECT ?2 FROM dual)");
        let Statement::Select(outer) = &stmt else {
            panic!("expected select")
        };
        let Expr::Subquery(inner) = &outer.columns[1].expr else {
            panic!("expected subquery")
        };
        assert_eq!(collect_select_own_scope(inner), vec![2]);
    }

    #[test]
    fn test_positional_parameters_in_appearance_order() {
        let stmt = parse("SELECT ? + ?");
        assert_eq!(collect(&stmt), vec![1, 2]);
    }

    #[test]
    fn test_insert_values_parameters() {
        let stmt = parse("INSERT INTO t VALUES (?, ?)");
        assert_eq!(collect(&stmt), vec![1, 2]);
    }

    #[test]
    fn test_update_set_and_where_parameters() {
        let stmt = parse("UPDATE t SET a = ? WHERE b = ?");
        assert_eq!(collect(&stmt), vec![1, 2]);
    }
}
