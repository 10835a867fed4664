//! SQL Parser implementation.

use super::error::ParseError;
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
};
use crate::ast::{
    BinaryOp, CallStatement, ColumnDefinition, CommonTableExpr, CreateIndexStatement,
    CreateTableStatement, CreateViewStatement, DataType, DeleteStatement, DropTableStatement,
    Expr, FunctionCall, InsertSource, InsertStatement, IsolationLevel, JoinClause, JoinType,
    Literal, MergeAction, MergeStatement, MergeWhenClause, OrderBy, OrderDirection, SelectColumn,
    SelectStatement, SetOperationStatement, SetOperator, SetStatement, ShowStatement, Statement,
    TableRef, TransactionStatement, TruncateStatement, UpdateAssignment, UpdateStatement,
    UseStatement, WithStatement,
};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// SQL Parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
    /// Parameter counter for ? placeholders.
    param_counter: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
            param_counter: 0,
        }
    }

    /// Parses a single SQL statement.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if matches!(self.current.kind, TokenKind::Eof | TokenKind::Semicolon) {
            return Ok(Statement::NoOperation);
        }

        match &self.current.kind {
            TokenKind::Keyword(Keyword::With) => self.parse_with_statement(),
            TokenKind::Keyword(Keyword::Select) => self.parse_select_or_set_op(),
            TokenKind::Keyword(Keyword::Insert) => {
                Ok(Statement::Insert(self.parse_insert_statement()?))
            }
            TokenKind::Keyword(Keyword::Update) => {
                Ok(Statement::Update(self.parse_update_statement()?))
            }
            TokenKind::Keyword(Keyword::Delete) => {
                Ok(Statement::Delete(self.parse_delete_statement()?))
            }
            TokenKind::Keyword(Keyword::Merge) => Ok(Statement::Merge(self.parse_merge_statement()?)),
            TokenKind::Keyword(Keyword::Begin) => {
                Ok(Statement::Transaction(self.parse_begin_statement()?))
            }
            TokenKind::Keyword(Keyword::Commit) => {
                self.advance();
                self.skip_transaction_noise();
                Ok(Statement::Transaction(TransactionStatement::Commit))
            }
            TokenKind::Keyword(Keyword::Rollback) => {
                self.advance();
                self.skip_transaction_noise();
                let savepoint = if self.check_keyword(Keyword::To) {
                    self.advance();
                    if self.check_keyword(Keyword::Savepoint) {
                        self.advance();
                    }
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                Ok(Statement::Transaction(TransactionStatement::Rollback {
                    savepoint,
                }))
            }
            TokenKind::Keyword(Keyword::Savepoint) => {
                self.advance();
                let name = self.expect_identifier()?;
                Ok(Statement::Transaction(TransactionStatement::Savepoint(
                    name,
                )))
            }
            TokenKind::Keyword(Keyword::Release) => {
                self.advance();
                if self.check_keyword(Keyword::Savepoint) {
                    self.advance();
                }
                let name = self.expect_identifier()?;
                Ok(Statement::Transaction(TransactionStatement::Release(name)))
            }
            TokenKind::Keyword(Keyword::Set) => Ok(Statement::Set(self.parse_set_statement()?)),
            TokenKind::Keyword(Keyword::Show) => Ok(Statement::Show(self.parse_show_statement()?)),
            TokenKind::Keyword(Keyword::Explain) => self.parse_explain_statement(),
            TokenKind::Keyword(Keyword::Call) => Ok(Statement::Call(self.parse_call_statement()?)),
            TokenKind::Keyword(Keyword::Truncate) => {
                Ok(Statement::Truncate(self.parse_truncate_statement()?))
            }
            TokenKind::Keyword(Keyword::Use) => Ok(Statement::Use(self.parse_use_statement()?)),
            TokenKind::Keyword(Keyword::Create) => self.parse_create_statement(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop_statement(),
            TokenKind::Keyword(Keyword::Checkpoint) => {
                self.advance();
                Ok(Statement::Checkpoint)
            }
            TokenKind::Keyword(Keyword::Shutdown) => {
                self.advance();
                let immediately = if self.check_keyword(Keyword::Immediately) {
                    self.advance();
                    true
                } else {
                    false
                };
                Ok(Statement::Shutdown { immediately })
            }
            _ => Err(ParseError::unexpected(
                "a SQL statement",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Consumes the optional `TRANSACTION` / `WORK` noise word following
    /// COMMIT/ROLLBACK.
    fn skip_transaction_noise(&mut self) {
        if self.check_keyword(Keyword::Transaction) || self.check_keyword(Keyword::Work) {
            self.advance();
        }
    }

    /// Parses `BEGIN [TRANSACTION|WORK] [ISOLATION LEVEL ...]`.
    fn parse_begin_statement(&mut self) -> Result<TransactionStatement, ParseError> {
        self.expect_keyword(Keyword::Begin)?;
        self.skip_transaction_noise();

        let isolation = if self.check_keyword(Keyword::Isolation) {
            self.advance();
            self.expect_keyword(Keyword::Level)?;
            Some(self.parse_isolation_level()?)
        } else {
            None
        };

        Ok(TransactionStatement::Begin { isolation })
    }

    fn parse_isolation_level(&mut self) -> Result<IsolationLevel, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Read) => {
                self.advance();
                if self.check_keyword(Keyword::Uncommitted) {
                    self.advance();
                    Ok(IsolationLevel::ReadUncommitted)
                } else {
                    self.expect_keyword(Keyword::Committed)?;
                    Ok(IsolationLevel::ReadCommitted)
                }
            }
            TokenKind::Keyword(Keyword::Repeatable) => {
                self.advance();
                self.expect_keyword(Keyword::Read)?;
                Ok(IsolationLevel::RepeatableRead)
            }
            TokenKind::Keyword(Keyword::Serializable) => {
                self.advance();
                Ok(IsolationLevel::Serializable)
            }
            TokenKind::Keyword(Keyword::Snapshot) => {
                self.advance();
                Ok(IsolationLevel::Snapshot)
            }
            _ => Err(ParseError::unexpected(
                "an isolation level",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Parses `SET name = value`.
    fn parse_set_statement(&mut self) -> Result<SetStatement, ParseError> {
        self.expect_keyword(Keyword::Set)?;
        let name = self.expect_identifier()?;
        if self.check(&TokenKind::Eq) || self.check(&TokenKind::Assign) {
            self.advance();
        } else {
            self.expect_keyword(Keyword::To)?;
        }
        let value = self.parse_expression(0)?;
        Ok(SetStatement { name, value })
    }

    /// Parses `SHOW name`.
    fn parse_show_statement(&mut self) -> Result<ShowStatement, ParseError> {
        self.expect_keyword(Keyword::Show)?;
        let name = self.expect_identifier()?;
        Ok(ShowStatement { name })
    }

    /// Parses `EXPLAIN [ANALYZE] statement`.
    fn parse_explain_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Explain)?;
        let analyze = if self.check_keyword(Keyword::Analyze) {
            self.advance();
            true
        } else {
            false
        };
        if self.check_keyword(Keyword::Plan) {
            self.advance();
            if self.check_keyword(Keyword::For) {
                self.advance();
            }
        }
        let statement = Box::new(self.parse_statement()?);
        Ok(Statement::Explain { analyze, statement })
    }

    /// Parses `CALL name(args)`.
    fn parse_call_statement(&mut self) -> Result<CallStatement, ParseError> {
        self.expect_keyword(Keyword::Call)?;
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LeftParen)?;
        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_expression_list()?
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(CallStatement { name, args })
    }

    /// Parses `TRUNCATE [TABLE] name`.
    fn parse_truncate_statement(&mut self) -> Result<TruncateStatement, ParseError> {
        self.expect_keyword(Keyword::Truncate)?;
        if self.check_keyword(Keyword::Table) {
            self.advance();
        }
        let table = self.expect_identifier()?;
        Ok(TruncateStatement { table })
    }

    /// Parses `USE name`.
    fn parse_use_statement(&mut self) -> Result<UseStatement, ParseError> {
        self.expect_keyword(Keyword::Use)?;
        let schema = self.expect_identifier()?;
        Ok(UseStatement { schema })
    }

    /// Parses `CREATE [UNIQUE] INDEX | [MATERIALIZED] VIEW | TABLE`.
    fn parse_create_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;

        let unique = if self.check_keyword(Keyword::Unique) {
            self.advance();
            true
        } else {
            false
        };

        let materialized = if self.check_keyword(Keyword::Materialized) {
            self.advance();
            true
        } else {
            false
        };

        match &self.current.kind {
            TokenKind::Keyword(Keyword::Table) => {
                self.advance();
                let if_not_exists = self.parse_if_not_exists()?;
                let name = self.expect_identifier()?;
                self.expect(&TokenKind::LeftParen)?;
                let mut columns = vec![];
                loop {
                    columns.push(self.parse_column_definition()?);
                    if !self.check(&TokenKind::Comma) {
                        break;
                    }
                    self.advance();
                }
                self.expect(&TokenKind::RightParen)?;
                Ok(Statement::CreateTable(CreateTableStatement {
                    name,
                    if_not_exists,
                    columns,
                }))
            }
            TokenKind::Keyword(Keyword::Index) => {
                self.advance();
                let name = self.expect_identifier()?;
                self.expect_keyword(Keyword::On)?;
                let table = self.expect_identifier()?;
                self.expect(&TokenKind::LeftParen)?;
                let columns = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Statement::CreateIndex(CreateIndexStatement {
                    name,
                    table,
                    columns,
                    unique,
                }))
            }
            TokenKind::Keyword(Keyword::View) => {
                self.advance();
                let name = self.expect_identifier()?;
                self.expect_keyword(Keyword::As)?;
                let query = Box::new(self.parse_select_statement()?);
                Ok(Statement::CreateView(CreateViewStatement {
                    name,
                    materialized,
                    query,
                }))
            }
            _ => Err(ParseError::unexpected(
                "TABLE, INDEX, or VIEW",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.check_keyword(Keyword::If) {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_column_definition(&mut self) -> Result<ColumnDefinition, ParseError> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;

        let mut not_null = false;
        let mut primary_key = false;
        let mut default = None;

        loop {
            match &self.current.kind {
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    not_null = true;
                }
                TokenKind::Keyword(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    primary_key = true;
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    default = Some(self.parse_expression(0)?);
                }
                _ => break,
            }
        }

        Ok(ColumnDefinition {
            name,
            data_type,
            not_null,
            primary_key,
            default,
        })
    }

    /// Parses `DROP TABLE [IF EXISTS] name`.
    fn parse_drop_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Table)?;
        let if_exists = if self.check_keyword(Keyword::If) {
            self.advance();
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };
        let name = self.expect_identifier()?;
        Ok(Statement::DropTable(DropTableStatement { name, if_exists }))
    }

    /// Parses one or more CTEs followed by the statement that sees them.
    fn parse_with_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::With)?;
        let recursive = if self.check_keyword(Keyword::Recursive) {
            self.advance();
            true
        } else {
            false
        };

        let mut ctes = vec![];
        loop {
            let name = self.expect_identifier()?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.advance();
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                cols
            } else {
                vec![]
            };
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            let query = Box::new(self.parse_select_statement()?);
            self.expect(&TokenKind::RightParen)?;

            ctes.push(CommonTableExpr {
                name,
                columns,
                query,
                recursive,
            });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        let body = Box::new(self.parse_statement()?);
        Ok(Statement::With(WithStatement { ctes, body }))
    }

    /// Parses a SELECT statement, folding in any trailing
    /// UNION/INTERSECT/EXCEPT combinators.
    fn parse_select_or_set_op(&mut self) -> Result<Statement, ParseError> {
        let mut left = Statement::Select(self.parse_select_statement()?);

        loop {
            let op = match &self.current.kind {
                TokenKind::Keyword(Keyword::Union) => SetOperator::Union,
                TokenKind::Keyword(Keyword::Intersect) => SetOperator::Intersect,
                TokenKind::Keyword(Keyword::Except | Keyword::Minus) => SetOperator::Except,
                _ => break,
            };
            self.advance();
            let all = if self.check_keyword(Keyword::All) {
                self.advance();
                true
            } else {
                if self.check_keyword(Keyword::Distinct) {
                    self.advance();
                }
                false
            };
            let right = Statement::Select(self.parse_select_statement()?);
            left = Statement::SetOperation(SetOperationStatement {
                left: Box::new(left),
                op,
                all,
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    /// Parses a MERGE statement.
    fn parse_merge_statement(&mut self) -> Result<MergeStatement, ParseError> {
        self.expect_keyword(Keyword::Merge)?;
        if self.check_keyword(Keyword::Into) {
            self.advance();
        }
        let target = self.expect_identifier()?;
        let target_alias = self.parse_optional_alias()?;

        self.expect_keyword(Keyword::Using)?;
        let source = self.parse_simple_table_ref()?;
        self.expect_keyword(Keyword::On)?;
        let on = self.parse_expression(0)?;

        let mut clauses = vec![];
        while self.check_keyword(Keyword::When) {
            self.advance();
            let matched = if self.check_keyword(Keyword::Matched) {
                self.advance();
                true
            } else {
                self.expect_keyword(Keyword::Not)?;
                self.expect_keyword(Keyword::Matched)?;
                false
            };

            let condition = if self.check_keyword(Keyword::And) {
                self.advance();
                Some(self.parse_expression(0)?)
            } else {
                None
            };

            self.expect_keyword(Keyword::Then)?;

            let action = match &self.current.kind {
                TokenKind::Keyword(Keyword::Update) => {
                    self.advance();
                    self.expect_keyword(Keyword::Set)?;
                    let mut assignments = vec![];
                    loop {
                        let column = self.expect_identifier()?;
                        self.expect(&TokenKind::Eq)?;
                        let value = self.parse_expression(0)?;
                        assignments.push(UpdateAssignment { column, value });
                        if !self.check(&TokenKind::Comma) {
                            break;
                        }
                        self.advance();
                    }
                    MergeAction::Update(assignments)
                }
                TokenKind::Keyword(Keyword::Delete) => {
                    self.advance();
                    MergeAction::Delete
                }
                TokenKind::Keyword(Keyword::Insert) => {
                    self.advance();
                    let columns = if self.check(&TokenKind::LeftParen) {
                        self.advance();
                        let cols = self.parse_identifier_list()?;
                        self.expect(&TokenKind::RightParen)?;
                        cols
                    } else {
                        vec![]
                    };
                    self.expect_keyword(Keyword::Values)?;
                    self.expect(&TokenKind::LeftParen)?;
                    let values = self.parse_expression_list()?;
                    self.expect(&TokenKind::RightParen)?;
                    MergeAction::Insert { columns, values }
                }
                _ => {
                    return Err(ParseError::unexpected(
                        "UPDATE, DELETE, or INSERT",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
            };

            clauses.push(MergeWhenClause {
                matched,
                condition,
                action,
            });
        }

        Ok(MergeStatement {
            target,
            target_alias,
            source,
            on,
            clauses,
        })
    }

    /// Parses a SELECT statement.
    fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let distinct = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            true
        } else if self.check_keyword(Keyword::All) {
            self.advance();
            false
        } else {
            false
        };

        // SELECT columns
        let columns = self.parse_select_columns()?;

        // FROM clause (optional for expressions like SELECT 1+1)
        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_table_ref()?)
        } else {
            None
        };

        // WHERE clause
        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        // GROUP BY clause
        let group_by = if self.check_keyword(Keyword::Group) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };

        // HAVING clause
        let having = if self.check_keyword(Keyword::Having) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        // WINDOW clause (named window definitions)
        let window_defs = if self.check_keyword(Keyword::Window) {
            self.advance();
            let mut defs = vec![];
            loop {
                let name = self.expect_identifier()?;
                self.expect_keyword(Keyword::As)?;
                let spec = self.parse_window_spec()?;
                defs.push((name, spec));
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
            defs
        } else {
            vec![]
        };

        // ORDER BY clause
        let order_by = if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };

        // LIMIT clause
        let limit = if self.check_keyword(Keyword::Limit) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        // OFFSET clause
        let offset = if self.check_keyword(Keyword::Offset) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            window_defs,
            order_by,
            limit,
            offset,
        })
    }

    /// Parses SELECT columns.
    fn parse_select_columns(&mut self) -> Result<Vec<SelectColumn>, ParseError> {
        let mut columns = vec![];

        loop {
            let expr = self.parse_expression(0)?;

            // Check for alias (AS name or just name)
            let alias = if self.check_keyword(Keyword::As) {
                self.advance();
                Some(self.expect_identifier()?)
            } else if self.is_identifier_token() {
                Some(self.expect_identifier()?)
            } else {
                None
            };

            columns.push(SelectColumn { expr, alias });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(columns)
    }

    /// Parses a table reference.
    fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let mut table_ref = if self.check(&TokenKind::LeftParen) {
            // Subquery or grouped table ref
            self.advance();
            if self.check_keyword(Keyword::Select) {
                let query = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                let alias = self.parse_optional_alias()?;
                TableRef::Subquery {
                    query: Box::new(query),
                    alias: alias.unwrap_or_else(|| String::from("subquery")),
                }
            } else {
                let inner = self.parse_table_ref()?;
                self.expect(&TokenKind::RightParen)?;
                inner
            }
        } else {
            // Simple table name
            let first = self.expect_identifier()?;
            let (schema, name) = if self.check(&TokenKind::Dot) {
                self.advance();
                let table_name = self.expect_identifier()?;
                (Some(first), table_name)
            } else {
                (None, first)
            };

            let alias = self.parse_optional_alias()?;

            TableRef::Table {
                schema,
                name,
                alias,
            }
        };

        // Parse joins
        while self.is_join_keyword() {
            let join_type = self.parse_join_type()?;
            let right = self.parse_simple_table_ref()?;

            let (on, using) = if join_type == JoinType::Cross {
                (None, vec![])
            } else if self.check_keyword(Keyword::On) {
                self.advance();
                (Some(self.parse_expression(0)?), vec![])
            } else if self.check_keyword(Keyword::Using) {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                (None, cols)
            } else {
                return Err(ParseError::new(
                    "Expected ON or USING clause",
                    self.current.span,
                ));
            };

            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join: Box::new(JoinClause {
                    join_type,
                    table: right,
                    on,
                    using,
                }),
            };
        }

        Ok(table_ref)
    }

    /// Parses a simple table reference (no joins).
    fn parse_simple_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let first = self.expect_identifier()?;
        let (schema, name) = if self.check(&TokenKind::Dot) {
            self.advance();
            let table_name = self.expect_identifier()?;
            (Some(first), table_name)
        } else {
            (None, first)
        };

        let alias = self.parse_optional_alias()?;

        Ok(TableRef::Table {
            schema,
            name,
            alias,
        })
    }

    /// Checks if current token is a join keyword.
    fn is_join_keyword(&self) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Keyword(
                Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
            )
        )
    }

    /// Parses a join type.
    fn parse_join_type(&mut self) -> Result<JoinType, ParseError> {
        let join_type = match &self.current.kind {
            TokenKind::Keyword(Keyword::Join) => {
                self.advance();
                JoinType::Inner
            }
            TokenKind::Keyword(Keyword::Inner) => {
                self.advance();
                self.expect_keyword(Keyword::Join)?;
                JoinType::Inner
            }
            TokenKind::Keyword(Keyword::Left) => {
                self.advance();
                if self.check_keyword(Keyword::Outer) {
                    self.advance();
                }
                self.expect_keyword(Keyword::Join)?;
                JoinType::Left
            }
            TokenKind::Keyword(Keyword::Right) => {
                self.advance();
                if self.check_keyword(Keyword::Outer) {
                    self.advance();
                }
                self.expect_keyword(Keyword::Join)?;
                JoinType::Right
            }
            TokenKind::Keyword(Keyword::Full) => {
                self.advance();
                if self.check_keyword(Keyword::Outer) {
                    self.advance();
                }
                self.expect_keyword(Keyword::Join)?;
                JoinType::Full
            }
            TokenKind::Keyword(Keyword::Cross) => {
                self.advance();
                self.expect_keyword(Keyword::Join)?;
                JoinType::Cross
            }
            _ => {
                return Err(ParseError::unexpected(
                    "JOIN keyword",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        Ok(join_type)
    }

    /// Parses an optional table alias.
    fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.check_keyword(Keyword::As) {
            self.advance();
            Ok(Some(self.expect_identifier()?))
        } else if self.is_identifier_token() && !self.is_reserved_word()
        {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    /// Checks if current identifier is a reserved word.
    fn is_reserved_word(&self) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Keyword(
                Keyword::Where
                    | Keyword::Order
                    | Keyword::Group
                    | Keyword::Having
                    | Keyword::Limit
                    | Keyword::Offset
                    | Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
                    | Keyword::On
                    | Keyword::Using
                    | Keyword::Union
                    | Keyword::Intersect
                    | Keyword::Except
            )
        )
    }

    /// Parses an INSERT statement.
    fn parse_insert_statement(&mut self) -> Result<InsertStatement, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let first = self.expect_identifier()?;
        let (schema, table) = if self.check(&TokenKind::Dot) {
            self.advance();
            let table_name = self.expect_identifier()?;
            (Some(first), table_name)
        } else {
            (None, first)
        };

        // Column list (optional)
        let columns = if self.check(&TokenKind::LeftParen) {
            self.advance();
            let cols = self.parse_identifier_list()?;
            self.expect(&TokenKind::RightParen)?;
            cols
        } else {
            vec![]
        };

        // VALUES, SELECT, or DEFAULT VALUES
        let values = if self.check_keyword(Keyword::Values) {
            self.advance();
            let mut rows = vec![];
            loop {
                self.expect(&TokenKind::LeftParen)?;
                let row = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                rows.push(row);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            InsertSource::Values(rows)
        } else if self.check_keyword(Keyword::Select) {
            InsertSource::Query(Box::new(self.parse_select_statement()?))
        } else if self.check_keyword(Keyword::Default) {
            self.advance();
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else {
            return Err(ParseError::unexpected(
                "VALUES, SELECT, or DEFAULT VALUES",
                self.current.kind.clone(),
                self.current.span,
            ));
        };

        Ok(InsertStatement {
            schema,
            table,
            columns,
            values,
            on_conflict: None,
        })
    }

    /// Parses an UPDATE statement.
    fn parse_update_statement(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;

        let first = self.expect_identifier()?;
        let (schema, table) = if self.check(&TokenKind::Dot) {
            self.advance();
            let table_name = self.expect_identifier()?;
            (Some(first), table_name)
        } else {
            (None, first)
        };

        let alias = self.parse_optional_alias()?;

        self.expect_keyword(Keyword::Set)?;

        // Parse SET assignments
        let mut assignments = vec![];
        loop {
            let column = self.expect_identifier()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expression(0)?;
            assignments.push(UpdateAssignment { column, value });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        // FROM clause (optional, for joins)
        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_table_ref()?)
        } else {
            None
        };

        // WHERE clause
        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(UpdateStatement {
            schema,
            table,
            alias,
            assignments,
            from,
            where_clause,
        })
    }

    /// Parses a DELETE statement.
    fn parse_delete_statement(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let first = self.expect_identifier()?;
        let (schema, table) = if self.check(&TokenKind::Dot) {
            self.advance();
            let table_name = self.expect_identifier()?;
            (Some(first), table_name)
        } else {
            (None, first)
        };

        let alias = self.parse_optional_alias()?;

        // WHERE clause
        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(DeleteStatement {
            schema,
            table,
            alias,
            where_clause,
        })
    }

    /// Parses an ORDER BY list.
    fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        let mut items = vec![];
        loop {
            let expr = self.parse_expression(0)?;
            let direction = if self.check_keyword(Keyword::Desc) {
                self.advance();
                OrderDirection::Desc
            } else if self.check_keyword(Keyword::Asc) {
                self.advance();
                OrderDirection::Asc
            } else {
                OrderDirection::Asc
            };

            items.push(OrderBy {
                expr,
                direction,
                nulls: None,
            });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    /// Parses an expression using Pratt parsing.
    #[allow(clippy::while_let_loop)]
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        // Parse prefix (primary expression or unary operator)
        let mut lhs = self.parse_prefix()?;

        // Parse infix operators
        loop {
            // Check if current token is an infix operator
            let (l_bp, r_bp) = match infix_binding_power(&self.current.kind) {
                Some(bp) => bp,
                None => break,
            };

            if l_bp < min_bp {
                break;
            }

            // Handle special infix operators
            match &self.current.kind {
                TokenKind::Keyword(Keyword::Is) => {
                    self.advance();
                    let negated = if self.check_keyword(Keyword::Not) {
                        self.advance();
                        true
                    } else {
                        false
                    };
                    self.expect_keyword(Keyword::Null)?;
                    lhs = Expr::IsNull {
                        expr: Box::new(lhs),
                        negated,
                    };
                }
                TokenKind::Keyword(Keyword::In) => {
                    self.advance();
                    self.expect(&TokenKind::LeftParen)?;
                    let list = self.parse_expression_list()?;
                    self.expect(&TokenKind::RightParen)?;
                    lhs = Expr::In {
                        expr: Box::new(lhs),
                        list,
                        negated: false,
                    };
                }
                TokenKind::Keyword(Keyword::Between) => {
                    self.advance();
                    let low = self.parse_expression(r_bp)?;
                    self.expect_keyword(Keyword::And)?;
                    let high = self.parse_expression(r_bp)?;
                    lhs = Expr::Between {
                        expr: Box::new(lhs),
                        low: Box::new(low),
                        high: Box::new(high),
                        negated: false,
                    };
                }
                TokenKind::Keyword(Keyword::Like | Keyword::Ilike) => {
                    self.advance();
                    let rhs = self.parse_expression(r_bp)?;
                    lhs = Expr::Binary {
                        left: Box::new(lhs),
                        op: BinaryOp::Like,
                        right: Box::new(rhs),
                    };
                }
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    lhs = self.parse_negated_predicate(lhs, r_bp)?;
                }
                _ => {
                    // Standard binary operator
                    if let Some(op) = token_to_binary_op(&self.current.kind) {
                        self.advance();
                        let rhs = self.parse_expression(r_bp)?;
                        lhs = Expr::Binary {
                            left: Box::new(lhs),
                            op,
                            right: Box::new(rhs),
                        };
                    } else {
                        break;
                    }
                }
            }
        }

        Ok(lhs)
    }

    /// Parses the predicate following a `NOT` infix (NOT IN / NOT BETWEEN /
    /// NOT LIKE / NOT EXISTS).
    fn parse_negated_predicate(&mut self, lhs: Expr, r_bp: u8) -> Result<Expr, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let list = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::In {
                    expr: Box::new(lhs),
                    list,
                    negated: true,
                })
            }
            TokenKind::Keyword(Keyword::Between) => {
                self.advance();
                let low = self.parse_expression(r_bp)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression(r_bp)?;
                Ok(Expr::Between {
                    expr: Box::new(lhs),
                    low: Box::new(low),
                    high: Box::new(high),
                    negated: true,
                })
            }
            TokenKind::Keyword(Keyword::Like | Keyword::Ilike) => {
                self.advance();
                let rhs = self.parse_expression(r_bp)?;
                Ok(Expr::Unary {
                    op: crate::ast::UnaryOp::Not,
                    operand: Box::new(Expr::Binary {
                        left: Box::new(lhs),
                        op: BinaryOp::Like,
                        right: Box::new(rhs),
                    }),
                })
            }
            _ => Err(ParseError::unexpected(
                "IN, BETWEEN, or LIKE after NOT",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if self.check_keyword(Keyword::Not) {
            // Special-case NOT EXISTS so negation lives on the Exists node
            // rather than wrapping it in a generic Unary::Not.
            let checkpoint = self.current.clone();
            self.advance();
            if self.check_keyword(Keyword::Exists) {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let subquery = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                return Ok(Expr::Exists {
                    subquery: Box::new(subquery),
                    negated: true,
                });
            }
            let bp = prefix_binding_power(&checkpoint.kind).unwrap_or(3);
            let operand = self.parse_expression(bp)?;
            return Ok(Expr::Unary {
                op: crate::ast::UnaryOp::Not,
                operand: Box::new(operand),
            });
        }

        // Check for unary operators
        if let Some(op) = token_to_unary_op(&self.current.kind) {
            let bp = prefix_binding_power(&self.current.kind).unwrap_or(15);
            self.advance();
            let operand = self.parse_expression(bp)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current.clone();

        match &token.kind {
            // Literals
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expr::Literal(Literal::Integer(*n)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(Expr::Literal(Literal::Float(*f)))
            }
            TokenKind::String { value, .. } => {
                let value = value.clone();
                self.advance();
                Ok(Expr::Literal(Literal::String(value)))
            }
            TokenKind::BigInt(n) => {
                let n = *n;
                self.advance();
                Ok(Expr::Literal(Literal::BigInt(n)))
            }
            TokenKind::Blob(b) => {
                let value = b.clone();
                self.advance();
                Ok(Expr::Literal(Literal::Blob(value)))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::Literal(Literal::Null))
            }

            // Parameter placeholders
            TokenKind::Param => {
                self.param_counter += 1;
                let position = self.param_counter;
                self.advance();
                Ok(Expr::Parameter {
                    name: None,
                    position,
                })
            }
            TokenKind::IndexedParam(n) => {
                let position = *n as usize;
                self.advance();
                Ok(Expr::Parameter {
                    name: None,
                    position,
                })
            }
            TokenKind::NamedParam(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expr::Parameter {
                    name: Some(name),
                    position: 0,
                })
            }

            // Wildcard
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Wildcard { table: None })
            }

            // Parenthesized expression or subquery
            TokenKind::LeftParen => {
                self.advance();
                if self.check_keyword(Keyword::Select) {
                    let subquery = self.parse_select_statement()?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(Expr::Subquery(Box::new(subquery)))
                } else {
                    let expr = self.parse_expression(0)?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(Expr::Paren(Box::new(expr)))
                }
            }

            // Aggregate functions
            TokenKind::Keyword(
                kw @ (Keyword::Count | Keyword::Sum | Keyword::Avg | Keyword::Min | Keyword::Max),
            ) => {
                let name = kw.as_str().to_string();
                self.advance();
                self.parse_function_call(name)
            }

            // Other functions
            TokenKind::Keyword(kw @ (Keyword::Coalesce | Keyword::Nullif | Keyword::Cast)) => {
                let name = kw.as_str().to_string();
                self.advance();
                if matches!(kw, Keyword::Cast) {
                    self.parse_cast_expression()
                } else {
                    self.parse_function_call(name)
                }
            }

            // CASE expression
            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),

            // ARRAY[...] literal
            TokenKind::Keyword(Keyword::Array) => {
                self.advance();
                self.expect(&TokenKind::LeftBracket)?;
                let elements = if self.check(&TokenKind::RightBracket) {
                    vec![]
                } else {
                    self.parse_expression_list()?
                };
                self.expect(&TokenKind::RightBracket)?;
                Ok(Expr::ArrayLiteral(elements))
            }

            // ROW(...) literal
            TokenKind::Keyword(Keyword::Row) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let elements = if self.check(&TokenKind::RightParen) {
                    vec![]
                } else {
                    self.parse_expression_list()?
                };
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::RowLiteral(elements))
            }

            // EXISTS
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let subquery = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Exists {
                    subquery: Box::new(subquery),
                    negated: false,
                })
            }

            // Identifier (column reference or function call)
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                let name = name.clone();
                let span = token.span;
                self.advance();

                // Check for function call
                if self.check(&TokenKind::LeftParen) {
                    return self.parse_function_call(name);
                }

                // Check for qualified name (table.column or table.*)
                if self.check(&TokenKind::Dot) {
                    self.advance();
                    if self.check(&TokenKind::Star) {
                        self.advance();
                        return Ok(Expr::Wildcard { table: Some(name) });
                    }
                    let column = self.expect_identifier()?;
                    return Ok(Expr::Column {
                        table: Some(name),
                        name: column,
                        span,
                    });
                }

                Ok(Expr::Column {
                    table: None,
                    name,
                    span,
                })
            }

            _ => Err(ParseError::unexpected(
                "expression",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Parses a function call, including an optional `WITHIN GROUP (ORDER
    /// BY ...)` ordered-set-aggregate suffix and an optional `OVER (...)`
    /// / `OVER name` window suffix.
    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        let distinct = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            true
        } else {
            false
        };

        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else if self.check(&TokenKind::Star) {
            self.advance();
            vec![Expr::Wildcard { table: None }]
        } else {
            self.parse_expression_list()?
        };

        self.expect(&TokenKind::RightParen)?;

        let ignore_nulls = if self.check_keyword(Keyword::Ignore) {
            self.advance();
            self.expect_keyword(Keyword::Nulls)?;
            true
        } else if self.check_keyword(Keyword::Respect) {
            self.advance();
            self.expect_keyword(Keyword::Nulls)?;
            false
        } else {
            false
        };

        let within_group = if self.check_keyword(Keyword::Within) {
            self.advance();
            self.expect_keyword(Keyword::Group)?;
            self.expect(&TokenKind::LeftParen)?;
            self.expect_keyword(Keyword::Order)?;
            self.expect_keyword(Keyword::By)?;
            let list = self.parse_order_by_list()?;
            self.expect(&TokenKind::RightParen)?;
            list
        } else {
            vec![]
        };

        let over = if self.check_keyword(Keyword::Over) {
            self.advance();
            Some(self.parse_window_ref()?)
        } else {
            None
        };

        Ok(Expr::Function(FunctionCall {
            name,
            args,
            distinct,
            within_group,
            ignore_nulls,
            over,
        }))
    }

    /// Parses the target of an `OVER` clause: either a named window
    /// (`OVER w`) or an inline definition (`OVER (...)`).
    fn parse_window_ref(&mut self) -> Result<crate::ast::WindowRef, ParseError> {
        if self.check(&TokenKind::LeftParen) {
            Ok(crate::ast::WindowRef::Inline(self.parse_window_spec()?))
        } else {
            let name = self.expect_identifier()?;
            Ok(crate::ast::WindowRef::Named(name))
        }
    }

    /// Parses the body of a window definition: `(w) PARTITION BY ...
    /// ORDER BY ... <frame>`, used both by inline `OVER (...)` clauses and
    /// by named `WINDOW w AS (...)` definitions.
    fn parse_window_spec(&mut self) -> Result<crate::ast::WindowSpec, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        let base_window = if matches!(self.current.kind, TokenKind::Identifier(_)) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let partition_by = if self.check_keyword(Keyword::Partition) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };

        let order_by = if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };

        let frame = if self.check_keyword(Keyword::Rows)
            || self.check_keyword(Keyword::Range)
            || self.check_keyword(Keyword::Groups)
        {
            Some(self.parse_window_frame()?)
        } else {
            None
        };

        self.expect(&TokenKind::RightParen)?;

        Ok(crate::ast::WindowSpec {
            base_window,
            partition_by,
            order_by,
            frame,
        })
    }

    /// Parses `{ROWS|RANGE|GROUPS} BETWEEN <bound> AND <bound>` or the
    /// single-bound form `{ROWS|RANGE|GROUPS} <bound>`, followed by an
    /// optional `EXCLUDE ...` clause.
    fn parse_window_frame(&mut self) -> Result<crate::ast::WindowFrame, ParseError> {
        let unit = if self.check_keyword(Keyword::Rows) {
            self.advance();
            crate::ast::FrameUnit::Rows
        } else if self.check_keyword(Keyword::Range) {
            self.advance();
            crate::ast::FrameUnit::Range
        } else {
            self.expect_keyword(Keyword::Groups)?;
            crate::ast::FrameUnit::Groups
        };

        let (start, end) = if self.check_keyword(Keyword::Between) {
            self.advance();
            let start = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            let end = self.parse_frame_bound()?;
            (start, Some(end))
        } else {
            (self.parse_frame_bound()?, None)
        };

        let exclusion = if self.check_keyword(Keyword::Exclude) {
            self.advance();
            if self.check_keyword(Keyword::Current) {
                self.advance();
                self.expect_keyword(Keyword::Row)?;
                Some(crate::ast::FrameExclusion::CurrentRow)
            } else if self.check_keyword(Keyword::Group) {
                self.advance();
                Some(crate::ast::FrameExclusion::Group)
            } else if self.check_keyword(Keyword::Ties) {
                self.advance();
                Some(crate::ast::FrameExclusion::Ties)
            } else {
                // EXCLUDE NO OTHERS: `NO`/`OTHERS` are not reserved
                // keywords, so accept them as plain identifiers.
                let _ = self.expect_identifier()?;
                let _ = self.expect_identifier()?;
                Some(crate::ast::FrameExclusion::NoOthers)
            }
        } else {
            None
        };

        Ok(crate::ast::WindowFrame {
            unit,
            start,
            end,
            exclusion,
        })
    }

    /// Parses one endpoint of a window frame.
    fn parse_frame_bound(&mut self) -> Result<crate::ast::FrameBound, ParseError> {
        if self.check_keyword(Keyword::Unbounded) {
            self.advance();
            if self.check_keyword(Keyword::Preceding) {
                self.advance();
                Ok(crate::ast::FrameBound::UnboundedPreceding)
            } else {
                self.expect_keyword(Keyword::Following)?;
                Ok(crate::ast::FrameBound::UnboundedFollowing)
            }
        } else if self.check_keyword(Keyword::Current) {
            self.advance();
            self.expect_keyword(Keyword::Row)?;
            Ok(crate::ast::FrameBound::CurrentRow)
        } else {
            let expr = self.parse_expression(0)?;
            if self.check_keyword(Keyword::Preceding) {
                self.advance();
                Ok(crate::ast::FrameBound::Preceding(Box::new(expr)))
            } else {
                self.expect_keyword(Keyword::Following)?;
                Ok(crate::ast::FrameBound::Following(Box::new(expr)))
            }
        }
    }

    /// Parses a CAST expression.
    fn parse_cast_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// Parses a CASE expression.
    fn parse_case_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        // Check for simple CASE (CASE expr WHEN ...)
        let operand = if !self.check_keyword(Keyword::When) {
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };

        // Parse WHEN/THEN clauses
        let mut when_clauses = vec![];
        while self.check_keyword(Keyword::When) {
            self.advance();
            let when_expr = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let then_expr = self.parse_expression(0)?;
            when_clauses.push((when_expr, then_expr));
        }

        // Parse ELSE clause
        let else_clause = if self.check_keyword(Keyword::Else) {
            self.advance();
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    /// Parses a data type.
    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let data_type = match &self.current.kind {
            TokenKind::Keyword(Keyword::Int | Keyword::Integer) => {
                self.advance();
                DataType::Integer
            }
            TokenKind::Keyword(Keyword::Smallint) => {
                self.advance();
                DataType::Smallint
            }
            TokenKind::Keyword(Keyword::Bigint) => {
                self.advance();
                DataType::Bigint
            }
            TokenKind::Keyword(Keyword::Real) => {
                self.advance();
                DataType::Real
            }
            TokenKind::Keyword(Keyword::Double) => {
                self.advance();
                DataType::Double
            }
            TokenKind::Keyword(Keyword::Float) => {
                self.advance();
                DataType::Double
            }
            TokenKind::Keyword(Keyword::Decimal) => {
                self.advance();
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal { precision, scale }
            }
            TokenKind::Keyword(Keyword::Numeric) => {
                self.advance();
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Numeric { precision, scale }
            }
            TokenKind::Keyword(Keyword::Char) => {
                self.advance();
                let len = self.parse_optional_length()?;
                DataType::Char(len)
            }
            TokenKind::Keyword(Keyword::Varchar) => {
                self.advance();
                let len = self.parse_optional_length()?;
                DataType::Varchar(len)
            }
            TokenKind::Keyword(Keyword::Text) => {
                self.advance();
                DataType::Text
            }
            TokenKind::Keyword(Keyword::Blob) => {
                self.advance();
                DataType::Blob
            }
            TokenKind::Keyword(Keyword::Boolean) => {
                self.advance();
                DataType::Boolean
            }
            TokenKind::Keyword(Keyword::Date) => {
                self.advance();
                DataType::Date
            }
            TokenKind::Keyword(Keyword::Time) => {
                self.advance();
                DataType::Time
            }
            TokenKind::Keyword(Keyword::Timestamp) => {
                self.advance();
                DataType::Timestamp
            }
            TokenKind::Keyword(Keyword::Datetime) => {
                self.advance();
                DataType::Datetime
            }
            TokenKind::Keyword(Keyword::Enum) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let mut labels = vec![];
                loop {
                    match &self.current.kind {
                        TokenKind::String { value, .. } => {
                            labels.push(value.clone());
                            self.advance();
                        }
                        _ => {
                            return Err(ParseError::unexpected(
                                "string literal",
                                self.current.kind.clone(),
                                self.current.span,
                            ));
                        }
                    }
                    if !self.check(&TokenKind::Comma) {
                        break;
                    }
                    self.advance();
                }
                self.expect(&TokenKind::RightParen)?;
                DataType::Enum(labels)
            }
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                let name = name.clone();
                self.advance();
                DataType::Custom(name)
            }
            _ => {
                return Err(ParseError::unexpected(
                    "data type",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };

        // Trailing `ARRAY` / `ARRAY[n]` suffix.
        if self.check_keyword(Keyword::Array) {
            self.advance();
            let size = if self.check(&TokenKind::LeftBracket) {
                self.advance();
                let n = match &self.current.kind {
                    TokenKind::Integer(n) => {
                        let n = u32::try_from(*n)
                            .map_err(|_| ParseError::new("Array size too large", self.current.span))?;
                        self.advance();
                        n
                    }
                    _ => {
                        return Err(ParseError::unexpected(
                            "integer",
                            self.current.kind.clone(),
                            self.current.span,
                        ));
                    }
                };
                self.expect(&TokenKind::RightBracket)?;
                Some(n)
            } else {
                None
            };
            return Ok(DataType::Array {
                element: Box::new(data_type),
                size,
            });
        }

        Ok(data_type)
    }

    /// Parses optional precision and scale (for DECIMAL/NUMERIC).
    fn parse_optional_precision_scale(&mut self) -> Result<(Option<u16>, Option<u16>), ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        self.advance();

        let precision = match &self.current.kind {
            TokenKind::Integer(n) => {
                let p = u16::try_from(*n)
                    .map_err(|_| ParseError::new("Precision too large", self.current.span))?;
                self.advance();
                Some(p)
            }
            _ => {
                return Err(ParseError::unexpected(
                    "integer",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };

        let scale = if self.check(&TokenKind::Comma) {
            self.advance();
            match &self.current.kind {
                TokenKind::Integer(n) => {
                    let s = u16::try_from(*n)
                        .map_err(|_| ParseError::new("Scale too large", self.current.span))?;
                    self.advance();
                    Some(s)
                }
                _ => {
                    return Err(ParseError::unexpected(
                        "integer",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
            }
        } else {
            None
        };

        self.expect(&TokenKind::RightParen)?;
        Ok((precision, scale))
    }

    /// Parses optional length (for CHAR/VARCHAR).
    fn parse_optional_length(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(None);
        }
        self.advance();

        let length = match &self.current.kind {
            TokenKind::Integer(n) => {
                let len = u32::try_from(*n)
                    .map_err(|_| ParseError::new("Length too large", self.current.span))?;
                self.advance();
                len
            }
            _ => {
                return Err(ParseError::unexpected(
                    "integer",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };

        self.expect(&TokenKind::RightParen)?;
        Ok(Some(length))
    }

    /// Parses a comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![];
        loop {
            exprs.push(self.parse_expression(0)?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(exprs)
    }

    /// Parses a comma-separated list of identifiers.
    fn parse_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut idents = vec![];
        loop {
            idents.push(self.expect_identifier()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(idents)
    }

    // --- Helper methods ---

    /// Advances to the next token.
    fn advance(&mut self) {
        self.previous = core::mem::replace(&mut self.current, self.lexer.next_token());
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                format!("{kind:?}"),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                keyword.as_str(),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Expects and returns an identifier, accepting both unquoted and
    /// quoted forms.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::unexpected(
                "identifier",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Returns true if the current token can start an identifier (quoted
    /// or unquoted).
    fn is_identifier_token(&self) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_statement()
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("SELECT id, name FROM users").unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
    }

    #[test]
    fn test_select_with_where() {
        let stmt = parse("SELECT * FROM users WHERE id = 1").unwrap();
        if let Statement::Select(select) = stmt {
            assert!(select.where_clause.is_some());
        } else {
            panic!("Expected SELECT statement");
        }
    }

    #[test]
    fn test_select_with_join() {
        let stmt =
            parse("SELECT u.id, o.amount FROM users u JOIN orders o ON u.id = o.user_id").unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be parsed as 1 + (2 * 3)
        let stmt = parse("SELECT 1 + 2 * 3").unwrap();
        if let Statement::Select(select) = stmt {
            if let Expr::Binary { op, right, .. } = &select.columns[0].expr {
                assert_eq!(*op, BinaryOp::Add);
                assert!(matches!(
                    right.as_ref(),
                    Expr::Binary {
                        op: BinaryOp::Mul,
                        ..
                    }
                ));
            } else {
                panic!("Expected binary expression");
            }
        } else {
            panic!("Expected SELECT statement");
        }
    }

    #[test]
    fn test_insert_values() {
        let stmt =
            parse("INSERT INTO users (name, email) VALUES ('Alice', 'alice@example.com')").unwrap();
        if let Statement::Insert(insert) = stmt {
            assert_eq!(insert.table, "users");
            assert_eq!(insert.columns.len(), 2);
            assert!(matches!(insert.values, InsertSource::Values(_)));
        } else {
            panic!("Expected INSERT statement");
        }
    }

    #[test]
    fn test_update() {
        let stmt = parse("UPDATE users SET name = 'Bob' WHERE id = 1").unwrap();
        if let Statement::Update(update) = stmt {
            assert_eq!(update.table, "users");
            assert_eq!(update.assignments.len(), 1);
            assert!(update.where_clause.is_some());
        } else {
            panic!("Expected UPDATE statement");
        }
    }

    #[test]
    fn test_delete() {
        let stmt = parse("DELETE FROM users WHERE id = 1").unwrap();
        if let Statement::Delete(delete) = stmt {
            assert_eq!(delete.table, "users");
            assert!(delete.where_clause.is_some());
        } else {
            panic!("Expected DELETE statement");
        }
    }

    #[test]
    fn test_parameter_placeholders() {
        let stmt = parse("SELECT * FROM users WHERE id = ? AND name = :name").unwrap();
        let Statement::Select(select) = stmt else {
            panic!("Expected SELECT statement");
        };
        let Some(Expr::Binary { left, right, .. }) = &select.where_clause else {
            panic!("Expected Binary expression in WHERE clause");
        };
        // First condition: id = ?
        if let Expr::Binary { right: param1, .. } = left.as_ref() {
            assert!(matches!(
                param1.as_ref(),
                Expr::Parameter {
                    name: None,
                    position: 1
                }
            ));
        }
        // Second condition: name = :name
        if let Expr::Binary { right: param2, .. } = right.as_ref() {
            assert!(matches!(
                param2.as_ref(),
                Expr::Parameter { name: Some(n), .. } if n == "name"
            ));
        }
    }

    #[test]
    fn test_case_expression() {
        let stmt =
            parse("SELECT CASE WHEN status = 1 THEN 'active' ELSE 'inactive' END FROM users")
                .unwrap();
        if let Statement::Select(select) = stmt {
            assert!(matches!(select.columns[0].expr, Expr::Case { .. }));
        }
    }

    #[test]
    fn test_aggregate_functions() {
        let stmt = parse("SELECT COUNT(*), SUM(amount), AVG(price) FROM orders").unwrap();
        if let Statement::Select(select) = stmt {
            assert_eq!(select.columns.len(), 3);
            assert!(matches!(select.columns[0].expr, Expr::Function(_)));
        }
    }
}
