//! SQL Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::dialect::DialectFlags;

/// A lexer that tokenizes SQL input.
///
/// The lexer is dialect-aware: identifier length limits and whether bare
/// literals are permitted both come from the active [`DialectFlags`].
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Active dialect configuration.
    dialect: DialectFlags,
    /// Set once a `?` placeholder has been seen, so a later `?N` (or vice
    /// versa) can be rejected; the two styles cannot mix within one
    /// statement.
    param_style: ParamStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamStyle {
    Unknown,
    Positional,
    Indexed,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input using default dialect flags.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, DialectFlags::default())
    }

    /// Creates a new lexer using the given dialect configuration.
    #[must_use]
    pub const fn with_dialect(input: &'a str, dialect: DialectFlags) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            dialect,
            param_style: ParamStyle::Unknown,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments. Line comments may start with `--` or
    /// `//`; block comments use `/* ... */` and do not nest.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.advance();
                self.advance();
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('/') {
                self.advance();
                self.advance();
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Scans an identifier, keyword, or dollar-quoted string (`$tag$...$tag$`).
    fn scan_identifier_or_dollar(&mut self) -> Token {
        if self.peek() == Some('$') {
            return self.scan_dollar_quoted();
        }

        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            if self.dialect.is_non_keyword(text) {
                self.make_token(TokenKind::Identifier(String::from(text)))
            } else {
                self.make_token(TokenKind::Keyword(keyword))
            }
        } else {
            if text.len() > self.dialect.max_identifier_length {
                return self.error(format!(
                    "identifier '{text}' exceeds maximum length of {} bytes",
                    self.dialect.max_identifier_length
                ));
            }
            self.make_token(TokenKind::Identifier(String::from(text)))
        }
    }

    /// Scans `$$...$$` or `$tag$...$tag$` dollar-quoted strings.
    fn scan_dollar_quoted(&mut self) -> Token {
        self.advance(); // consume opening $
        let tag_start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        let tag = self.input[tag_start..self.pos].to_string();

        if self.peek() != Some('$') {
            return self.error("malformed dollar-quote tag");
        }
        self.advance(); // consume closing $ of opening delimiter

        let delimiter = format!("${tag}$");
        let content_start = self.pos;

        loop {
            if self.input[self.pos..].starts_with(delimiter.as_str()) {
                let value = self.input[content_start..self.pos].to_string();
                self.pos += delimiter.len();
                return self.make_token(TokenKind::String {
                    value,
                    needs_unicode_decode: false,
                });
            }
            if self.advance().is_none() {
                return self.error("unterminated dollar-quoted string");
            }
        }
    }

    /// Scans a quoted identifier (e.g., `"column name"` or `` `column name` ``).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let content_start = self.pos;

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => return self.error("unterminated quoted identifier"),
            }
        }

        let content = &self.input[content_start..self.pos];
        self.advance(); // consume closing quote

        let doubled = format!("{quote}{quote}");
        let unescaped = content.replace(&doubled, &quote.to_string());
        if unescaped.len() > self.dialect.max_identifier_length {
            return self.error(format!(
                "identifier '{unescaped}' exceeds maximum length of {} bytes",
                self.dialect.max_identifier_length
            ));
        }
        self.make_token(TokenKind::QuotedIdentifier(unescaped))
    }

    /// Scans a number: integer, bigint (`L` suffix), float, or hex literal.
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('0') && matches!(self.peek_next(), Some('x' | 'X')) {
            self.advance();
            self.advance();
            let hex_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            let hex_text = &self.input[hex_start..self.pos];
            return match i64::from_str_radix(hex_text, 16) {
                Ok(i) => self.make_token(TokenKind::Integer(i)),
                Err(_) => match i128::from_str_radix(hex_text, 16) {
                    Ok(i) => self.make_token(TokenKind::BigInt(i)),
                    Err(e) => self.error(format!("invalid hex literal: {e}")),
                },
            };
        }

        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let bigint_suffix = !is_float && matches!(self.peek(), Some('L' | 'l'));
        let text = &self.input[self.start..self.pos];

        if is_float {
            return match text.parse::<f64>() {
                Ok(f) => self.make_token(TokenKind::Float(f)),
                Err(e) => self.error(format!("invalid float literal: {e}")),
            };
        }

        if bigint_suffix {
            let result = text.parse::<i128>();
            self.advance(); // consume L/l suffix
            return match result {
                Ok(i) => self.make_token(TokenKind::BigInt(i)),
                Err(e) => self.error(format!("invalid bigint literal: {e}")),
            };
        }

        match text.parse::<i64>() {
            Ok(i) => self.make_token(TokenKind::Integer(i)),
            Err(_) => match text.parse::<i128>() {
                Ok(i) => self.make_token(TokenKind::BigInt(i)),
                Err(e) => self.error(format!("invalid integer literal: {e}")),
            },
        }
    }

    /// Scans a string literal, tracking whether a backslash escape was seen
    /// (backslash escapes are only meaningful in some dialects, so decoding
    /// is deferred to the parser/runtime rather than resolved here).
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();
        let mut needs_unicode_decode = false;

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        value.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some('\\') => {
                    needs_unicode_decode = true;
                    value.push('\\');
                    self.advance();
                    if let Some(c) = self.peek() {
                        value.push(c);
                        self.advance();
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return self.error("unterminated string literal"),
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::String {
            value,
            needs_unicode_decode,
        })
    }

    /// Scans a blob literal (`X'...'`).
    fn scan_blob(&mut self) -> Token {
        self.advance(); // consume X/x
        if self.peek() != Some('\'') {
            return self.scan_identifier_or_dollar();
        }
        self.advance(); // consume opening quote

        let mut bytes = Vec::new();
        let mut hex_chars = String::new();

        loop {
            match self.peek() {
                Some('\'') => break,
                Some(c) if c.is_ascii_hexdigit() => {
                    hex_chars.push(c);
                    self.advance();
                    if hex_chars.len() == 2 {
                        if let Ok(byte) = u8::from_str_radix(&hex_chars, 16) {
                            bytes.push(byte);
                        }
                        hex_chars.clear();
                    }
                }
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some(_) => return self.error("invalid character in blob literal"),
                None => return self.error("unterminated blob literal"),
            }
        }

        if !hex_chars.is_empty() {
            return self.error("odd number of hex digits in blob literal");
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::Blob(bytes))
    }

    /// Scans a `?` positional parameter or a `?N` indexed parameter.
    fn scan_param(&mut self) -> Token {
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            let n: u32 = match self.input[digits_start..self.pos].parse() {
                Ok(n) => n,
                Err(e) => return self.error(format!("invalid parameter index: {e}")),
            };
            if self.param_style == ParamStyle::Positional {
                return self.error(
                    "cannot mix indexed (?N) and unindexed (?) parameter placeholders",
                );
            }
            self.param_style = ParamStyle::Indexed;
            return self.make_token(TokenKind::IndexedParam(n));
        }

        if self.param_style == ParamStyle::Indexed {
            return self.error("cannot mix indexed (?N) and unindexed (?) parameter placeholders");
        }
        self.param_style = ParamStyle::Positional;
        self.make_token(TokenKind::Param)
    }

    /// Scans a named parameter (`:name` or `@name`).
    fn scan_named_param(&mut self) -> Token {
        self.advance(); // consume : or @
        let name_start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        if self.pos == name_start {
            // Bare `:` or `@`; fall back to the punctuation token.
            self.pos = name_start;
            return self.make_token(if self.input.as_bytes()[self.start] == b':' {
                TokenKind::Colon
            } else {
                TokenKind::AtSign
            });
        }
        let name = self.input[name_start..self.pos].to_string();
        self.make_token(TokenKind::NamedParam(name))
    }

    fn rejects_bare_literal(&self, kind: &TokenKind) -> bool {
        self.dialect.forbids_literals()
            && matches!(
                kind,
                TokenKind::Integer(_)
                    | TokenKind::BigInt(_)
                    | TokenKind::Float(_)
                    | TokenKind::String { .. }
                    | TokenKind::Blob(_)
            )
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        let token = match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),
            '?' => {
                self.pos = self.start + 1;
                self.scan_param()
            }

            '.' => self.make_token(TokenKind::Dot),
            ':' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::Assign)
                } else if self.peek() == Some(':') {
                    self.advance();
                    self.make_token(TokenKind::DoubleColon)
                } else {
                    self.pos = self.start;
                    self.scan_named_param()
                }
            }
            '@' => {
                self.pos = self.start;
                self.scan_named_param()
            }
            '=' => self.make_token(TokenKind::Eq),
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else if self.peek() == Some('<') {
                    self.advance();
                    self.make_token(TokenKind::LeftShift)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::RightShift)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else if self.peek() == Some('~') {
                    self.advance();
                    self.make_token(TokenKind::NotMatch)
                } else {
                    self.error("unexpected character: !")
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    self.make_token(TokenKind::AndAnd)
                } else {
                    self.make_token(TokenKind::BitAnd)
                }
            }

            '\'' => {
                self.pos = self.start;
                self.scan_string('\'')
            }

            '"' => {
                self.pos = self.start;
                self.scan_quoted_identifier('"')
            }
            '`' => {
                self.pos = self.start;
                self.scan_quoted_identifier('`')
            }

            '$' => {
                self.pos = self.start;
                self.scan_dollar_quoted()
            }

            'X' | 'x' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_blob()
            }

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_identifier_or_dollar()
            }

            _ => self.error(format!("unexpected character: {c}")),
        };

        if self.rejects_bare_literal(&token.kind) {
            return self.error("bare literals are not allowed by the active dialect; use a bind parameter");
        }

        token
    }

    /// Tokenizes the entire input and returns all tokens, including a
    /// trailing EOF token.
    ///
    /// Adjacent character-string literals separated only by whitespace are
    /// merged into a single `String` token whose value is their
    /// concatenation, per the SQL string-concatenation rule.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();

            if let TokenKind::String {
                value: next_value,
                needs_unicode_decode: next_decode,
            } = &token.kind
            {
                if let Some(prev) = tokens.last_mut() {
                    if let TokenKind::String {
                        value: prev_value,
                        needs_unicode_decode: prev_decode,
                    } = &mut prev.kind
                    {
                        if self.input[prev.span.end..token.span.start]
                            .chars()
                            .all(char::is_whitespace)
                        {
                            prev_value.push_str(next_value);
                            *prev_decode = *prev_decode || *next_decode;
                            prev.span = prev.span.merge(token.span);
                            continue;
                        }
                    }
                }
            }

            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn string_tok(s: &str) -> TokenKind {
        TokenKind::String {
            value: s.to_string(),
            needs_unicode_decode: false,
        }
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = tokenize("   \n\t  ");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_line_comment_styles() {
        assert_eq!(
            token_kinds("SELECT -- dash comment\nFROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            token_kinds("SELECT // slash comment\nFROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_multi_line_comment() {
        assert_eq!(
            token_kinds("SELECT /* comment */ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("select FROM wHeRe"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            token_kinds("foo bar_baz _qux"),
            vec![
                TokenKind::Identifier(String::from("foo")),
                TokenKind::Identifier(String::from("bar_baz")),
                TokenKind::Identifier(String::from("_qux")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_identifiers_are_never_keywords() {
        assert_eq!(
            token_kinds("\"select\" `another`"),
            vec![
                TokenKind::QuotedIdentifier(String::from("select")),
                TokenKind::QuotedIdentifier(String::from("another")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_integers_and_bigint_suffix() {
        assert_eq!(
            token_kinds("42 0 9223372036854775807L"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Integer(0),
                TokenKind::BigInt(9_223_372_036_854_775_807),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_hex_literal() {
        assert_eq!(
            token_kinds("0xFF 0x10"),
            vec![TokenKind::Integer(255), TokenKind::Integer(16), TokenKind::Eof,]
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(
            token_kinds("3.14 0.5 1e10 2.5e-3"),
            vec![
                TokenKind::Float(3.14),
                TokenKind::Float(0.5),
                TokenKind::Float(1e10),
                TokenKind::Float(2.5e-3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(token_kinds("'hello'"), vec![string_tok("hello"), TokenKind::Eof,]);
    }

    #[test]
    fn test_adjacent_strings_concatenate() {
        assert_eq!(
            token_kinds("'hello' 'world'"),
            vec![string_tok("helloworld"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_three_adjacent_strings_concatenate() {
        assert_eq!(
            token_kinds("'a'\n'b' 'c'"),
            vec![string_tok("abc"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_non_adjacent_strings_stay_separate() {
        assert_eq!(
            token_kinds("'a', 'b'"),
            vec![
                string_tok("a"),
                TokenKind::Comma,
                string_tok("b"),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(token_kinds("'it''s'"), vec![string_tok("it's"), TokenKind::Eof,]);
    }

    #[test]
    fn test_dollar_quoted_string() {
        assert_eq!(
            token_kinds("$$it's raw$$"),
            vec![string_tok("it's raw"), TokenKind::Eof,]
        );
        assert_eq!(
            token_kinds("$tag$contains $$ inside$tag$"),
            vec![string_tok("contains $$ inside"), TokenKind::Eof,]
        );
    }

    #[test]
    fn test_blob() {
        let tokens = tokenize("X'48454C4C4F'");
        assert_eq!(tokens.len(), 2);
        assert!(
            matches!(&tokens[0].kind, TokenKind::Blob(b) if b == &[0x48, 0x45, 0x4C, 0x4C, 0x4F])
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("+ - * / % = != <> < <= > >= !~"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::NotMatch,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positional_param() {
        assert_eq!(
            token_kinds("? ?"),
            vec![TokenKind::Param, TokenKind::Param, TokenKind::Eof,]
        );
    }

    #[test]
    fn test_indexed_param() {
        assert_eq!(
            token_kinds("?1 ?2"),
            vec![
                TokenKind::IndexedParam(1),
                TokenKind::IndexedParam(2),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_mixed_params_rejected() {
        let tokens = tokenize("?1 ?");
        assert!(matches!(tokens[1].kind, TokenKind::Error(_)));
    }

    #[test]
    fn test_named_param() {
        assert_eq!(
            token_kinds(":name @other"),
            vec![
                TokenKind::NamedParam(String::from("name")),
                TokenKind::NamedParam(String::from("other")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_length_guard() {
        let dialect = DialectFlags {
            max_identifier_length: 4,
            ..DialectFlags::default()
        };
        let tokens = Lexer::with_dialect("abcdefgh", dialect).tokenize();
        assert!(matches!(tokens[0].kind, TokenKind::Error(_)));
    }

    #[test]
    fn test_literals_forbidden_policy() {
        let dialect = DialectFlags {
            literals_policy: crate::dialect::LiteralsPolicy::Forbidden,
            ..DialectFlags::default()
        };
        let tokens = Lexer::with_dialect("42", dialect).tokenize();
        assert!(matches!(tokens[0].kind, TokenKind::Error(_)));
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT id");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 9));
    }

    #[test]
    fn test_simple_select() {
        let sql = "SELECT id, name FROM users WHERE active = 1";
        assert_eq!(
            token_kinds(sql),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Identifier(String::from("id")),
                TokenKind::Comma,
                TokenKind::Identifier(String::from("name")),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Identifier(String::from("users")),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Identifier(String::from("active")),
                TokenKind::Eq,
                TokenKind::Integer(1),
                TokenKind::Eof,
            ]
        );
    }
}
