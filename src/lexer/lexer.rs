use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::tokens::{Literal, Token, TokenKind};

/// Everything a single pass produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<Error>,
}

impl ScanResult {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    errors: Vec<Error>,
    source: &'a [u8],
    pos: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            errors: vec![],
            source,
            pos: 0,
            line: 1,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        if token.is_one_of_many(&[TokenKind::String, TokenKind::Number, TokenKind::Identifier]) {
            trace!(kind = %token.kind, lexeme = %token.lexeme, literal = %token.literal, line = self.line, "token");
        } else {
            trace!(kind = %token.kind, line = self.line, "token");
        }
        self.tokens.push(token);
    }

    pub fn at(&self) -> u8 {
        self.source[self.pos]
    }

    /// Byte `offset` positions past the cursor, if the input reaches that far.
    pub fn peek(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn report(&mut self, error_impl: ErrorImpl, line: u32) {
        let error = Error::new(error_impl, Position(line));
        debug!(error = error.get_error_name(), line, "{}", error);
        self.errors.push(error);
    }

    fn text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.source[start..end]).into_owned()
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span {
            line: Position(self.line),
            start,
            end,
        }
    }

    /// Emits a punctuation token of `len` bytes at the cursor.
    fn simple(&mut self, kind: TokenKind, len: usize) {
        let start = self.pos;
        let lexeme = self.text(start, start + len);
        let span = self.span(start, start + len);
        self.push(MK_TOKEN!(kind, lexeme, Literal::Null, span));
        self.advance_n(len);
    }

    /// `one` on its own, or `two` when the next byte is `=`.
    fn one_or_two(&mut self, one: TokenKind, two: TokenKind) {
        if self.peek(1) == Some(b'=') {
            self.simple(two, 2);
        } else {
            self.simple(one, 1);
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.at_eof() && self.at() != b'\n' {
            self.advance_n(1);
        }
    }

    fn skip_digits(&mut self) {
        while !self.at_eof() && self.at().is_ascii_digit() {
            self.advance_n(1);
        }
    }

    fn string(&mut self) {
        let start = self.pos;
        let start_line = self.line;
        self.advance_n(1);

        while !self.at_eof() && self.at() != b'"' {
            if self.at() == b'\n' {
                self.line += 1;
            }
            self.advance_n(1);
        }

        if self.at_eof() {
            self.report(ErrorImpl::UnterminatedString, start_line);
            return;
        }

        self.advance_n(1);
        let lexeme = self.text(start, self.pos);
        let literal = Literal::Str(self.text(start + 1, self.pos - 1));
        let span = Span {
            line: Position(start_line),
            start,
            end: self.pos,
        };
        self.push(MK_TOKEN!(TokenKind::String, lexeme, literal, span));
    }

    fn number(&mut self) {
        let start = self.pos;
        self.skip_digits();

        match (self.peek(0), self.peek(1)) {
            (Some(b'.'), Some(next)) if next.is_ascii_digit() => {
                self.advance_n(1);
                self.skip_digits();
            }
            // A dot that ends the input belongs to the number.
            (Some(b'.'), None) => self.advance_n(1),
            _ => {}
        }

        let lexeme = self.text(start, self.pos);
        let literal = Literal::Number(normalize_number(&lexeme));
        let span = self.span(start, self.pos);
        self.push(MK_TOKEN!(TokenKind::Number, lexeme, literal, span));
    }

    fn identifier(&mut self) {
        let start = self.pos;
        while !self.at_eof() && is_identifier_continue(self.at()) {
            self.advance_n(1);
        }

        let lexeme = self.text(start, self.pos);
        let span = self.span(start, self.pos);
        self.push(MK_TOKEN!(TokenKind::Identifier, lexeme, Literal::Null, span));
    }

    fn scan_token(&mut self) {
        match self.at() {
            b'(' => self.simple(TokenKind::LeftParen, 1),
            b')' => self.simple(TokenKind::RightParen, 1),
            b'{' => self.simple(TokenKind::LeftBrace, 1),
            b'}' => self.simple(TokenKind::RightBrace, 1),
            b',' => self.simple(TokenKind::Comma, 1),
            b'.' => self.simple(TokenKind::Dot, 1),
            b'-' => self.simple(TokenKind::Minus, 1),
            b'+' => self.simple(TokenKind::Plus, 1),
            b';' => self.simple(TokenKind::Semicolon, 1),
            b'*' => self.simple(TokenKind::Star, 1),
            b'=' => self.one_or_two(TokenKind::Equal, TokenKind::EqualEqual),
            b'!' => self.one_or_two(TokenKind::Bang, TokenKind::BangEqual),
            b'<' => self.one_or_two(TokenKind::Less, TokenKind::LessEqual),
            b'>' => self.one_or_two(TokenKind::Greater, TokenKind::GreaterEqual),
            b'/' if self.peek(1) == Some(b'/') => self.skip_line_comment(),
            b'/' => self.simple(TokenKind::Slash, 1),
            b' ' | b'\r' | b'\t' => self.advance_n(1),
            b'\n' => {
                self.line += 1;
                self.advance_n(1);
            }
            b'"' => self.string(),
            b'0'..=b'9' => self.number(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),
            other => {
                self.report(
                    ErrorImpl::UnexpectedCharacter {
                        character: other as char,
                    },
                    self.line,
                );
                self.advance_n(1);
            }
        }
    }

    pub fn finish(mut self) -> ScanResult {
        let span = self.span(self.pos, self.pos);
        self.push(MK_TOKEN!(TokenKind::EOF, String::new(), Literal::Null, span));

        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            lines = self.line,
            "scan finished"
        );

        ScanResult {
            tokens: self.tokens,
            errors: self.errors,
        }
    }
}

fn is_identifier_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Canonical decimal form of a numeric lexeme.
///
/// Integers gain `.0`, a bare trailing dot gains `0`, and a fraction ending
/// in zeros keeps exactly one of them (`123.400` -> `123.40`).
pub fn normalize_number(lexeme: &str) -> String {
    if lexeme.ends_with('.') {
        format!("{}0", lexeme)
    } else if !lexeme.contains('.') {
        format!("{}.0", lexeme)
    } else if lexeme.ends_with('0') {
        format!("{}0", lexeme.trim_end_matches('0'))
    } else {
        lexeme.to_string()
    }
}

/// Scans `source` in a single pass, collecting every lexical error.
pub fn tokenize(source: &[u8]) -> ScanResult {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        lex.scan_token();
    }

    lex.finish()
}

/// Tokens plus whether any lexical error occurred.
pub fn scan(source: &[u8]) -> (Vec<Token>, bool) {
    let result = tokenize(source);
    let had_error = result.had_error();
    (result.tokens, had_error)
}
