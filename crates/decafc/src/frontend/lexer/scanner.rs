//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, Span};
use logos::Logos;

/// Lexer for Decaf source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    peeked: Option<Token>,
    at_eof: bool,
    /// Offset up to which newlines have been counted
    counted: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            peeked: None,
            at_eof: false,
            counted: 0,
            line: 1,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len, self.line)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let range = self.inner.span();
                let line = self.line_at(range.start);
                Ok(Token::new(kind, Span::new(range.start, range.end, line)))
            }
            Some(Err(())) => {
                let range = self.inner.span();
                let line = self.line_at(range.start);
                Err(CompileError::lexer(
                    format!("unexpected character '{}'", self.inner.slice()),
                    Span::new(range.start, range.end, line),
                ))
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                let line = self.line_at(len);
                Ok(Token::new(TokenKind::Eof, Span::new(len, len, line)))
            }
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> CompileResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Get the source being lexed
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }

    // Offsets only move forward, so newlines are counted incrementally.
    fn line_at(&mut self, offset: usize) -> u32 {
        let source = self.inner.source();
        let newlines = source[self.counted..offset].bytes().filter(|&b| b == b'\n').count();
        self.line += newlines as u32;
        self.counted = offset;
        self.line
    }
}
