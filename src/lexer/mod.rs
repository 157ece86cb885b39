//! Lexical analysis module for the scanner.
//!
//! This module contains the lexer (tokenizer) that converts source bytes
//! into a flat stream of tokens. It handles:
//!
//! - Single- and two-character punctuation with one byte of lookahead
//! - Identifiers, string literals and numeric literals
//! - Line tracking for diagnostics
//! - Comments and whitespace handling
//! - Collecting lexical errors without stopping the pass

pub mod lexer;
pub mod tokens;
