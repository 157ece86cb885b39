#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Once};

use crate::lexer::tokens::Token;

pub mod errors;
pub mod lexer;
pub mod macros;

/// 1-based line number in the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(pub u32);

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a token came from: the line it starts on and its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub line: Position,
    pub start: usize,
    pub end: usize,
}

/// Renders a token listing the way downstream tooling expects it,
/// one `KIND lexeme literal` line per token.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();

    for token in tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }

    out
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=scanner=debug` or
/// `RUST_LOG=scanner=trace`; events go to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
