//! scanner: tokenizes a source file and prints the token listing.
//!
//! Usage:
//!   scanner tokenize <FILE>

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use clap::{error::ErrorKind, Parser, Subcommand};
use scanner::{init_tracing, lexer::lexer::tokenize, render_tokens};
use tracing::debug;

/// Exit code signalling that the input had lexical errors.
const EXIT_LEXICAL_ERROR: i32 = 65;
const EXIT_USAGE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "scanner", version, about = "Lexical scanner for a small C-like scripting language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every token of FILE, one per line.
    Tokenize {
        /// Source file to scan.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(EXIT_USAGE);
            }
        },
    };

    match cli.command {
        Command::Tokenize { file } => process::exit(run_tokenize(&file)),
    }
}

fn run_tokenize(file: &Path) -> i32 {
    let contents = match fs::read(file) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return EXIT_USAGE;
        }
    };

    debug!(file = %file.display(), bytes = contents.len(), "read source");

    let result = tokenize(&contents);

    for error in &result.errors {
        eprintln!("{}", error);
    }

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout
        .write_all(render_tokens(&result.tokens).as_bytes())
        .and_then(|_| stdout.flush())
    {
        eprintln!("Error writing tokens: {}", e);
        return EXIT_USAGE;
    }

    if result.had_error() {
        EXIT_LEXICAL_ERROR
    } else {
        0
    }
}
