//! Error types for the scanner.
//!
//! This module defines the lexical error records produced during a scan:
//!
//! - Error structures carrying the line they were found on
//! - The two lexical error variants
//! - Formatting into the `[line N] Error: ...` diagnostic form

pub mod errors;
