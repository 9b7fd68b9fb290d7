//! CST (Concrete Syntax Tree) module for the JavaScript transform.
//!
//! This module provides Tree-sitter based parsing for:
//! - Precise byte-range information for safe statement removal
//! - Null-tolerant extraction of nested node fields for pattern matching
//!
//! # Design Principles
//!
//! - **Byte-range anchored**: All removal decisions produce `[start, end)`
//!   byte ranges into the original text
//! - **Absence is data**: A missing nested field means "does not match",
//!   never an error

mod parser;
mod path;

pub use parser::{JsParser, JsTree, ParseError};
pub use path::{extract, identifier_name, string_value, PathStep};
