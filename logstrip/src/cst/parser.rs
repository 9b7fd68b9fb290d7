//! Tree-sitter based parser for JavaScript source code.
//!
//! Provides precise byte-range information for safe statement removal.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

use crate::utils::LineIndex;

/// Error during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to load the JavaScript grammar into the parser.
    #[error("failed to load JavaScript grammar: {0}")]
    Language(String),

    /// The parser produced no tree at all.
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The source is not syntactically valid JavaScript.
    ///
    /// Tree-sitter always yields a tree; a root containing error or missing
    /// nodes is treated as a parse failure and the whole file is rejected.
    #[error("syntax error at line {line}, column {column}")]
    Syntax {
        /// 1-indexed line of the first error node.
        line: usize,
        /// 1-indexed column (byte offset within the line) of the first error node.
        column: usize,
    },
}

/// A parsed JavaScript source file.
///
/// Owns both the Tree-sitter tree and the original source so that node byte
/// ranges can always be resolved back to text.
#[derive(Debug)]
pub struct JsTree {
    tree: Tree,
    source: String,
}

impl JsTree {
    /// Returns the root node of the tree.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns the original source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Extracts a slice of source code by byte range.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[start..end]
    }
}

/// Tree-sitter based JavaScript parser.
pub struct JsParser {
    parser: Parser,
}

impl JsParser {
    /// Creates a new parser with the JavaScript grammar loaded.
    ///
    /// # Errors
    /// Returns an error if the grammar version is incompatible with the
    /// linked Tree-sitter runtime.
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();

        // Use the LANGUAGE constant exported by the tree-sitter-javascript crate
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parses source code into a [`JsTree`].
    ///
    /// # Errors
    /// Returns [`ParseError::Syntax`] when the source is not valid
    /// JavaScript; no partial tree is exposed in that case.
    pub fn parse(&mut self, source: &str) -> Result<JsTree, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;

        let root = tree.root_node();
        if root.has_error() {
            let offset = first_error_offset(root).unwrap_or_else(|| root.start_byte());
            let (line, column) = LineIndex::new(source).line_col(offset);
            return Err(ParseError::Syntax { line, column });
        }

        Ok(JsTree {
            tree,
            source: source.to_owned(),
        })
    }
}

/// Finds the byte offset of the first error or missing node in the tree.
fn first_error_offset(node: Node<'_>) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_byte());
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i as u32) {
            if child.has_error() || child.is_missing() {
                if let Some(offset) = first_error_offset(child) {
                    return Some(offset);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_program() {
        let source = "var x = 1;\ndoWork();\n";
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse(source).unwrap();

        assert_eq!(tree.root().kind(), "program");
        assert_eq!(tree.root().start_byte(), 0);
        assert_eq!(tree.root().end_byte(), source.len());
    }

    #[test]
    fn test_parse_module_syntax() {
        let source = "import trace from \"trace-pkg\";\nexport default trace;\n";
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse(source).unwrap();
        assert!(!tree.root().has_error());
    }

    #[test]
    fn test_syntax_error_reported_with_location() {
        let source = "var x = ;\n";
        let mut parser = JsParser::new().unwrap();
        let err = parser.parse(source).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_unclosed_brace_is_rejected() {
        let source = "function f() {\n  return 1;\n";
        let mut parser = JsParser::new().unwrap();
        assert!(matches!(
            parser.parse(source),
            Err(ParseError::Syntax { .. })
        ));
    }

    #[test]
    fn test_slice_matches_node_range() {
        let source = "logger.debug(\"x\");";
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse(source).unwrap();

        let stmt = tree.root().named_child(0).unwrap();
        assert_eq!(tree.slice(stmt.start_byte(), stmt.end_byte()), source);
    }
}
