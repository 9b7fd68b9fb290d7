//! Traversal driver and public transform API.
//!
//! One call processes one file's text to completion: parse, a single
//! depth-first pre-order walk consulting the rule table, then one splice
//! pass producing the output text and position map. A [`Stripper`] is
//! immutable after construction and can be reused across files, including
//! concurrently from several threads.

use tree_sitter::Node;

use crate::cst::JsParser;
use crate::error::StripError;
use crate::rules::{MatchCriteria, NodeKind, RuleSet, Verdict};
use crate::splice::{ByteSpan, PositionMap, SpliceBuffer, SpliceError};

/// Observational sink for per-node trace messages. Never affects results.
type DiagnosticHook = Box<dyn Fn(&str) + Send + Sync>;

/// Result of a transform that changed the file.
#[derive(Debug)]
pub struct StripOutput {
    /// The stripped source text.
    pub code: String,
    /// Mapping from offsets in `code` back to offsets in the original text.
    pub map: PositionMap,
    /// The removed original-text ranges, in traversal order.
    pub removed_spans: Vec<ByteSpan>,
    /// Ranges of return statements whose argument was logically discarded.
    ///
    /// These statements' text is intentionally left verbatim in `code`; the
    /// logical shape change is only visible through this overlay. Tooling
    /// that consumes the transform result rather than the text can act on
    /// it.
    pub suppressed_returns: Vec<ByteSpan>,
}

impl StripOutput {
    /// Number of return statements whose argument was discarded.
    #[must_use]
    pub fn suppressed_return_count(&self) -> usize {
        self.suppressed_returns.len()
    }
}

/// Strips tracked logging constructs from JavaScript sources.
pub struct Stripper {
    rules: RuleSet,
    diagnostics: Option<DiagnosticHook>,
}

impl Stripper {
    /// Creates a stripper for the given criteria.
    #[must_use]
    pub fn new(criteria: MatchCriteria) -> Self {
        Self {
            rules: RuleSet::new(criteria),
            diagnostics: None,
        }
    }

    /// Attaches a diagnostic sink receiving one message per removed or
    /// updated node, with the original text slice. Purely observational.
    #[must_use]
    pub fn with_diagnostics(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.diagnostics = Some(Box::new(hook));
        self
    }

    /// The criteria this stripper matches against.
    #[must_use]
    pub fn criteria(&self) -> &MatchCriteria {
        self.rules.criteria()
    }

    /// Transforms one file's source text.
    ///
    /// Returns `Ok(None)` when nothing matched — the no-op signal; callers
    /// must leave downstream state for this file untouched. Otherwise the
    /// output carries the stripped text and the position map.
    ///
    /// # Errors
    /// Propagates parse failures as-is; the file's transform aborts with no
    /// partial output.
    pub fn strip(&self, source: &str) -> Result<Option<StripOutput>, StripError> {
        let tree = JsParser::new()?.parse(source)?;

        let mut buffer = SpliceBuffer::new(source);
        let mut suppressed_returns = Vec::new();
        self.visit(tree.root(), source, &mut buffer, &mut suppressed_returns)?;

        if !buffer.has_edits() && suppressed_returns.is_empty() {
            return Ok(None);
        }

        let removed_spans = buffer.spans().to_vec();
        let (code, map) = buffer.apply()?;
        Ok(Some(StripOutput {
            code,
            map,
            removed_spans,
            suppressed_returns,
        }))
    }

    /// Pre-order walk. On a Remove or Update verdict the node's subtree is
    /// never descended into: matching inside a deleted range is meaningless
    /// and skipping it is what keeps all removals disjoint.
    fn visit(
        &self,
        node: Node<'_>,
        source: &str,
        buffer: &mut SpliceBuffer<'_>,
        suppressed_returns: &mut Vec<ByteSpan>,
    ) -> Result<(), SpliceError> {
        if let Some(kind) = NodeKind::from_kind(node.kind()) {
            match self.rules.decide(kind, node, source) {
                Verdict::Remove => {
                    self.trace("Removing", node, source);
                    buffer.remove(node.start_byte(), node.end_byte())?;
                    return Ok(());
                }
                Verdict::Update => {
                    self.trace("Updating", node, source);
                    suppressed_returns.push(ByteSpan::new(node.start_byte(), node.end_byte()));
                    return Ok(());
                }
                Verdict::None => {}
            }
        }

        for i in 0..node.named_child_count() {
            if let Some(child) = node.named_child(i as u32) {
                self.visit(child, source, buffer, suppressed_returns)?;
            }
        }
        Ok(())
    }

    /// Emits one diagnostic line if a sink is attached. The slice is only
    /// formatted when a sink is present.
    fn trace(&self, action: &str, node: Node<'_>, source: &str) {
        if let Some(hook) = &self.diagnostics {
            hook(&format!(
                "{action}: {}",
                &source[node.start_byte()..node.end_byte()]
            ));
        }
    }
}
