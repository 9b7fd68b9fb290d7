//! Match criteria and per-node-kind decision rules.
//!
//! The rule set is built once per transform configuration and consulted for
//! every visited node. Matching is purely syntactic and single-node-local:
//! no scope resolution, no parent chain. Any absent nested field means "does
//! not match this rule", so under-matching (leaving code unstripped) is the
//! only failure mode.

use rustc_hash::FxHashSet;
use tree_sitter::Node;

use crate::cst::{extract, identifier_name, string_value, PathStep};

/// Names that activate the removal rules, supplied once per configuration.
///
/// Each set may be empty, in which case every rule keyed to it is inert.
#[derive(Debug, Default, Clone)]
pub struct MatchCriteria {
    /// Bare variable names: strips declarations, assignments, calls and
    /// returned values referencing them.
    pub variables: FxHashSet<String>,
    /// Member property names: strips member assignments and member calls on
    /// these properties regardless of receiver.
    pub properties: FxHashSet<String>,
    /// Module specifiers: strips import statements whose source exactly
    /// equals one of these.
    pub packages: FxHashSet<String>,
}

impl MatchCriteria {
    /// Builds criteria from plain name lists.
    #[must_use]
    pub fn from_names<I, J, K>(variables: I, properties: J, packages: K) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
        K: IntoIterator<Item = String>,
    {
        Self {
            variables: variables.into_iter().collect(),
            properties: properties.into_iter().collect(),
            packages: packages.into_iter().collect(),
        }
    }

    /// Whether all three sets are empty (no rule can ever fire).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.properties.is_empty() && self.packages.is_empty()
    }
}

/// Per-node traversal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Leave the node untouched and keep descending.
    None,
    /// Delete the node's full original text range; do not descend.
    Remove,
    /// Keep the node's text but discard its logical argument; do not descend.
    Update,
}

/// The closed vocabulary of node kinds the rules care about.
///
/// All other kinds are not represented and pass through untouched without
/// invoking any rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `var`/`let`/`const` declaration statement.
    Declaration,
    /// Assignment expression, including compound operators (`+=` etc.).
    Assignment,
    /// Statement consisting of a bare expression, e.g. a call.
    ExpressionStatement,
    /// `import ... from "..."` statement.
    ImportDeclaration,
    /// `return ...` statement.
    ReturnStatement,
}

impl NodeKind {
    /// Maps a Tree-sitter grammar kind to the rule vocabulary.
    ///
    /// A `None` return is the miss fast path: the traversal descends without
    /// consulting any rule.
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "variable_declaration" | "lexical_declaration" => Some(Self::Declaration),
            "assignment_expression" | "augmented_assignment_expression" => Some(Self::Assignment),
            "expression_statement" => Some(Self::ExpressionStatement),
            "import_statement" => Some(Self::ImportDeclaration),
            "return_statement" => Some(Self::ReturnStatement),
            _ => None,
        }
    }
}

/// The rule table: one decision per tracked node kind.
///
/// Emptiness of the criteria sets is computed once at construction, not per
/// node; a traversal may consult the rules thousands of times per file.
#[derive(Debug, Clone)]
pub struct RuleSet {
    criteria: MatchCriteria,
    no_variables: bool,
    no_variables_or_properties: bool,
    no_packages: bool,
}

impl RuleSet {
    /// Builds the rule table from the given criteria.
    #[must_use]
    pub fn new(criteria: MatchCriteria) -> Self {
        let no_variables = criteria.variables.is_empty();
        let no_variables_or_properties = no_variables && criteria.properties.is_empty();
        let no_packages = criteria.packages.is_empty();
        Self {
            criteria,
            no_variables,
            no_variables_or_properties,
            no_packages,
        }
    }

    /// The criteria this table was built from.
    #[must_use]
    pub fn criteria(&self) -> &MatchCriteria {
        &self.criteria
    }

    /// Decides what to do with one node of the given kind.
    #[must_use]
    pub fn decide(&self, kind: NodeKind, node: Node<'_>, source: &str) -> Verdict {
        match kind {
            NodeKind::Declaration => self.decide_declaration(node, source),
            NodeKind::Assignment => self.decide_assignment(node, source),
            NodeKind::ExpressionStatement => self.decide_expression_statement(node, source),
            NodeKind::ImportDeclaration => self.decide_import(node, source),
            NodeKind::ReturnStatement => self.decide_return(node, source),
        }
    }

    /// `var x = ...`: matches when the first declared binding's name is a
    /// tracked variable.
    fn decide_declaration(&self, node: Node<'_>, source: &str) -> Verdict {
        if self.no_variables {
            return Verdict::None;
        }
        let name = identifier_name(
            extract(
                Some(node),
                &[PathStep::NamedChild(0), PathStep::Field("name")],
            ),
            source,
        );
        match name {
            Some(name) if self.criteria.variables.contains(name) => Verdict::Remove,
            _ => Verdict::None,
        }
    }

    /// `a.b = ...` / `a = ...`: member targets match on the property name,
    /// plain identifier targets on the variable name.
    fn decide_assignment(&self, node: Node<'_>, source: &str) -> Verdict {
        if self.no_variables_or_properties {
            return Verdict::None;
        }
        let left = extract(Some(node), &[PathStep::Field("left")]);
        let matched = if left.is_some_and(|n| n.kind() == "member_expression") {
            identifier_name(extract(left, &[PathStep::Field("property")]), source)
                .is_some_and(|name| self.criteria.properties.contains(name))
        } else {
            identifier_name(left, source).is_some_and(|name| self.criteria.variables.contains(name))
        };
        if matched {
            Verdict::Remove
        } else {
            Verdict::None
        }
    }

    /// Bare call statement: matches when the callee's property, the callee
    /// receiver chain's property, or the callee's object variable is
    /// tracked.
    ///
    /// Both member paths are checked against the property set so that
    /// `logger.debug(...)` and `this.logger.debug(...)` are each caught by
    /// tracking the relevant property name.
    fn decide_expression_statement(&self, node: Node<'_>, source: &str) -> Verdict {
        if self.no_variables_or_properties {
            return Verdict::None;
        }
        let callee = extract(
            Some(node),
            &[PathStep::NamedChild(0), PathStep::Field("function")],
        );

        let callee_property = identifier_name(extract(callee, &[PathStep::Field("property")]), source);
        if callee_property.is_some_and(|name| self.criteria.properties.contains(name)) {
            return Verdict::Remove;
        }

        let receiver_property = identifier_name(
            extract(
                callee,
                &[PathStep::Field("object"), PathStep::Field("property")],
            ),
            source,
        );
        if receiver_property.is_some_and(|name| self.criteria.properties.contains(name)) {
            return Verdict::Remove;
        }

        let object = identifier_name(extract(callee, &[PathStep::Field("object")]), source);
        if object.is_some_and(|name| self.criteria.variables.contains(name)) {
            return Verdict::Remove;
        }

        Verdict::None
    }

    /// `import ... from "pkg"`: matches when the module specifier exactly
    /// equals a tracked package name.
    fn decide_import(&self, node: Node<'_>, source: &str) -> Verdict {
        if self.no_packages {
            return Verdict::None;
        }
        let specifier = string_value(extract(Some(node), &[PathStep::Field("source")]), source);
        match specifier {
            Some(specifier) if self.criteria.packages.contains(specifier) => Verdict::Remove,
            _ => Verdict::None,
        }
    }

    /// `return x;`: matches when the returned identifier is a tracked
    /// variable. The statement's text is kept; only the logical argument is
    /// discarded.
    fn decide_return(&self, node: Node<'_>, source: &str) -> Verdict {
        if self.no_variables {
            return Verdict::None;
        }
        let argument = identifier_name(extract(Some(node), &[PathStep::NamedChild(0)]), source);
        match argument {
            Some(name) if self.criteria.variables.contains(name) => Verdict::Update,
            _ => Verdict::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{JsParser, JsTree};

    fn parse(source: &str) -> JsTree {
        JsParser::new().unwrap().parse(source).unwrap()
    }

    fn variables(names: &[&str]) -> MatchCriteria {
        MatchCriteria::from_names(
            names.iter().map(|s| (*s).to_owned()),
            std::iter::empty(),
            std::iter::empty(),
        )
    }

    fn properties(names: &[&str]) -> MatchCriteria {
        MatchCriteria::from_names(
            std::iter::empty(),
            names.iter().map(|s| (*s).to_owned()),
            std::iter::empty(),
        )
    }

    /// Decides the verdict for the first statement of `source`.
    fn first_statement_verdict(source: &str, criteria: MatchCriteria) -> Verdict {
        let tree = parse(source);
        let text = tree.source().to_owned();
        let rules = RuleSet::new(criteria);
        let stmt = tree.root().named_child(0).unwrap();
        match NodeKind::from_kind(stmt.kind()) {
            Some(kind) => rules.decide(kind, stmt, &text),
            None => Verdict::None,
        }
    }

    #[test]
    fn test_kind_vocabulary() {
        assert_eq!(
            NodeKind::from_kind("variable_declaration"),
            Some(NodeKind::Declaration)
        );
        assert_eq!(
            NodeKind::from_kind("lexical_declaration"),
            Some(NodeKind::Declaration)
        );
        assert_eq!(
            NodeKind::from_kind("import_statement"),
            Some(NodeKind::ImportDeclaration)
        );
        assert_eq!(NodeKind::from_kind("call_expression"), None);
        assert_eq!(NodeKind::from_kind("function_declaration"), None);
    }

    #[test]
    fn test_declaration_matches_tracked_variable() {
        let verdict = first_statement_verdict("var trace = 1;", variables(&["trace"]));
        assert_eq!(verdict, Verdict::Remove);
    }

    #[test]
    fn test_lexical_declaration_matches() {
        let verdict = first_statement_verdict("const trace = mk();", variables(&["trace"]));
        assert_eq!(verdict, Verdict::Remove);
    }

    #[test]
    fn test_declaration_untracked_is_none() {
        let verdict = first_statement_verdict("var other = 1;", variables(&["trace"]));
        assert_eq!(verdict, Verdict::None);
    }

    #[test]
    fn test_declaration_inert_with_empty_variables() {
        let verdict = first_statement_verdict("var trace = 1;", properties(&["trace"]));
        assert_eq!(verdict, Verdict::None);
    }

    #[test]
    fn test_member_call_matches_property() {
        let verdict = first_statement_verdict("logger.debug(\"x\");", properties(&["debug"]));
        assert_eq!(verdict, Verdict::Remove);
    }

    #[test]
    fn test_receiver_chain_call_matches_property() {
        let verdict =
            first_statement_verdict("this.logger.debug(\"x\");", properties(&["logger"]));
        assert_eq!(verdict, Verdict::Remove);
    }

    #[test]
    fn test_call_on_tracked_object_variable() {
        let verdict = first_statement_verdict("trace.log(42);", variables(&["trace"]));
        assert_eq!(verdict, Verdict::Remove);
    }

    #[test]
    fn test_plain_call_is_none() {
        let verdict = first_statement_verdict("run();", properties(&["debug"]));
        assert_eq!(verdict, Verdict::None);
    }

    #[test]
    fn test_import_matches_exact_specifier() {
        let criteria = MatchCriteria::from_names(
            std::iter::empty(),
            std::iter::empty(),
            std::iter::once("trace-pkg".to_owned()),
        );
        let verdict = first_statement_verdict("import trace from \"trace-pkg\";", criteria);
        assert_eq!(verdict, Verdict::Remove);
    }

    #[test]
    fn test_import_prefix_does_not_match() {
        let criteria = MatchCriteria::from_names(
            std::iter::empty(),
            std::iter::empty(),
            std::iter::once("trace".to_owned()),
        );
        let verdict = first_statement_verdict("import trace from \"trace-pkg\";", criteria);
        assert_eq!(verdict, Verdict::None);
    }

    #[test]
    fn test_return_tracked_identifier_is_update() {
        let tree = parse("function f() { return trace; }");
        let text = tree.source().to_owned();
        let rules = RuleSet::new(variables(&["trace"]));

        let ret = find_kind(tree.root(), "return_statement").unwrap();
        assert_eq!(
            rules.decide(NodeKind::ReturnStatement, ret, &text),
            Verdict::Update
        );
    }

    #[test]
    fn test_return_call_is_none() {
        let tree = parse("function f() { return trace(); }");
        let text = tree.source().to_owned();
        let rules = RuleSet::new(variables(&["trace"]));

        let ret = find_kind(tree.root(), "return_statement").unwrap();
        assert_eq!(
            rules.decide(NodeKind::ReturnStatement, ret, &text),
            Verdict::None
        );
    }

    #[test]
    fn test_assignment_member_property() {
        let tree = parse("logger.level = 'debug';");
        let text = tree.source().to_owned();
        let rules = RuleSet::new(properties(&["level"]));

        let assign = find_kind(tree.root(), "assignment_expression").unwrap();
        assert_eq!(
            rules.decide(NodeKind::Assignment, assign, &text),
            Verdict::Remove
        );
    }

    #[test]
    fn test_assignment_identifier_variable() {
        let tree = parse("trace = mk();");
        let text = tree.source().to_owned();
        let rules = RuleSet::new(variables(&["trace"]));

        let assign = find_kind(tree.root(), "assignment_expression").unwrap();
        assert_eq!(
            rules.decide(NodeKind::Assignment, assign, &text),
            Verdict::Remove
        );
    }

    #[test]
    fn test_augmented_assignment_matches() {
        let tree = parse("count += 1;");
        let text = tree.source().to_owned();
        let rules = RuleSet::new(variables(&["count"]));

        let assign = find_kind(tree.root(), "augmented_assignment_expression").unwrap();
        assert_eq!(
            rules.decide(NodeKind::Assignment, assign, &text),
            Verdict::Remove
        );
    }

    #[test]
    fn test_subscript_assignment_is_none() {
        let tree = parse("a[\"level\"] = 1;");
        let text = tree.source().to_owned();
        let rules = RuleSet::new(properties(&["level"]));

        let assign = find_kind(tree.root(), "assignment_expression").unwrap();
        assert_eq!(
            rules.decide(NodeKind::Assignment, assign, &text),
            Verdict::None
        );
    }

    /// Depth-first search for the first node of the given grammar kind.
    fn find_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        for i in 0..node.named_child_count() {
            if let Some(found) = node.named_child(i as u32).and_then(|c| find_kind(c, kind)) {
                return Some(found);
            }
        }
        None
    }
}
