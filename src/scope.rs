use tree_sitter::Node;

use crate::parser::{walk_tree, ParsedFile};
use crate::source::SourceText;
use crate::statement::{extract_statements, node_text, Statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Program,
    Class,
    Module,
    SingletonClass,
    Method,
    Block,
}

impl ScopeKind {
    fn of(kind: &str) -> Option<Self> {
        match kind {
            "program" => Some(ScopeKind::Program),
            "class" => Some(ScopeKind::Class),
            "module" => Some(ScopeKind::Module),
            "singleton_class" => Some(ScopeKind::SingletonClass),
            "method" | "singleton_method" => Some(ScopeKind::Method),
            "do_block" | "block" => Some(ScopeKind::Block),
            _ => None,
        }
    }
}

/// A lexical body whose direct children are analyzed as siblings.
#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub name: Option<String>,
    /// Superclass expression without the leading `<`
    pub superclass: Option<String>,
    pub statements: Vec<Statement>,
}

impl Scope {
    fn from_node(node: Node<'_>, kind: ScopeKind, source: &SourceText) -> Self {
        let name = node
            .child_by_field_name("name")
            .map(|name| node_text(name, source).to_string());
        let superclass = node.child_by_field_name("superclass").map(|superclass| {
            node_text(superclass, source)
                .trim_start_matches('<')
                .trim()
                .to_string()
        });

        Self {
            kind,
            name,
            superclass,
            statements: extract_statements(body_of(node), source),
        }
    }

    pub fn is_class_like(&self) -> bool {
        matches!(
            self.kind,
            ScopeKind::Class | ScopeKind::Module | ScopeKind::SingletonClass
        )
    }
}

fn body_of(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() == "program" {
        return Some(node);
    }

    node.child_by_field_name("body").or_else(|| {
        let mut cursor = node.walk();
        let body = node
            .named_children(&mut cursor)
            .find(|child| matches!(child.kind(), "body_statement" | "block_body"));
        body
    })
}

/// Every scope in the file, outermost first.
pub fn collect_scopes(parsed: &ParsedFile) -> Vec<Scope> {
    let mut scopes = Vec::new();
    walk_tree(parsed.root(), |node| {
        if let Some(kind) = ScopeKind::of(node.kind()) {
            scopes.push(Scope::from_node(node, kind, &parsed.source));
        }
    });
    scopes
}
