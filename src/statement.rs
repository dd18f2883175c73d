use tree_sitter::Node;

use crate::parser::walk_tree;
use crate::source::SourceText;

/// Method visibility as tracked while scanning a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// `:name`, stored without the colon
    Symbol(String),
    /// `Foo` or `Foo::Bar`
    Constant(String),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Brace,
    DoEnd,
}

/// A method call used as a statement, e.g. `has_many :posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub receiver: Option<String>,
    pub method: String,
    pub arguments: Vec<Argument>,
    pub block: Option<BlockKind>,
}

impl Call {
    fn from_node(node: Node<'_>, source: &SourceText) -> Option<Self> {
        let method = node.child_by_field_name("method")?;
        let receiver = node
            .child_by_field_name("receiver")
            .map(|receiver| node_text(receiver, source).to_string());

        let arguments = node
            .child_by_field_name("arguments")
            .map(|list| {
                let mut cursor = list.walk();
                list.named_children(&mut cursor)
                    .filter(|arg| arg.kind() != "comment")
                    .map(|arg| match arg.kind() {
                        "simple_symbol" => Argument::Symbol(
                            node_text(arg, source).trim_start_matches(':').to_string(),
                        ),
                        "constant" | "scope_resolution" => {
                            Argument::Constant(node_text(arg, source).to_string())
                        }
                        _ => Argument::Other,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let block = node
            .child_by_field_name("block")
            .and_then(|block| match block.kind() {
                "block" => Some(BlockKind::Brace),
                "do_block" => Some(BlockKind::DoEnd),
                _ => None,
            });

        Some(Self {
            receiver,
            method: node_text(method, source).to_string(),
            arguments,
            block,
        })
    }

    pub fn is_receiverless(&self) -> bool {
        self.receiver.is_none()
    }

    /// `private`, `protected()` and friends: no receiver, arguments or block.
    fn visibility_change(&self) -> Option<Visibility> {
        if self.receiver.is_some() || !self.arguments.is_empty() || self.block.is_some() {
            return None;
        }
        Visibility::from_keyword(&self.method)
    }

    pub fn first_symbol(&self) -> Option<&str> {
        match self.arguments.first() {
            Some(Argument::Symbol(name)) => Some(name),
            _ => None,
        }
    }

    pub fn first_constant(&self) -> Option<&str> {
        match self.arguments.first() {
            Some(Argument::Constant(name)) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignTarget {
    LocalVariable,
    InstanceVariable,
    Index,
}

/// The shape of a statement, resolved once when it is extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementShape {
    Call(Call),
    MethodDef { name: String },
    ClassMethodDef { name: String },
    ConstantAssign { name: String },
    Assignment { target: AssignTarget },
    VisibilityChange(Visibility),
    Other,
}

impl StatementShape {
    pub fn of(node: Node<'_>, source: &SourceText) -> Self {
        match node.kind() {
            "identifier" => Visibility::from_keyword(node_text(node, source))
                .map(StatementShape::VisibilityChange)
                .unwrap_or(StatementShape::Other),
            "method" => node
                .child_by_field_name("name")
                .map(|name| StatementShape::MethodDef {
                    name: node_text(name, source).to_string(),
                })
                .unwrap_or(StatementShape::Other),
            "singleton_method" => {
                let on_self = node
                    .child_by_field_name("object")
                    .is_some_and(|object| object.kind() == "self");
                match node.child_by_field_name("name") {
                    Some(name) if on_self => StatementShape::ClassMethodDef {
                        name: node_text(name, source).to_string(),
                    },
                    _ => StatementShape::Other,
                }
            }
            "call" => match Call::from_node(node, source) {
                Some(call) => match call.visibility_change() {
                    Some(visibility) => StatementShape::VisibilityChange(visibility),
                    None => StatementShape::Call(call),
                },
                None => StatementShape::Other,
            },
            "assignment" => assignment_shape(node, source),
            _ => StatementShape::Other,
        }
    }
}

fn assignment_shape(node: Node<'_>, source: &SourceText) -> StatementShape {
    let Some(left) = node.child_by_field_name("left") else {
        return StatementShape::Other;
    };

    match left.kind() {
        "constant" => StatementShape::ConstantAssign {
            name: node_text(left, source).to_string(),
        },
        "identifier" => StatementShape::Assignment {
            target: AssignTarget::LocalVariable,
        },
        "instance_variable" => StatementShape::Assignment {
            target: AssignTarget::InstanceVariable,
        },
        "element_reference" => StatementShape::Assignment {
            target: AssignTarget::Index,
        },
        _ => StatementShape::Other,
    }
}

/// Where an alignment operator sits on a statement's first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSite {
    /// End of the token the operator is aligned against (`h["a"]`, `let(:a)`)
    pub lhs_end: usize,
    pub operator_start: usize,
    pub column: usize,
}

/// One sibling statement of a scope body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub shape: StatementShape,
    pub start_byte: usize,
    pub end_byte: usize,
    pub first_line: usize,
    pub last_line: usize,
    pub column: usize,
    pub operator: Option<OperatorSite>,
    pub has_heredoc: bool,
    /// A string-like literal spans lines, so its inner lines are content
    pub has_multiline_literal: bool,
}

impl Statement {
    pub fn from_node(node: Node<'_>, source: &SourceText) -> Self {
        let shape = StatementShape::of(node, source);
        let first_line = node.start_position().row;
        let operator = operator_site(node, &shape, source).filter(|site| {
            source.line_of(site.operator_start) == first_line
        });

        Self {
            shape,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            first_line,
            last_line: node.end_position().row,
            column: source.column_of(node.start_byte()),
            operator,
            has_heredoc: contains_heredoc(node),
            has_multiline_literal: contains_multiline_literal(node),
        }
    }

    pub fn call(&self) -> Option<&Call> {
        match &self.shape {
            StatementShape::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn is_method_definition(&self) -> bool {
        matches!(
            self.shape,
            StatementShape::MethodDef { .. } | StatementShape::ClassMethodDef { .. }
        )
    }

    fn absorb_heredoc(&mut self, body: Node<'_>, source: &SourceText) {
        self.end_byte = self.end_byte.max(body.end_byte());
        self.last_line = self
            .last_line
            .max(source.line_of(body.end_byte().saturating_sub(1)));
        self.has_heredoc = true;
    }
}

/// Flatten a scope body into its direct child statements.
pub fn extract_statements(body: Option<Node<'_>>, source: &SourceText) -> Vec<Statement> {
    let Some(body) = body else {
        return Vec::new();
    };

    if !matches!(body.kind(), "body_statement" | "block_body" | "program") {
        return vec![Statement::from_node(body, source)];
    }

    let mut statements: Vec<Statement> = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        match child.kind() {
            "comment" | "empty_statement" | "rescue" | "else" | "ensure" | "uninterpreted" => {}
            "heredoc_body" => {
                if let Some(previous) = statements.last_mut() {
                    previous.absorb_heredoc(child, source);
                }
            }
            _ => statements.push(Statement::from_node(child, source)),
        }
    }

    statements
}

pub fn node_text<'s>(node: Node<'_>, source: &'s SourceText) -> &'s str {
    source.slice(node.start_byte(), node.end_byte())
}

fn operator_site(node: Node<'_>, shape: &StatementShape, source: &SourceText) -> Option<OperatorSite> {
    let (lhs_end, operator_start) = match shape {
        StatementShape::ConstantAssign { .. } | StatementShape::Assignment { .. } => {
            let left = node.child_by_field_name("left")?;
            let mut cursor = node.walk();
            let operator = node
                .children(&mut cursor)
                .find(|child| !child.is_named() && child.kind() == "=")?;
            (left.end_byte(), operator.start_byte())
        }
        StatementShape::Call(call) if call.block == Some(BlockKind::Brace) => {
            let lhs = node
                .child_by_field_name("arguments")
                .or_else(|| node.child_by_field_name("method"))?;
            let block = node.child_by_field_name("block")?;
            (lhs.end_byte(), block.start_byte())
        }
        _ => return None,
    };

    Some(OperatorSite {
        lhs_end,
        operator_start,
        column: source.column_of(operator_start),
    })
}

fn contains_heredoc(node: Node<'_>) -> bool {
    let mut found = false;
    walk_tree(node, |child| {
        found |= matches!(child.kind(), "heredoc_beginning" | "heredoc_body");
    });
    found
}

fn contains_multiline_literal(node: Node<'_>) -> bool {
    let mut found = false;
    walk_tree(node, |child| {
        found |= matches!(
            child.kind(),
            "string" | "regex" | "subshell" | "string_array" | "symbol_array" | "delimited_symbol"
        ) && child.start_position().row != child.end_position().row;
    });
    found
}
