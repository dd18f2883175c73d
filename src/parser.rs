use anyhow::{anyhow, bail, Context, Result};
use tree_sitter::{Node, Parser, Tree};

use crate::source::SourceText;

/// A parsed Ruby file: the syntax tree and the buffer it points into.
#[derive(Debug)]
pub struct ParsedFile {
    pub source: SourceText,
    pub tree: Tree,
}

impl ParsedFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

#[derive(Default)]
pub struct RubyParser;

impl RubyParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, source: &str, filename: &str) -> Result<ParsedFile> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_ruby::LANGUAGE.into())
            .context("Failed to load the Ruby grammar")?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow!("Failed to parse {filename}: parser returned no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error(root)
                .map(|node| node.start_position().row + 1)
                .unwrap_or(1);
            bail!("Failed to parse {filename}: syntax error near line {line}");
        }

        let comment_lines = own_line_comments(root, source);
        Ok(ParsedFile {
            source: SourceText::new(source).with_comment_lines(comment_lines),
            tree,
        })
    }
}

/// Depth-first, pre-order walk over `root` and all of its descendants.
pub(crate) fn walk_tree<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Lines covered by comments that have nothing but whitespace before them.
fn own_line_comments(root: Node<'_>, source: &str) -> Vec<usize> {
    let mut lines = Vec::new();

    walk_tree(root, |node| {
        if node.kind() != "comment" {
            return;
        }

        let start = node.start_byte();
        let line_start = source[..start].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        if !source[line_start..start].trim().is_empty() {
            return;
        }

        let first = node.start_position().row;
        let end = node.end_position();
        // `=begin`/`=end` blocks may end at column 0 of the following line
        let last = if end.column == 0 && end.row > first {
            end.row - 1
        } else {
            end.row
        };
        lines.extend(first..=last);
    });

    lines
}
