use crate::policy::{Category, OrderingPolicy};
use crate::statement::{Statement, StatementShape, Visibility};

/// A categorized statement, ready to be checked and sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    pub statement: &'a Statement,
    pub category: Category,
    /// Visibility in effect where the statement sits in the original source
    pub visibility: Visibility,
    pub sort_key: String,
    pub priority: u8,
    pub original_index: usize,
}

/// What the categorizer made of one statement of a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<'a> {
    Element(Element<'a>),
    Modifier {
        statement: &'a Statement,
        visibility: Visibility,
    },
    Uncategorized(&'a Statement),
}

impl<'a> Entry<'a> {
    pub fn statement(&self) -> &'a Statement {
        match self {
            Entry::Element(element) => element.statement,
            Entry::Modifier { statement, .. } => statement,
            Entry::Uncategorized(statement) => statement,
        }
    }
}

struct ScanState<'a> {
    visibility: Visibility,
    next_index: usize,
    entries: Vec<Entry<'a>>,
}

/// Classify every statement of a scope body in source order.
///
/// Visibility starts out public and is threaded through the fold. A bare
/// modifier changes it for everything after it; elements take whatever is
/// current when they are reached.
pub fn scan<'a>(statements: &'a [Statement], policy: &dyn OrderingPolicy) -> Vec<Entry<'a>> {
    let initial = ScanState {
        visibility: Visibility::Public,
        next_index: 0,
        entries: Vec::with_capacity(statements.len()),
    };

    let state = statements.iter().fold(initial, |mut state, statement| {
        let entry = match &statement.shape {
            StatementShape::VisibilityChange(visibility) => {
                state.visibility = *visibility;
                Entry::Modifier {
                    statement,
                    visibility: *visibility,
                }
            }
            shape => match policy.categorize(shape, state.visibility) {
                Some(categorization) => {
                    let element = Element {
                        statement,
                        category: categorization.category,
                        visibility: state.visibility,
                        sort_key: categorization.sort_key,
                        priority: policy.priority(categorization.category),
                        original_index: state.next_index,
                    };
                    state.next_index += 1;
                    Entry::Element(element)
                }
                None => Entry::Uncategorized(statement),
            },
        };
        state.entries.push(entry);
        state
    });

    state.entries
}

/// Just the elements of a scan, in source order.
pub fn elements<'e, 'a>(entries: &'e [Entry<'a>]) -> Vec<&'e Element<'a>> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            Entry::Element(element) => Some(element),
            _ => None,
        })
        .collect()
}
