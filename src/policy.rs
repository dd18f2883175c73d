use std::cmp::Ordering;

use crate::statement::{Call, StatementShape, Visibility};

/// A named bucket with a fixed place in a policy's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Concerns,
    Constants,
    Associations,
    Validations,
    Callbacks,
    Scopes,
    ClassMethods,
    Initialize,
    InstanceMethods,
    ProtectedMethods,
    PrivateMethods,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Concerns => "concerns",
            Category::Constants => "constants",
            Category::Associations => "associations",
            Category::Validations => "validations",
            Category::Callbacks => "callbacks",
            Category::Scopes => "scopes",
            Category::ClassMethods => "class methods",
            Category::Initialize => "initialize",
            Category::InstanceMethods => "instance methods",
            Category::ProtectedMethods => "protected",
            Category::PrivateMethods => "private",
        }
    }
}

/// How two non-empty sort keys of the same category compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Byte-wise, so `Zebra` sorts before `apple`
    #[default]
    CaseSensitive,
    /// Case folded first, byte-wise only to break exact ties
    CaseInsensitive,
}

impl KeyOrder {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            KeyOrder::CaseSensitive => a.cmp(b),
            KeyOrder::CaseInsensitive => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorization {
    pub category: Category,
    /// Empty when no intra-category order is enforced
    pub sort_key: String,
}

impl Categorization {
    fn new(category: Category, sort_key: impl Into<String>) -> Self {
        Self {
            category,
            sort_key: sort_key.into(),
        }
    }

    fn unkeyed(category: Category) -> Self {
        Self::new(category, String::new())
    }
}

/// The declarative part of an ordering rule: which categories exist, how
/// they are ordered, what counts as an element and how keys compare.
pub trait OrderingPolicy {
    /// Categories from first to last.
    fn order(&self) -> &'static [Category];

    fn categorize(&self, shape: &StatementShape, visibility: Visibility) -> Option<Categorization>;

    fn message(&self) -> &'static str;

    fn key_order(&self) -> KeyOrder {
        KeyOrder::CaseSensitive
    }

    fn priority(&self, category: Category) -> u8 {
        self.order()
            .iter()
            .position(|candidate| *candidate == category)
            .map(|position| position as u8)
            .unwrap_or(u8::MAX)
    }
}

const MODEL_ORDER: &[Category] = &[
    Category::Concerns,
    Category::Constants,
    Category::Associations,
    Category::Validations,
    Category::Callbacks,
    Category::Scopes,
    Category::ClassMethods,
    Category::InstanceMethods,
    Category::ProtectedMethods,
    Category::PrivateMethods,
];

const CLASS_ORDER: &[Category] = &[
    Category::Concerns,
    Category::Constants,
    Category::ClassMethods,
    Category::Initialize,
    Category::InstanceMethods,
    Category::ProtectedMethods,
    Category::PrivateMethods,
];

const ASSOCIATIONS: &[&str] = &[
    "belongs_to",
    "has_one",
    "has_many",
    "has_and_belongs_to_many",
];

const VALIDATIONS: &[&str] = &[
    "validate",
    "validates",
    "validates_with",
    "validates_associated",
];

const CALLBACKS: &[&str] = &[
    "before_validation",
    "after_validation",
    "before_save",
    "around_save",
    "after_save",
    "before_create",
    "around_create",
    "after_create",
    "before_update",
    "around_update",
    "after_update",
    "before_destroy",
    "around_destroy",
    "after_destroy",
    "after_commit",
    "after_rollback",
    "after_initialize",
    "after_find",
    "after_touch",
    "after_create_commit",
    "after_update_commit",
    "after_destroy_commit",
    "after_save_commit",
];

const CONCERN_METHODS: &[&str] = &["include", "extend", "prepend"];

fn is_concern(call: &Call) -> bool {
    call.is_receiverless()
        && call.block.is_none()
        && !call.arguments.is_empty()
        && CONCERN_METHODS.contains(&call.method.as_str())
}

fn is_validation(method: &str) -> bool {
    VALIDATIONS.contains(&method) || method.starts_with("validates_")
}

fn method_categorization(name: &str, visibility: Visibility, with_initialize: bool) -> Categorization {
    match visibility {
        Visibility::Public if with_initialize && name == "initialize" => {
            Categorization::unkeyed(Category::Initialize)
        }
        Visibility::Public => Categorization::new(Category::InstanceMethods, name),
        Visibility::Protected => Categorization::unkeyed(Category::ProtectedMethods),
        Visibility::Private => Categorization::unkeyed(Category::PrivateMethods),
    }
}

/// Record-like models: associations, validations, callbacks and scopes get
/// their own sections.
pub struct ModelPolicy;

impl OrderingPolicy for ModelPolicy {
    fn order(&self) -> &'static [Category] {
        MODEL_ORDER
    }

    fn categorize(&self, shape: &StatementShape, visibility: Visibility) -> Option<Categorization> {
        match shape {
            StatementShape::ClassMethodDef { name } => {
                Some(Categorization::new(Category::ClassMethods, name.as_str()))
            }
            StatementShape::MethodDef { name } => {
                Some(method_categorization(name, visibility, false))
            }
            StatementShape::ConstantAssign { .. } => {
                Some(Categorization::unkeyed(Category::Constants))
            }
            StatementShape::Call(call) if call.is_receiverless() && call.block.is_none() => {
                let method = call.method.as_str();
                if is_concern(call) {
                    Some(Categorization::unkeyed(Category::Concerns))
                } else if ASSOCIATIONS.contains(&method) {
                    Some(Categorization::unkeyed(Category::Associations))
                } else if is_validation(method) {
                    Some(Categorization::unkeyed(Category::Validations))
                } else if CALLBACKS.contains(&method) {
                    Some(Categorization::unkeyed(Category::Callbacks))
                } else if method == "scope" {
                    Some(Categorization::new(
                        Category::Scopes,
                        call.first_symbol().unwrap_or_default(),
                    ))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn message(&self) -> &'static str {
        "Model elements should be ordered: concerns → constants → associations → validations → callbacks → scopes → class methods → instance methods → protected → private."
    }
}

/// Plain classes and modules.
pub struct ClassPolicy;

impl OrderingPolicy for ClassPolicy {
    fn order(&self) -> &'static [Category] {
        CLASS_ORDER
    }

    fn categorize(&self, shape: &StatementShape, visibility: Visibility) -> Option<Categorization> {
        match shape {
            StatementShape::ClassMethodDef { name } => {
                Some(Categorization::new(Category::ClassMethods, name.as_str()))
            }
            StatementShape::MethodDef { name } => {
                Some(method_categorization(name, visibility, true))
            }
            StatementShape::ConstantAssign { .. } => {
                Some(Categorization::unkeyed(Category::Constants))
            }
            StatementShape::Call(call) if is_concern(call) => {
                Some(Categorization::unkeyed(Category::Concerns))
            }
            _ => None,
        }
    }

    fn message(&self) -> &'static str {
        "Class elements should be ordered: concerns → constants → class methods → initialize → instance methods → protected → private."
    }
}

/// Consecutive `include` statements, keyed by module name.
pub struct IncludePolicy;

impl IncludePolicy {
    pub fn is_include(shape: &StatementShape) -> bool {
        match shape {
            StatementShape::Call(call) => {
                call.method == "include"
                    && is_concern(call)
                    && call.arguments.len() == 1
                    && call.first_constant().is_some()
            }
            _ => false,
        }
    }
}

impl OrderingPolicy for IncludePolicy {
    fn order(&self) -> &'static [Category] {
        &[Category::Concerns]
    }

    fn categorize(&self, shape: &StatementShape, _visibility: Visibility) -> Option<Categorization> {
        match shape {
            StatementShape::Call(call) if Self::is_include(shape) => Some(Categorization::new(
                Category::Concerns,
                call.first_constant().unwrap_or_default(),
            )),
            _ => None,
        }
    }

    fn message(&self) -> &'static str {
        "Sort consecutive `include` statements alphabetically."
    }

    fn key_order(&self) -> KeyOrder {
        KeyOrder::CaseInsensitive
    }
}
