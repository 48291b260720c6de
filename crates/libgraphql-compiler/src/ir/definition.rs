use crate::ir::ArgumentDefinition;
use crate::ir::Directive;
use crate::ir::OperationKind;
use crate::ir::Selection;
use crate::loc;
use indexmap::IndexMap;

/// Free-form per-definition data produced by transforms (e.g. `plural`,
/// `exports`) and carried through to generated artifacts.
pub type Metadata = IndexMap<String, serde_json::Value>;

/// A named, schema-resolved executable definition.
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Fragment(Fragment),
    Root(Root),
}
impl Definition {
    pub fn argument_definitions(&self) -> &[ArgumentDefinition] {
        match self {
            Self::Fragment(fragment) => &fragment.argument_definitions,
            Self::Root(root) => &root.argument_definitions,
        }
    }

    pub fn as_fragment(&self) -> Option<&Fragment> {
        if let Self::Fragment(fragment) = self {
            Some(fragment)
        } else {
            None
        }
    }

    pub fn as_root(&self) -> Option<&Root> {
        if let Self::Root(root) = self {
            Some(root)
        } else {
            None
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Fragment(_) => "Fragment",
            Self::Root(_) => "Root",
        }
    }

    pub fn location(&self) -> &loc::SourceLocation {
        match self {
            Self::Fragment(fragment) => &fragment.location,
            Self::Root(root) => &root.location,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Self::Fragment(fragment) => &fragment.metadata,
            Self::Root(root) => &root.metadata,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Fragment(fragment) => fragment.name.as_str(),
            Self::Root(root) => root.name.as_str(),
        }
    }

    pub fn selections(&self) -> &[Selection] {
        match self {
            Self::Fragment(fragment) => &fragment.selections,
            Self::Root(root) => &root.selections,
        }
    }

    pub fn selections_mut(&mut self) -> &mut Vec<Selection> {
        match self {
            Self::Fragment(fragment) => &mut fragment.selections,
            Self::Root(root) => &mut root.selections,
        }
    }

    /// The type the definition's top-level selections are made against.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Fragment(fragment) => fragment.type_condition.as_str(),
            Self::Root(root) => root.type_name.as_str(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub argument_definitions: Vec<ArgumentDefinition>,
    pub directives: Vec<Directive>,
    pub location: loc::SourceLocation,
    pub metadata: Metadata,
    pub name: String,
    pub selections: Vec<Selection>,
    pub type_condition: String,
}

/// A query, mutation or subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct Root {
    pub argument_definitions: Vec<ArgumentDefinition>,
    pub directives: Vec<Directive>,
    pub location: loc::SourceLocation,
    pub metadata: Metadata,
    pub name: String,
    pub operation: OperationKind,
    pub selections: Vec<Selection>,
    pub type_name: String,
}
