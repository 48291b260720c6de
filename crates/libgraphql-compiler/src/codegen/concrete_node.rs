use crate::ir::Metadata;
use crate::ir::OperationKind;
use serde::Serialize;

/// A generated artifact, serialized as JSON into one output file.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeneratedNode {
    Batch(ConcreteBatch),
    Fragment(ConcreteFragment),
}
impl GeneratedNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Batch(batch) => batch.name.as_str(),
            Self::Fragment(fragment) => fragment.name.as_str(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Everything the runtime needs to fetch, normalize and read one operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "Batch")]
pub struct ConcreteBatch {
    /// Reads the operation's own selections out of the store.
    pub fragment: ConcreteFragment,

    /// Persisted query identifier, when the text was persisted.
    pub id: Option<String>,
    pub metadata: Metadata,
    pub name: String,
    pub operation: OperationKind,

    /// Normalizes the server response into the store.
    pub query: ConcreteRoot,

    /// The query text sent to the server.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "Fragment", rename_all = "camelCase")]
pub struct ConcreteFragment {
    pub argument_definitions: Vec<ConcreteArgumentDefinition>,
    pub metadata: Option<Metadata>,
    pub name: String,
    pub selections: Vec<ConcreteSelection>,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "Root", rename_all = "camelCase")]
pub struct ConcreteRoot {
    pub argument_definitions: Vec<ConcreteArgumentDefinition>,
    pub name: String,
    pub operation: OperationKind,
    pub selections: Vec<ConcreteSelection>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ConcreteArgumentDefinition {
    LocalArgument {
        #[serde(rename = "defaultValue")]
        default_value: serde_json::Value,
        name: String,
        #[serde(rename = "type")]
        type_name: String,
    },
    RootArgument {
        name: String,
        #[serde(rename = "type")]
        type_name: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ConcreteArgument {
    Literal {
        name: String,
        #[serde(rename = "type")]
        type_name: Option<String>,
        value: serde_json::Value,
    },
    Variable {
        name: String,
        #[serde(rename = "type")]
        type_name: Option<String>,
        #[serde(rename = "variableName")]
        variable_name: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ConcreteSelection {
    Condition(ConcreteCondition),
    FragmentSpread(ConcreteFragmentSpread),
    InlineFragment(ConcreteInlineFragment),
    LinkedField(ConcreteLinkedField),
    LinkedHandle(ConcreteHandle),
    ScalarField(ConcreteScalarField),
    ScalarHandle(ConcreteHandle),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteCondition {
    /// Name of the boolean variable guarding the selections.
    pub condition: String,
    pub passing_value: bool,
    pub selections: Vec<ConcreteSelection>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConcreteFragmentSpread {
    pub args: Option<Vec<ConcreteArgument>>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConcreteInlineFragment {
    pub selections: Vec<ConcreteSelection>,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteLinkedField {
    pub alias: Option<String>,
    pub args: Option<Vec<ConcreteArgument>>,

    /// The field's type when it is an object type, `None` for interfaces
    /// and unions.
    pub concrete_type: Option<String>,
    pub name: String,
    pub plural: bool,
    pub selections: Vec<ConcreteSelection>,
    pub storage_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteScalarField {
    pub alias: Option<String>,
    pub args: Option<Vec<ConcreteArgument>>,
    pub name: String,
    pub storage_key: Option<String>,
}

/// Tells the runtime to run `handle` over a field's normalized value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConcreteHandle {
    pub alias: Option<String>,
    pub args: Option<Vec<ConcreteArgument>>,
    pub handle: String,
    pub key: String,
    pub name: String,
}
