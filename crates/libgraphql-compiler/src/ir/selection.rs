use crate::ir::Argument;
use crate::ir::Directive;
use crate::loc;
use crate::schema::TypeRef;
use crate::value::Value;

/// One entry in an IR selection set.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Condition(Condition),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
    LinkedField(LinkedField),
    ScalarField(ScalarField),
}
impl Selection {
    /// A key identifying which other selections this one can be merged
    /// with. Fields are identified by their response key (and any
    /// directives), fragments by their type or name, and conditions by their
    /// guard.
    pub fn identifier(&self) -> String {
        match self {
            Self::Condition(condition) => condition.guard_string(),
            Self::FragmentSpread(spread) => {
                let mut id = format!("...{}", spread.name);
                if !spread.arguments.is_empty() {
                    id.push_str(&Argument::print_list(&spread.arguments));
                }
                push_directives(&mut id, &spread.directives);
                id
            },
            Self::InlineFragment(inline) => {
                let mut id = format!("... on {}", inline.type_condition);
                push_directives(&mut id, &inline.directives);
                id
            },
            Self::LinkedField(field) => {
                let mut id = field.response_key().to_string();
                push_directives(&mut id, &field.directives);
                id
            },
            Self::ScalarField(field) => {
                let mut id = field.response_key().to_string();
                push_directives(&mut id, &field.directives);
                id
            },
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, Self::Condition(_) | Self::InlineFragment(_))
    }

    pub fn location(&self) -> &loc::SourceLocation {
        match self {
            Self::Condition(condition) => &condition.location,
            Self::FragmentSpread(spread) => &spread.location,
            Self::InlineFragment(inline) => &inline.location,
            Self::LinkedField(field) => &field.location,
            Self::ScalarField(field) => &field.location,
        }
    }

    /// Nested selections, for the selection kinds that have them.
    pub fn selections(&self) -> Option<&[Selection]> {
        match self {
            Self::Condition(condition) => Some(&condition.selections),
            Self::InlineFragment(inline) => Some(&inline.selections),
            Self::LinkedField(field) => Some(&field.selections),
            Self::FragmentSpread(_) | Self::ScalarField(_) => None,
        }
    }

    pub fn selections_mut(&mut self) -> Option<&mut Vec<Selection>> {
        match self {
            Self::Condition(condition) => Some(&mut condition.selections),
            Self::InlineFragment(inline) => Some(&mut inline.selections),
            Self::LinkedField(field) => Some(&mut field.selections),
            Self::FragmentSpread(_) | Self::ScalarField(_) => None,
        }
    }
}

fn push_directives(id: &mut String, directives: &[Directive]) {
    for directive in directives {
        id.push(' ');
        id.push_str(&directive.to_graphql_string());
    }
}

/// Selections that are only included when a `@include`/`@skip` guard
/// evaluates to `passing_value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    /// Either a variable reference or a boolean literal.
    pub condition: Value,
    pub location: loc::SourceLocation,
    pub passing_value: bool,
    pub selections: Vec<Selection>,
}
impl Condition {
    /// The guard as it would be written on a selection, e.g.
    /// `@include(if: $cond)`.
    pub fn guard_string(&self) -> String {
        let directive_name = if self.passing_value { "include" } else { "skip" };
        format!("@{directive_name}(if: {})", self.condition.to_graphql_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    /// Values bound to the target fragment's local arguments.
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub location: loc::SourceLocation,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub directives: Vec<Directive>,
    pub location: loc::SourceLocation,
    pub selections: Vec<Selection>,
    pub type_condition: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkedField {
    pub alias: Option<String>,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    /// Names of the client-side handlers that post-process this field's
    /// value (e.g. `connection`).
    pub handles: Vec<String>,
    pub location: loc::SourceLocation,
    pub name: String,
    pub selections: Vec<Selection>,
    pub type_ref: TypeRef,
}
impl LinkedField {
    pub fn generated(name: &str, type_ref: TypeRef, selections: Vec<Selection>) -> Self {
        Self {
            alias: None,
            arguments: vec![],
            directives: vec![],
            handles: vec![],
            location: loc::SourceLocation::Generated,
            name: name.to_string(),
            selections,
            type_ref,
        }
    }

    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    pub alias: Option<String>,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub handles: Vec<String>,
    pub location: loc::SourceLocation,
    pub name: String,
    pub type_ref: TypeRef,
}
impl ScalarField {
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }

    /// A plain field selection without arguments, directives or handles.
    pub fn generated(name: &str, type_ref: TypeRef) -> Self {
        Self {
            alias: None,
            arguments: vec![],
            directives: vec![],
            handles: vec![],
            location: loc::SourceLocation::Generated,
            name: name.to_string(),
            type_ref,
        }
    }
}
