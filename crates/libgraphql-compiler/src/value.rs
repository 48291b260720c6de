use crate::ast;
use indexmap::IndexMap;

/// A GraphQL input value as it appears in a document: an argument value, a
/// variable default, or a directive argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Enum(String),
    Float(f64),
    Int(i64),
    List(Vec<Value>),
    Null,
    Object(IndexMap<String, Value>),
    String(String),
    Variable(String),
}
impl Value {
    pub(crate) fn from_ast(ast_value: &ast::query::Value) -> Self {
        use ast::query::Value as AstValue;
        match ast_value {
            AstValue::Variable(name) => Self::Variable(name.to_string()),
            AstValue::Int(number) => Self::Int(number.as_i64().unwrap_or_default()),
            AstValue::Float(value) => Self::Float(*value),
            AstValue::String(value) => Self::String(value.to_string()),
            AstValue::Boolean(value) => Self::Boolean(*value),
            AstValue::Null => Self::Null,
            AstValue::Enum(name) => Self::Enum(name.to_string()),
            AstValue::List(values) =>
                Self::List(values.iter().map(Self::from_ast).collect()),
            AstValue::Object(entries) =>
                Self::Object(entries.iter().map(|(key, value)| {
                    (key.to_string(), Self::from_ast(value))
                }).collect()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        if let Self::Object(entries) = self {
            Some(entries)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(value) = self {
            Some(value.as_str())
        } else {
            None
        }
    }

    pub fn as_variable(&self) -> Option<&str> {
        if let Self::Variable(name) = self {
            Some(name.as_str())
        } else {
            None
        }
    }

    /// True when the value (recursively) references no variables.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Variable(_) => false,
            Self::List(values) => values.iter().all(Self::is_constant),
            Self::Object(entries) => entries.values().all(Self::is_constant),
            _ => true,
        }
    }

    /// Replace every variable named in `bindings` with its bound value.
    /// Variables without a binding are left as-is.
    pub fn substitute(&self, bindings: &IndexMap<String, Value>) -> Value {
        match self {
            Self::Variable(name) => match bindings.get(name) {
                Some(bound) => bound.clone(),
                None => self.clone(),
            },
            Self::List(values) =>
                Self::List(values.iter().map(|v| v.substitute(bindings)).collect()),
            Self::Object(entries) =>
                Self::Object(entries.iter().map(|(key, value)| {
                    (key.to_owned(), value.substitute(bindings))
                }).collect()),
            _ => self.clone(),
        }
    }

    pub fn to_graphql_string(&self) -> String {
        match self {
            Self::Boolean(value) => value.to_string(),
            Self::Enum(name) => name.to_owned(),
            // Keep a fractional part so the literal stays a Float.
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 =>
                format!("{value:.1}"),
            Self::Float(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::List(values) => format!(
                "[{}]",
                values.iter()
                    .map(Self::to_graphql_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Self::Null => "null".to_string(),
            Self::Object(entries) => format!(
                "{{{}}}",
                entries.iter()
                    .map(|(key, value)| format!("{key}: {}", value.to_graphql_string()))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Self::String(value) =>
                serde_json::Value::String(value.to_owned()).to_string(),
            Self::Variable(name) => format!("${name}"),
        }
    }

    /// JSON rendering used in generated artifacts. Variables have no JSON
    /// equivalent and render as `null`; callers emit them as `Variable`
    /// argument nodes instead.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Boolean(value) => serde_json::Value::Bool(*value),
            Self::Enum(name) => serde_json::Value::String(name.to_owned()),
            Self::Float(value) => serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Int(value) => serde_json::Value::from(*value),
            Self::List(values) =>
                serde_json::Value::Array(values.iter().map(Self::to_json).collect()),
            Self::Null | Self::Variable(_) => serde_json::Value::Null,
            Self::Object(entries) => serde_json::Value::Object(
                entries.iter()
                    .map(|(key, value)| (key.to_owned(), value.to_json()))
                    .collect(),
            ),
            Self::String(value) => serde_json::Value::String(value.to_owned()),
        }
    }

    /// Append the name of every variable referenced by this value.
    pub(crate) fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Self::Variable(name) => {
                if !out.contains(name) {
                    out.push(name.to_owned());
                }
            },
            Self::List(values) =>
                values.iter().for_each(|value| value.collect_variables(out)),
            Self::Object(entries) =>
                entries.values().for_each(|value| value.collect_variables(out)),
            _ => (),
        }
    }
}
