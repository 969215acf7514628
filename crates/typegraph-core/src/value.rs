use crate::ast;
use indexmap::IndexMap;

/// A literal value as written in a schema: directive arguments and default
/// values for arguments or input fields.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Value {
    Bool(bool),
    Enum(String),
    Float(f64),
    Int(i64),
    List(Vec<Value>),
    Null,
    Object(IndexMap<String, Value>),
    String(String),
    VarRef(String),
}
impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(str) = self {
            Some(str.as_str())
        } else {
            None
        }
    }

    pub(crate) fn from_ast(ast_value: &ast::query::Value) -> Self {
        use graphql_parser::query::Value as AstValue;
        match ast_value {
            AstValue::Variable(var_name) =>
                Value::VarRef(var_name.to_string()),

            // graphql_parser stores every Int literal as an i64.
            AstValue::Int(value) =>
                Value::Int(value.as_i64().unwrap_or_default()),

            AstValue::Float(value) =>
                Value::Float(*value),

            AstValue::String(value) =>
                Value::String(value.clone()),

            AstValue::Boolean(value) =>
                Value::Bool(*value),

            AstValue::Null =>
                Value::Null,

            AstValue::Enum(value) =>
                Value::Enum(value.to_string()),

            AstValue::List(values) =>
                Value::List(values.iter().map(Value::from_ast).collect()),

            AstValue::Object(entries) =>
                Value::Object(entries.iter().map(|(key, ast_value)|
                    (key.to_string(), Value::from_ast(ast_value))
                ).collect()),
        }
    }
}
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Enum(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::List(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            },
            Self::Null => write!(f, "null"),
            Self::Object(entries) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
            Self::String(value) => write!(f, "{value:?}"),
            Self::VarRef(name) => write!(f, "${name}"),
        }
    }
}
