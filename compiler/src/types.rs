use std::collections::HashSet;
use serde::Serialize;

/// The six primitive types a message field may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Object,
    Array,
    Boolean,
    Unit,
}

impl ValueType {
    pub const ALL: [ValueType; 6] = [
        ValueType::String,
        ValueType::Number,
        ValueType::Object,
        ValueType::Array,
        ValueType::Boolean,
        ValueType::Unit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String  => "string",
            ValueType::Number  => "number",
            ValueType::Object  => "object",
            ValueType::Array   => "array",
            ValueType::Boolean => "boolean",
            ValueType::Unit    => "unit",
        }
    }

    pub fn from_name(name: &str) -> Option<ValueType> {
        ValueType::ALL.into_iter().find(|ty| ty.as_str() == name)
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Service(srv) => Some(srv),
            Declaration::Message(_)   => None,
        })
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Message(msg) => Some(msg),
            Declaration::Service(_)   => None,
        })
    }

    pub fn message_names(&self) -> HashSet<&str> {
        self.messages().map(|msg| msg.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Declaration {
    #[serde(rename = "srv")]
    Service(Service),
    #[serde(rename = "msg")]
    Message(Message),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Service(srv) => &srv.name,
            Declaration::Message(msg) => &msg.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name:       String,
    pub procedures: Vec<Procedure>,
}

/// A remote call. Each entry of `args` names a declared message; it is the
/// argument's type, not a parameter name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Procedure {
    pub name:        String,
    pub args:        Vec<String>,
    pub return_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub name:   String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name:  String,
    #[serde(rename = "type")]
    pub type_: ValueType,
}
