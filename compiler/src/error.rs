use std::fmt;
use thiserror::Error;

use crate::utils::quote;

#[derive(Debug, Error)]
pub enum BazError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lexical error: invalid characters found in {}", quote(.fragment))]
    Lex {
        fragment: String,
    },

    #[error("Parse error: found {found}, expected {expected}")]
    Parse {
        found:    String,
        expected: String,
    },

    #[error("Duplicate name: {scope} {} is already declared", quote(.name))]
    Duplicate {
        scope: NameScope,
        name:  String,
    },

    #[error("Parse error: too many args in proc {} (at most {limit} allowed)", quote(.procedure))]
    TooManyArgs {
        procedure: String,
        limit:     usize,
    },

    #[error(
        "Semantic error: undeclared message {} referenced by proc {} in srv {}",
        quote(.name), quote(.procedure), quote(.service)
    )]
    UndeclaredMessage {
        name:      String,
        procedure: String,
        service:   String,
    },
}

/// Where a duplicated name was found. Services and messages are separate
/// namespaces; procedures and fields are scoped to their declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameScope {
    Service,
    Message,
    Procedure { service: String },
    Field { message: String },
}

impl fmt::Display for NameScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameScope::Service => write!(f, "srv"),
            NameScope::Message => write!(f, "msg"),
            NameScope::Procedure { service } => write!(f, "proc in srv {}", quote(service)),
            NameScope::Field { message } => write!(f, "field in msg {}", quote(message)),
        }
    }
}
