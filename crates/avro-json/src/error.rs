use thiserror::Error;

use std::io;

use crate::schema::Schema;
use crate::value::Value;

#[derive(Debug, Error)]
pub enum Error {
    #[error("value {value} does not match schema `{schema}`")]
    TypeMismatch { schema: Schema, value: Value },

    #[error("value {value} matches no branch of union `{schema}`")]
    UnionNoMatch { schema: Schema, value: Value },

    #[error("value {value} has no JSON representation under schema `{schema}`")]
    UnsupportedValue { schema: Schema, value: Value },

    #[error("invalid schema: {0}")]
    Schema(String),

    #[error("invalid datum: {0}")]
    Datum(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "json")]
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn type_mismatch(schema: &Schema, value: &Value) -> Self {
        Error::TypeMismatch {
            schema: schema.clone(),
            value: value.clone(),
        }
    }

    pub(crate) fn union_no_match(schema: &Schema, value: &Value) -> Self {
        Error::UnionNoMatch {
            schema: schema.clone(),
            value: value.clone(),
        }
    }

    pub(crate) fn unsupported_value(schema: &Schema, value: &Value) -> Self {
        Error::UnsupportedValue {
            schema: schema.clone(),
            value: value.clone(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
