#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod schema;
pub mod value;
pub mod validate;
pub mod encode;

mod number;

pub use crate::encode::Encoder;
pub use crate::error::{Error, Result};
pub use crate::options::{NonFinite, Options};
pub use crate::schema::{EnumSchema, Field, FixedSchema, Kind, Name, RecordSchema, Schema, UnionSchema};
pub use crate::validate::{DatumValidator, Validator};
pub use crate::value::Value;

use std::io::Write;

/// Encodes `value` under `schema` with the default validator.
pub fn encode_to_string(schema: &Schema, value: &Value, options: &Options) -> Result<String> {
    Encoder::new(options.clone()).encode(schema, value)
}

/// Encodes fully in memory first, so nothing reaches `writer` on failure.
pub fn encode_to_writer<W: Write>(
    mut writer: W,
    schema: &Schema,
    value: &Value,
    options: &Options,
) -> Result<()> {
    let s = encode_to_string(schema, value, options)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

/// Converts a generic JSON datum into a [`Value`] and encodes it.
#[cfg(feature = "json")]
pub fn encode_json_datum(
    schema: &Schema,
    datum: &serde_json::Value,
    options: &Options,
) -> Result<String> {
    let value = Value::try_from(datum)?;
    encode_to_string(schema, &value, options)
}
