//! Schema-directed encoding of values into JSON text.

mod encoders;
pub mod primitives;
pub mod writer;

use tracing::{debug, trace};

use crate::{
    Result,
    error::Error,
    options::Options,
    schema::Schema,
    validate::{DatumValidator, Validator},
    value::Value,
};

use self::writer::JsonWriter;

/// Encodes values against schemas.
///
/// Holds no per-call state, so one encoder may serve any number of calls,
/// from any number of threads when the validator is `Sync`.
#[derive(Debug, Clone, Default)]
pub struct Encoder<V = DatumValidator> {
    validator: V,
    options: Options,
}

impl Encoder<DatumValidator> {
    pub fn new(options: Options) -> Self {
        Self::with_validator(DatumValidator, options)
    }
}

impl<V: Validator> Encoder<V> {
    pub fn with_validator(validator: V, options: Options) -> Self {
        Self { validator, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Encodes `value` as JSON text under `schema`.
    ///
    /// Output is produced only when the whole value conforms; on failure the
    /// partially written text is dropped. A value rejected by the validator is
    /// walked once more to report the innermost offending schema and value.
    pub fn encode(&self, schema: &Schema, value: &Value) -> Result<String> {
        let mut w = JsonWriter::new(&self.options);
        if !self.validator.matches(schema, value) {
            let err = match self.encode_value(schema, value, &mut w) {
                Err(err) => err,
                Ok(()) => Error::type_mismatch(schema, value),
            };
            debug!(schema = %schema, error = %err, "value rejected");
            return Err(err);
        }
        self.encode_value(schema, value, &mut w)?;
        let out = w.into_string();
        trace!(schema = %schema, len = out.len(), "encoded value");
        Ok(out)
    }
}
