use tracing::{debug, trace};

use crate::{
    Result,
    encode::{Encoder, writer::JsonWriter},
    error::Error,
    number,
    options::NonFinite,
    schema::{RecordSchema, Schema, UnionSchema},
    validate::Validator,
    value::Value,
};

impl<V: Validator> Encoder<V> {
    pub(crate) fn encode_value(
        &self,
        schema: &Schema,
        value: &Value,
        w: &mut JsonWriter,
    ) -> Result<()> {
        match schema {
            Schema::Null | Schema::Boolean | Schema::Int | Schema::Long | Schema::String => {
                self.encode_primitive(schema, value, w)
            }
            Schema::Float | Schema::Double => self.encode_float(schema, value, w),
            Schema::Bytes | Schema::Fixed(_) => self.encode_bytes(schema, value, w),
            Schema::Enum(e) => {
                self.ensure(schema, value)?;
                match value {
                    Value::String(s) if e.contains(s) => {
                        w.string(s);
                        Ok(())
                    }
                    _ => Err(Error::type_mismatch(schema, value)),
                }
            }
            Schema::Array(items) => {
                let Value::Array(elems) = value else {
                    return Err(Error::type_mismatch(schema, value));
                };
                w.begin_array();
                for elem in elems {
                    self.encode_value(items, elem, w)?;
                }
                w.end_array();
                Ok(())
            }
            Schema::Map(values) => {
                let Value::Map(entries) = value else {
                    return Err(Error::type_mismatch(schema, value));
                };
                // keys in insertion order
                w.begin_object();
                for (key, entry) in entries {
                    w.key(key);
                    self.encode_value(values, entry, w)?;
                }
                w.end_object();
                Ok(())
            }
            Schema::Record(record) => self.encode_record(schema, record, value, w),
            Schema::Union(union) => self.encode_union(schema, union, value, w),
        }
    }

    fn ensure(&self, schema: &Schema, value: &Value) -> Result<()> {
        if self.validator.matches(schema, value) {
            Ok(())
        } else {
            Err(Error::type_mismatch(schema, value))
        }
    }

    fn encode_primitive(&self, schema: &Schema, value: &Value, w: &mut JsonWriter) -> Result<()> {
        self.ensure(schema, value)?;
        match (schema, value) {
            (Schema::Null, Value::Null) => w.null(),
            (Schema::Boolean, Value::Boolean(b)) => w.bool(*b),
            (Schema::Int | Schema::Long, Value::Int(n)) => w.number(&n.to_string()),
            (Schema::Long, Value::Long(n)) => w.number(&n.to_string()),
            (Schema::Int, Value::Long(n)) if i32::try_from(*n).is_ok() => w.number(&n.to_string()),
            (Schema::String, Value::String(s)) => w.string(s),
            _ => return Err(Error::type_mismatch(schema, value)),
        }
        Ok(())
    }

    fn encode_float(&self, schema: &Schema, value: &Value, w: &mut JsonWriter) -> Result<()> {
        self.ensure(schema, value)?;
        let literal = match *value {
            Value::Int(n) => number::format_integral(i64::from(n)),
            Value::Long(n) => number::format_integral(n),
            Value::Float(f) if f.is_finite() => number::format_f32(f),
            Value::Double(f) if f.is_finite() => number::format_f64(f),
            Value::Float(f) => return self.encode_non_finite(schema, value, f64::from(f), w),
            Value::Double(f) => return self.encode_non_finite(schema, value, f, w),
            _ => return Err(Error::type_mismatch(schema, value)),
        };
        w.number(&literal);
        Ok(())
    }

    fn encode_non_finite(
        &self,
        schema: &Schema,
        value: &Value,
        f: f64,
        w: &mut JsonWriter,
    ) -> Result<()> {
        match self.options().non_finite {
            NonFinite::Reject => Err(Error::unsupported_value(schema, value)),
            NonFinite::AsString => {
                let text = if f.is_nan() {
                    "NaN"
                } else if f.is_sign_positive() {
                    "Infinity"
                } else {
                    "-Infinity"
                };
                w.string(text);
                Ok(())
            }
        }
    }

    fn encode_bytes(&self, schema: &Schema, value: &Value, w: &mut JsonWriter) -> Result<()> {
        self.ensure(schema, value)?;
        let bytes = value
            .as_bytes()
            .ok_or_else(|| Error::type_mismatch(schema, value))?;
        if let Schema::Fixed(fixed) = schema {
            if bytes.len() != fixed.size {
                return Err(Error::type_mismatch(schema, value));
            }
        }
        w.latin1_string(bytes);
        Ok(())
    }

    fn encode_record(
        &self,
        schema: &Schema,
        record: &RecordSchema,
        value: &Value,
        w: &mut JsonWriter,
    ) -> Result<()> {
        if !matches!(value, Value::Map(_)) {
            return Err(Error::type_mismatch(schema, value));
        }
        // declaration order; undeclared entries are dropped
        w.begin_object();
        for field in record.fields() {
            let Some(field_value) = value.get(&field.name) else {
                debug!(record = %schema, field = %field.name, "missing record field");
                return Err(Error::type_mismatch(schema, value));
            };
            w.key(&field.name);
            self.encode_value(&field.schema, field_value, w)?;
        }
        w.end_object();
        Ok(())
    }

    fn encode_union(
        &self,
        schema: &Schema,
        union: &UnionSchema,
        value: &Value,
        w: &mut JsonWriter,
    ) -> Result<()> {
        if value.is_null() && union.null_index().is_some() {
            w.null();
            return Ok(());
        }
        let Some((index, branch)) = union
            .branches()
            .iter()
            .enumerate()
            .find(|(_, branch)| self.validator.matches(branch, value))
        else {
            return Err(Error::union_no_match(schema, value));
        };
        trace!(union = %schema, branch = %branch, index, "selected union branch");
        w.begin_object();
        w.key(branch.full_name());
        self.encode_value(branch, value, w)?;
        w.end_object();
        Ok(())
    }
}
