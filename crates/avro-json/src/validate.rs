//! Deciding whether a datum conforms to a schema.

use crate::schema::Schema;
use crate::value::Value;

/// Reports whether a value is structurally and type-compatible with a schema.
///
/// Implementations must be deterministic and free of side effects: the
/// encoder calls `matches` both to gate a whole value and to pick the first
/// compatible union branch.
pub trait Validator {
    fn matches(&self, schema: &Schema, value: &Value) -> bool;
}

impl<V: Validator + ?Sized> Validator for &V {
    fn matches(&self, schema: &Schema, value: &Value) -> bool {
        (**self).matches(schema, value)
    }
}

/// The permissive datum rules: integer datums are accepted by the float
/// kinds, strings by `bytes` and `fixed`, and records ignore undeclared
/// entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatumValidator;

impl Validator for DatumValidator {
    fn matches(&self, schema: &Schema, value: &Value) -> bool {
        match schema {
            Schema::Null => value.is_null(),
            Schema::Boolean => matches!(value, Value::Boolean(_)),
            Schema::Int => match value {
                Value::Int(_) => true,
                Value::Long(n) => i32::try_from(*n).is_ok(),
                _ => false,
            },
            Schema::Long => matches!(value, Value::Int(_) | Value::Long(_)),
            Schema::Float | Schema::Double => matches!(
                value,
                Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Double(_)
            ),
            Schema::String => matches!(value, Value::String(_)),
            Schema::Bytes => value.as_bytes().is_some(),
            Schema::Fixed(fixed) => value.as_bytes().is_some_and(|b| b.len() == fixed.size),
            Schema::Enum(e) => match value {
                Value::String(s) => e.contains(s),
                _ => false,
            },
            Schema::Array(items) => match value {
                Value::Array(elems) => elems.iter().all(|v| self.matches(items, v)),
                _ => false,
            },
            Schema::Map(values) => match value {
                Value::Map(entries) => entries.iter().all(|(_, v)| self.matches(values, v)),
                _ => false,
            },
            Schema::Record(record) => match value {
                Value::Map(_) => record.fields().iter().all(|field| {
                    value
                        .get(&field.name)
                        .is_some_and(|v| self.matches(&field.schema, v))
                }),
                _ => false,
            },
            Schema::Union(union) => union.branches().iter().any(|b| self.matches(b, value)),
        }
    }
}
