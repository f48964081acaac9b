//! Parsing of JSON schema descriptions (`.avsc` text) into [`Schema`] trees.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::{Map, Value as Json};
use tracing::trace;

use super::{EnumSchema, Field, FixedSchema, Name, RecordSchema, Schema};
use crate::error::{Error, Result};

use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct RawRecord {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: Json,
}

#[derive(Debug, Deserialize)]
struct RawEnum {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    symbols: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawFixed {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    size: usize,
}

impl Schema {
    /// Parses schema text such as the contents of an `.avsc` file.
    pub fn parse_str(input: &str) -> Result<Schema> {
        let json: Json = serde_json::from_str(input)?;
        Schema::parse(&json)
    }

    /// Parses a schema description already loaded as JSON.
    pub fn parse(json: &Json) -> Result<Schema> {
        Parser::default().parse(json, None)
    }
}

fn primitive(name: &str) -> Option<Schema> {
    Some(match name {
        "null" => Schema::Null,
        "boolean" => Schema::Boolean,
        "int" => Schema::Int,
        "long" => Schema::Long,
        "float" => Schema::Float,
        "double" => Schema::Double,
        "bytes" => Schema::Bytes,
        "string" => Schema::String,
        _ => return None,
    })
}

#[derive(Default)]
struct Parser {
    names: HashMap<String, Schema>,
    // records whose fields are still being parsed
    pending: HashSet<String>,
}

impl Parser {
    fn parse(&mut self, json: &Json, namespace: Option<&str>) -> Result<Schema> {
        match json {
            Json::String(s) => self.parse_reference(s, namespace),
            Json::Array(items) => {
                let branches = items
                    .iter()
                    .map(|item| self.parse(item, namespace))
                    .collect::<Result<Vec<_>>>()?;
                Schema::union(branches)
            }
            Json::Object(obj) => self.parse_object(json, obj, namespace),
            other => Err(Error::Schema(format!("unexpected schema element: {}", other))),
        }
    }

    fn parse_reference(&self, s: &str, namespace: Option<&str>) -> Result<Schema> {
        if let Some(schema) = primitive(s) {
            return Ok(schema);
        }
        let mut candidates = Vec::with_capacity(2);
        if !s.contains('.') {
            if let Some(ns) = namespace.filter(|ns| !ns.is_empty()) {
                candidates.push(format!("{}.{}", ns, s));
            }
        }
        candidates.push(s.to_string());

        for full_name in &candidates {
            if self.pending.contains(full_name) {
                return Err(Error::Schema(format!(
                    "recursive reference to `{}` is not supported",
                    full_name
                )));
            }
            if let Some(schema) = self.names.get(full_name) {
                return Ok(schema.clone());
            }
        }
        Err(Error::Schema(format!("unknown type `{}`", s)))
    }

    fn parse_object(
        &mut self,
        json: &Json,
        obj: &Map<String, Json>,
        namespace: Option<&str>,
    ) -> Result<Schema> {
        let ty = obj
            .get("type")
            .ok_or_else(|| Error::Schema(format!("missing `type` in {}", json)))?;
        let ty = match ty {
            Json::String(s) => s.as_str(),
            // {"type": {...}} and {"type": [...]} wrap a nested schema
            nested => return self.parse(nested, namespace),
        };
        match ty {
            "record" | "error" => self.parse_record(json, namespace),
            "enum" => {
                let raw = RawEnum::deserialize(json)?;
                let name = Name::new(&raw.name, raw.namespace.as_deref().or(namespace))?;
                let schema = Schema::Enum(Arc::new(EnumSchema::new(name, raw.symbols)?));
                self.register(schema)
            }
            "fixed" => {
                let raw = RawFixed::deserialize(json)?;
                let name = Name::new(&raw.name, raw.namespace.as_deref().or(namespace))?;
                let schema = Schema::Fixed(Arc::new(FixedSchema {
                    name,
                    size: raw.size,
                }));
                self.register(schema)
            }
            "array" => {
                let items = obj
                    .get("items")
                    .ok_or_else(|| Error::Schema("array schema without `items`".to_string()))?;
                Ok(Schema::array(self.parse(items, namespace)?))
            }
            "map" => {
                let values = obj
                    .get("values")
                    .ok_or_else(|| Error::Schema("map schema without `values`".to_string()))?;
                Ok(Schema::map(self.parse(values, namespace)?))
            }
            other => self.parse_reference(other, namespace),
        }
    }

    fn parse_record(&mut self, json: &Json, namespace: Option<&str>) -> Result<Schema> {
        let raw = RawRecord::deserialize(json)?;
        let name = Name::new(&raw.name, raw.namespace.as_deref().or(namespace))?;
        let full_name = name.full_name().to_string();
        if self.names.contains_key(&full_name) || !self.pending.insert(full_name.clone()) {
            return Err(Error::Schema(format!("redefinition of `{}`", full_name)));
        }

        let fields = raw
            .fields
            .iter()
            .map(|f| -> Result<Field> {
                Ok(Field::new(f.name.clone(), self.parse(&f.ty, name.namespace())?))
            })
            .collect::<Result<Vec<_>>>();
        self.pending.remove(&full_name);

        let schema = Schema::Record(Arc::new(RecordSchema::new(name, fields?)?));
        self.register(schema)
    }

    fn register(&mut self, schema: Schema) -> Result<Schema> {
        let full_name = schema.full_name().to_string();
        if self.names.contains_key(&full_name) {
            return Err(Error::Schema(format!("redefinition of `{}`", full_name)));
        }
        trace!(name = %full_name, kind = %schema.kind(), "registered named type");
        self.names.insert(full_name, schema.clone());
        Ok(schema)
    }
}
