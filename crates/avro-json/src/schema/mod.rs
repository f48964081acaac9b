//! In-memory schema tree.
//!
//! Composite nodes hold their children behind [`Arc`], so a parsed schema is
//! cheap to clone and can be shared across threads and encode calls.

#[cfg(feature = "json")]
mod parse;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Schema kind without its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Fixed,
    Enum,
    Array,
    Map,
    Record,
    Union,
}

impl Kind {
    /// The keyword used for this kind in schema text.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Int => "int",
            Kind::Long => "long",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::Bytes => "bytes",
            Kind::String => "string",
            Kind::Fixed => "fixed",
            Kind::Enum => "enum",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Union => "union",
        }
    }

    pub fn is_named(self) -> bool {
        matches!(self, Kind::Fixed | Kind::Enum | Kind::Record)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a named type, optionally qualified by a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    name: String,
    namespace: Option<String>,
    full_name: String,
}

impl Name {
    /// Builds a name. A dotted `name` carries its own namespace and ignores
    /// `namespace`; an empty namespace means none.
    pub fn new(name: &str, namespace: Option<&str>) -> Result<Self> {
        let (namespace, name) = match name.rsplit_once('.') {
            Some((ns, short)) => (Some(ns), short),
            None => (namespace.filter(|ns| !ns.is_empty()), name),
        };
        validate_identifier(name)?;
        if let Some(ns) = namespace {
            for part in ns.split('.') {
                validate_identifier(part)?;
            }
        }
        let full_name = match namespace {
            Some(ns) => format!("{}.{}", ns, name),
            None => name.to_string(),
        };
        Ok(Self {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            full_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// `namespace.name`, or just `name` without a namespace.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

fn validate_identifier(s: &str) -> Result<()> {
    let mut chars = s.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::Schema(format!("invalid name `{}`", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSchema {
    pub name: Name,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    name: Name,
    symbols: Vec<String>,
}

impl EnumSchema {
    pub fn new(name: Name, symbols: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            validate_identifier(symbol)?;
            if !seen.insert(symbol.as_str()) {
                return Err(Error::Schema(format!(
                    "duplicate symbol `{}` in enum `{}`",
                    symbol,
                    name.full_name()
                )));
            }
        }
        Ok(Self { name, symbols })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

impl Field {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    name: Name,
    fields: Vec<Field>,
}

impl RecordSchema {
    pub fn new(name: Name, fields: Vec<Field>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            validate_identifier(&field.name)?;
            if !seen.insert(field.name.as_str()) {
                return Err(Error::Schema(format!(
                    "duplicate field `{}` in record `{}`",
                    field.name,
                    name.full_name()
                )));
            }
        }
        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionSchema {
    branches: Vec<Schema>,
}

impl UnionSchema {
    /// Checks the branch rules: no directly nested unions, at most one branch
    /// per unnamed kind, and distinct full names for named branches.
    pub fn new(branches: Vec<Schema>) -> Result<Self> {
        let mut kinds = HashSet::new();
        let mut names = HashSet::new();
        for branch in &branches {
            let kind = branch.kind();
            if kind == Kind::Union {
                return Err(Error::Schema(
                    "unions may not immediately contain other unions".to_string(),
                ));
            }
            let fresh = if kind.is_named() {
                names.insert(branch.full_name())
            } else {
                kinds.insert(kind)
            };
            if !fresh {
                return Err(Error::Schema(format!(
                    "duplicate `{}` branch in union",
                    branch.full_name()
                )));
            }
        }
        Ok(Self { branches })
    }

    /// Branches in declaration order.
    pub fn branches(&self) -> &[Schema] {
        &self.branches
    }

    pub fn null_index(&self) -> Option<usize> {
        self.branches.iter().position(|b| matches!(b, Schema::Null))
    }
}

/// A schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Fixed(Arc<FixedSchema>),
    Enum(Arc<EnumSchema>),
    Array(Arc<Schema>),
    Map(Arc<Schema>),
    Record(Arc<RecordSchema>),
    Union(Arc<UnionSchema>),
}

impl Schema {
    pub fn array(items: Schema) -> Self {
        Schema::Array(Arc::new(items))
    }

    pub fn map(values: Schema) -> Self {
        Schema::Map(Arc::new(values))
    }

    pub fn union(branches: Vec<Schema>) -> Result<Self> {
        Ok(Schema::Union(Arc::new(UnionSchema::new(branches)?)))
    }

    pub fn record(name: Name, fields: Vec<Field>) -> Result<Self> {
        Ok(Schema::Record(Arc::new(RecordSchema::new(name, fields)?)))
    }

    pub fn enumeration(name: Name, symbols: Vec<String>) -> Result<Self> {
        Ok(Schema::Enum(Arc::new(EnumSchema::new(name, symbols)?)))
    }

    pub fn fixed(name: Name, size: usize) -> Self {
        Schema::Fixed(Arc::new(FixedSchema { name, size }))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Schema::Null => Kind::Null,
            Schema::Boolean => Kind::Boolean,
            Schema::Int => Kind::Int,
            Schema::Long => Kind::Long,
            Schema::Float => Kind::Float,
            Schema::Double => Kind::Double,
            Schema::Bytes => Kind::Bytes,
            Schema::String => Kind::String,
            Schema::Fixed(_) => Kind::Fixed,
            Schema::Enum(_) => Kind::Enum,
            Schema::Array(_) => Kind::Array,
            Schema::Map(_) => Kind::Map,
            Schema::Record(_) => Kind::Record,
            Schema::Union(_) => Kind::Union,
        }
    }

    pub fn name(&self) -> Option<&Name> {
        match self {
            Schema::Fixed(f) => Some(&f.name),
            Schema::Enum(e) => Some(e.name()),
            Schema::Record(r) => Some(r.name()),
            _ => None,
        }
    }

    /// The key that tags this schema when it is selected as a union branch:
    /// the namespace-qualified name for named kinds, the kind keyword
    /// otherwise.
    pub fn full_name(&self) -> &str {
        match self.name() {
            Some(name) => name.full_name(),
            None => self.kind().as_str(),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_name_overrides_namespace() {
        let name = Name::new("com.example.Rec", Some("org.other")).unwrap();
        assert_eq!(name.name(), "Rec");
        assert_eq!(name.namespace(), Some("com.example"));
        assert_eq!(name.full_name(), "com.example.Rec");
    }

    #[test]
    fn empty_namespace_is_none() {
        let name = Name::new("Rec", Some("")).unwrap();
        assert_eq!(name.namespace(), None);
        assert_eq!(name.full_name(), "Rec");
    }

    #[test]
    fn rejects_bad_identifiers() {
        assert!(Name::new("1abc", None).is_err());
        assert!(Name::new("a-b", None).is_err());
        assert!(Name::new("Rec", Some("com..example")).is_err());
    }

    #[test]
    fn full_name_of_unnamed_kinds_is_keyword() {
        assert_eq!(Schema::Int.full_name(), "int");
        assert_eq!(Schema::array(Schema::Int).full_name(), "array");
        assert_eq!(Schema::map(Schema::String).full_name(), "map");
    }

    #[test]
    fn union_rules() {
        assert!(Schema::union(vec![Schema::Null, Schema::Int]).is_ok());
        assert!(Schema::union(vec![Schema::Null, Schema::Null]).is_err());
        assert!(Schema::union(vec![Schema::array(Schema::Int), Schema::array(Schema::Long)]).is_err());

        let inner = Schema::union(vec![Schema::Null, Schema::Int]).unwrap();
        assert!(Schema::union(vec![Schema::String, inner]).is_err());

        let a = Schema::record(Name::new("a", None).unwrap(), vec![]).unwrap();
        let b = Schema::record(Name::new("b", None).unwrap(), vec![]).unwrap();
        assert!(Schema::union(vec![a.clone(), b]).is_ok());
        assert!(Schema::union(vec![a.clone(), a]).is_err());
    }

    #[test]
    fn null_index_finds_null_branch() {
        let s = UnionSchema::new(vec![Schema::Int, Schema::Null]).unwrap();
        assert_eq!(s.null_index(), Some(1));
        let s = UnionSchema::new(vec![Schema::Int, Schema::String]).unwrap();
        assert_eq!(s.null_index(), None);
    }

    #[test]
    fn record_rejects_duplicate_fields() {
        let name = Name::new("r", None).unwrap();
        let fields = vec![Field::new("a", Schema::Int), Field::new("a", Schema::Long)];
        assert!(RecordSchema::new(name, fields).is_err());
    }

    #[test]
    fn enum_rejects_duplicate_symbols() {
        let name = Name::new("e", None).unwrap();
        assert!(EnumSchema::new(name, vec!["A".into(), "A".into()]).is_err());
    }
}
