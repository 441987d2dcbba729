/*!
Schema combinators describing how a native [`Value`] maps onto [`Data`].

A [`Schema`] is a plain descriptor tree. Encoding walks the tree alongside a
native value to build the equivalent [`Data`]; decoding walks it alongside a
[`Data`] to rebuild the native value. Both directions report failures with the
path to the offending sub-value, see [`Error::path`].

| Schema | Native | Data |
|---|---|---|
| `ByteArray` | hex [`Value::Text`] | `ByteArray` |
| `Integer` | [`Value::Integer`] | `Integer` |
| `Boolean` | [`Value::Bool`] | `Constr(0 = false, 1 = true, [])` |
| `Literal(v0, v1, ..)` | one of the listed values | `Constr(position, [])` |
| `Array(t)` | [`Value::List`] | `List` |
| `Map(k, v)` | [`Value::Map`] | `Map` |
| `Nullable(t)` | [`Value::Null`] or a `t` | `Constr(1, [])` or `Constr(0, [t])` |
| `Struct{..}` | [`Value::Record`] | `Constr(0, fields)` |
| `Tuple(t0, t1, ..)` | [`Value::List`] of that length | `List` |
| `Union(s0, s1, ..)` | anything one alternative accepts | `Constr(position, ..)` |
*/

use super::*;

mod decode;
mod encode;
mod error;


pub use error::{CaptureFieldErr, Error, Segment};

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

/// A record encoded as constructor 0 with one field per member, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    pub name: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    ByteArray,
    Integer,
    Boolean,
    Literal(Vec<Value>),
    Array(Box<Schema>),
    Map(Box<Schema>, Box<Schema>),
    Nullable(Box<Schema>),
    Struct(Struct),
    Tuple(Vec<Schema>),
    Union(Vec<Schema>),
}

impl Schema {
    pub fn literal<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Schema::Literal(values.into_iter().map(Into::into).collect())
    }

    pub fn array(element: Schema) -> Self {
        Schema::Array(Box::new(element))
    }

    pub fn map(key: Schema, value: Schema) -> Self {
        Schema::Map(Box::new(key), Box::new(value))
    }

    pub fn nullable(inner: Schema) -> Self {
        Schema::Nullable(Box::new(inner))
    }

    pub fn structure<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Schema::Struct(Struct::new(None, fields))
    }

    pub fn named_structure<I, K>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Schema::Struct(Struct::new(Some(name.into()), fields))
    }

    pub fn tuple(elements: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Tuple(elements.into_iter().collect())
    }

    pub fn union(variants: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Union(variants.into_iter().collect())
    }
}

impl Struct {
    pub fn new<I, K>(name: Option<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self {
            name,
            fields: fields
                .into_iter()
                .map(|(name, schema)| Field {
                    name: name.into(),
                    schema,
                })
                .collect(),
        }
    }
}

fn write_list<T: core::fmt::Display>(
    f: &mut core::fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> core::fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

struct Literal<'a>(&'a Value);

impl core::fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s:?}"),
            v => f.write_str(v.kind()),
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.name, self.schema)
    }
}

impl core::fmt::Display for Struct {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        f.write_str("Struct{")?;
        write_list(f, &self.fields, ", ")?;
        f.write_str("}")
    }
}

impl core::fmt::Display for Schema {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Schema::ByteArray => f.write_str("ByteArray"),
            Schema::Integer => f.write_str("Integer"),
            Schema::Boolean => f.write_str("Boolean"),
            Schema::Literal(values) => {
                f.write_str("Literal(")?;
                write_list(f, &values.iter().map(Literal).collect::<Vec<_>>(), " | ")?;
                f.write_str(")")
            }
            Schema::Array(element) => write!(f, "Array<{element}>"),
            Schema::Map(key, value) => write!(f, "Map<{key}, {value}>"),
            Schema::Nullable(inner) => write!(f, "Nullable<{inner}>"),
            Schema::Struct(s) => write!(f, "{s}"),
            Schema::Tuple(elements) => {
                f.write_str("Tuple[")?;
                write_list(f, elements, ", ")?;
                f.write_str("]")
            }
            Schema::Union(variants) => {
                f.write_str("Union<")?;
                write_list(f, variants, " | ")?;
                f.write_str(">")
            }
        }
    }
}
