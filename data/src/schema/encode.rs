use super::*;
use data::{Bytes, Constr};

pub(super) fn constr(index: usize, fields: Vec<Data>) -> Data {
    Data::Constr(Constr::new(index as u64, fields))
}

impl Struct {
    pub(super) fn fields_to_data(&self, value: &Value) -> Result<Vec<Data>, Error> {
        let Value::Record(entries) = value else {
            return Err(Error::Mismatch {
                expected: self.to_string(),
                found: value.kind(),
            });
        };

        if let Some((name, _)) = entries
            .iter()
            .find(|(name, _)| !self.fields.iter().any(|f| &f.name == name))
        {
            return Err(Error::UnexpectedField(name.clone()));
        }
        for (idx, (name, _)) in entries.iter().enumerate() {
            if entries[..idx].iter().any(|(prev, _)| prev == name) {
                return Err(Error::DuplicateField(name.clone()));
            }
        }

        self.fields
            .iter()
            .map(|f| {
                let v = value
                    .field(&f.name)
                    .ok_or_else(|| Error::MissingField(f.name.clone()))?;
                f.schema.to_data(v).map_field_err(f.name.as_str())
            })
            .collect()
    }
}

fn variant_fields(variant: &Schema, value: &Value) -> Result<Vec<Data>, Error> {
    match variant {
        Schema::Struct(s) => s.fields_to_data(value),
        _ => Ok(vec![variant.to_data(value)?]),
    }
}

impl Schema {
    /// Converts a native value into [`Data`] according to this schema.
    ///
    /// A union picks the first alternative that accepts the value.
    pub fn to_data(&self, value: &Value) -> Result<Data, Error> {
        match (self, value) {
            (Schema::ByteArray, Value::Text(s)) => Ok(Data::ByteArray(Bytes::from_hex(s)?)),
            (Schema::Integer, Value::Integer(i)) => Ok(Data::Integer(i.clone())),
            (Schema::Boolean, Value::Bool(b)) => Ok(constr(*b as usize, Vec::new())),
            (Schema::Literal(values), value) => values
                .iter()
                .position(|v| v == value)
                .map(|idx| constr(idx, Vec::new()))
                .ok_or_else(|| Error::UnknownLiteral {
                    schema: self.to_string(),
                    value: Literal(value).to_string(),
                }),
            (Schema::Array(element), Value::List(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| element.to_data(item).map_field_err(Segment::Index(idx)))
                .collect::<Result<_, _>>()
                .map(Data::List),
            (Schema::Map(key_schema, value_schema), Value::Map(entries)) => entries
                .iter()
                .enumerate()
                .map(|(idx, (k, v))| {
                    Ok((
                        key_schema.to_data(k).map_field_err(Segment::Key(idx))?,
                        value_schema.to_data(v).map_field_err(Segment::Value(idx))?,
                    ))
                })
                .collect::<Result<_, Error>>()
                .map(Data::Map),
            (Schema::Nullable(_), Value::Null) => Ok(constr(1, Vec::new())),
            (Schema::Nullable(inner), value) => Ok(constr(0, vec![inner.to_data(value)?])),
            (Schema::Struct(s), value) => s.fields_to_data(value).map(|fields| constr(0, fields)),
            (Schema::Tuple(elements), Value::List(items)) => {
                if elements.len() != items.len() {
                    return Err(Error::Arity {
                        schema: self.to_string(),
                        expected: elements.len(),
                        found: items.len(),
                    });
                }
                elements
                    .iter()
                    .zip(items)
                    .enumerate()
                    .map(|(idx, (element, item))| {
                        element.to_data(item).map_field_err(Segment::Index(idx))
                    })
                    .collect::<Result<_, _>>()
                    .map(Data::List)
            }
            (Schema::Union(variants), value) => {
                for (idx, variant) in variants.iter().enumerate() {
                    match variant_fields(variant, value) {
                        Ok(fields) => {
                            trace!("Encoding {} as alternative {idx} of {}", value.kind(), self);
                            return Ok(constr(idx, fields));
                        }
                        Err(e) => trace!("Alternative {idx} ({variant}) rejected: {e}"),
                    }
                }
                Err(Error::NoMatchingVariant {
                    schema: self.to_string(),
                    found: value.kind(),
                })
            }
            (schema, value) => Err(Error::Mismatch {
                expected: schema.to_string(),
                found: value.kind(),
            }),
        }
    }
}
