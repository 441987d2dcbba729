use super::*;
use data::Constr;
use num_traits::ToPrimitive;

/// Checks a field-less constructor against `len` alternatives, returning its index
fn unit_index(schema: &Schema, c: &Constr, len: usize) -> Result<usize, Error> {
    let index = c
        .index
        .to_usize()
        .filter(|idx| *idx < len)
        .ok_or_else(|| Error::IndexOutOfRange {
            schema: schema.to_string(),
            index: c.index.clone(),
            len,
        })?;
    if !c.fields.is_empty() {
        return Err(Error::Arity {
            schema: schema.to_string(),
            expected: 0,
            found: c.fields.len(),
        });
    }
    Ok(index)
}

impl Struct {
    pub(super) fn fields_from_data(&self, fields: &[Data]) -> Result<Value, Error> {
        if fields.len() != self.fields.len() {
            return Err(Error::Arity {
                schema: self.to_string(),
                expected: self.fields.len(),
                found: fields.len(),
            });
        }
        self.fields
            .iter()
            .zip(fields)
            .map(|(f, data)| {
                f.schema
                    .from_data(data)
                    .map(|v| (f.name.clone(), v))
                    .map_field_err(f.name.as_str())
            })
            .collect::<Result<_, _>>()
            .map(Value::Record)
    }
}

fn variant_from_fields(variant: &Schema, fields: &[Data]) -> Result<Value, Error> {
    match (variant, fields) {
        (Schema::Struct(s), fields) => s.fields_from_data(fields),
        (_, [field]) => variant.from_data(field),
        _ => Err(Error::Arity {
            schema: variant.to_string(),
            expected: 1,
            found: fields.len(),
        }),
    }
}

impl Schema {
    /// Rebuilds a native value from [`Data`] according to this schema
    pub fn from_data(&self, data: &Data) -> Result<Value, Error> {
        match (self, data) {
            (Schema::ByteArray, Data::ByteArray(b)) => Ok(Value::Text(b.to_hex())),
            (Schema::Integer, Data::Integer(i)) => Ok(Value::Integer(i.clone())),
            (Schema::Boolean, Data::Constr(c)) => Ok(Value::Bool(unit_index(self, c, 2)? == 1)),
            (Schema::Literal(values), Data::Constr(c)) => {
                let idx = unit_index(self, c, values.len())?;
                Ok(values[idx].clone())
            }
            (Schema::Array(element), Data::List(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| element.from_data(item).map_field_err(Segment::Index(idx)))
                .collect::<Result<_, _>>()
                .map(Value::List),
            (Schema::Map(key_schema, value_schema), Data::Map(entries)) => entries
                .iter()
                .enumerate()
                .map(|(idx, (k, v))| {
                    Ok((
                        key_schema.from_data(k).map_field_err(Segment::Key(idx))?,
                        value_schema.from_data(v).map_field_err(Segment::Value(idx))?,
                    ))
                })
                .collect::<Result<_, Error>>()
                .map(Value::Map),
            (Schema::Nullable(inner), Data::Constr(c)) => {
                match (c.index.to_u8(), c.fields.as_slice()) {
                    (Some(0), [field]) => inner.from_data(field),
                    (Some(1), []) => Ok(Value::Null),
                    (Some(idx @ (0 | 1)), fields) => Err(Error::Arity {
                        schema: self.to_string(),
                        expected: if idx == 0 { 1 } else { 0 },
                        found: fields.len(),
                    }),
                    _ => Err(Error::IndexOutOfRange {
                        schema: self.to_string(),
                        index: c.index.clone(),
                        len: 2,
                    }),
                }
            }
            (Schema::Struct(s), Data::Constr(c)) => {
                if c.index.to_u64() != Some(0) {
                    return Err(Error::ConstrIndex {
                        schema: s.to_string(),
                        expected: 0,
                        found: c.index.clone(),
                    });
                }
                s.fields_from_data(&c.fields)
            }
            (Schema::Tuple(elements), Data::List(items)) => {
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
                        element.from_data(item).map_field_err(Segment::Index(idx))
                    })
                    .collect::<Result<_, _>>()
                    .map(Value::List)
            }
            (Schema::Union(variants), Data::Constr(c)) => {
                let idx = c
                    .index
                    .to_usize()
                    .filter(|idx| *idx < variants.len())
                    .ok_or_else(|| Error::IndexOutOfRange {
                        schema: self.to_string(),
                        index: c.index.clone(),
                        len: variants.len(),
                    })?;
                trace!("Decoding alternative {idx} of {}", self);
                variant_from_fields(&variants[idx], &c.fields).map_field_err(Segment::Variant(idx))
            }
            (schema, data) => Err(Error::Mismatch {
                expected: schema.to_string(),
                found: data.kind(),
            }),
        }
    }
}
