/*!
CBOR encoding of [`Data`] values, following the on-chain convention.

Integers within 64 bits use major types 0 and 1; larger magnitudes use the
bignum tags 2 and 3. Byte strings longer than 64 bytes are split into an
indefinite-length string of 64 byte chunks. Constructors are tagged by index:
121-127 for 0-6, 1280-1400 for 7-127, and otherwise tag 102 wrapping an
`[index, fields]` pair.

The decoder accepts both the node and canonical styles but is otherwise
strict: every head must be in its shortest form, bignums must not fit in 64
bits, and any trailing bytes are an error.
*/

use super::*;
use data::{Bytes, Constr};
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use plinth_cbor::{
    decode::{self, Value},
    encode::{self, Encoder, MAX_CHUNK_LEN, ToCbor},
};
use thiserror::Error;

const BIGNUM_POSITIVE: u64 = 2;
const BIGNUM_NEGATIVE: u64 = 3;
const CONSTR_TAG_COMPACT: u64 = 121;
const CONSTR_TAG_EXTENDED: u64 = 1280;
const CONSTR_TAG_GENERAL: u64 = 102;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    InvalidCbor(#[from] decode::Error),

    #[error("Additional data after the end of the encoded value")]
    AdditionalData,

    #[error("Non-canonical encoding: {0}")]
    NotCanonical(&'static str),

    #[error("Unrecognised tag {0}")]
    UnrecognisedTag(u64),

    #[error("Item has more than one tag")]
    MultipleTags,

    #[error("Byte string of {0} bytes exceeds the 64 byte limit")]
    OversizedBytes(usize),

    #[error("Tag 102 constructor must be a pair of index and field array")]
    InvalidGeneralConstr,

    #[error(transparent)]
    InvalidData(#[from] data::Error),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

fn constr_tag(index: &BigUint) -> Option<u64> {
    match index.to_u64()? {
        i @ 0..=6 => Some(CONSTR_TAG_COMPACT + i),
        i @ 7..=127 => Some(CONSTR_TAG_EXTENDED + i - 7),
        _ => None,
    }
}

fn constr_index(tag: u64) -> Option<u64> {
    match tag {
        121..=127 => Some(tag - CONSTR_TAG_COMPACT),
        1280..=1400 => Some(tag - CONSTR_TAG_EXTENDED + 7),
        _ => None,
    }
}

fn emit_bytes(encoder: &mut Encoder, bytes: &[u8], tag: Option<u64>) {
    if bytes.len() <= MAX_CHUNK_LEN {
        encoder.emit_tagged(bytes, tag)
    } else {
        encoder.emit_byte_stream(tag, |s| s.emit_chunked(bytes))
    }
}

struct Integer<'a>(&'a BigInt);

impl ToCbor for Integer<'_> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        if let Some(n) = self.0.to_u64() {
            return encoder.emit(&n);
        }
        if self.0.sign() == num_bigint::Sign::Minus {
            let magnitude = -(self.0 + 1u32);
            match magnitude.to_u64() {
                Some(n) => encoder.emit_negative(n),
                None => emit_bytes(
                    encoder,
                    &magnitude.magnitude().to_bytes_be(),
                    Some(BIGNUM_NEGATIVE),
                ),
            }
        } else {
            emit_bytes(
                encoder,
                &self.0.magnitude().to_bytes_be(),
                Some(BIGNUM_POSITIVE),
            )
        }
    }
}

struct Items<'a> {
    items: &'a [Data],
    tag: Option<u64>,
    config: &'a Config,
}

impl ToCbor for Items<'_> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        let count = (self.config.canonical || self.items.is_empty()).then_some(self.items.len());
        encoder.emit_array(count, self.tag, |a| {
            for data in self.items {
                a.emit(&Styled {
                    data,
                    config: self.config,
                });
            }
        })
    }
}

struct Styled<'a> {
    data: &'a Data,
    config: &'a Config,
}

impl ToCbor for Styled<'_> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        let config = self.config;
        match self.data {
            Data::Integer(i) => encoder.emit(&Integer(i)),
            Data::ByteArray(b) => emit_bytes(encoder, b.as_slice(), None),
            Data::List(items) => encoder.emit(&Items {
                items,
                tag: None,
                config,
            }),
            Data::Map(entries) => encoder.emit_map(entries.len(), |m| {
                for (k, v) in entries {
                    m.emit_entry(&Styled { data: k, config }, &Styled { data: v, config });
                }
            }),
            Data::Constr(c) => match constr_tag(&c.index) {
                Some(tag) => encoder.emit(&Items {
                    items: &c.fields,
                    tag: Some(tag),
                    config,
                }),
                None => {
                    let index = BigInt::from(c.index.clone());
                    encoder.emit_array(Some(2), [CONSTR_TAG_GENERAL], |a| {
                        a.emit(&Integer(&index));
                        a.emit(&Items {
                            items: &c.fields,
                            tag: None,
                            config,
                        });
                    })
                }
            },
        }
    }
}

impl ToCbor for Data {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit(&Styled {
            data: self,
            config: &Config::default(),
        })
    }
}

pub fn to_cbor(data: &Data, config: &Config) -> Vec<u8> {
    encode::emit(&Styled { data, config })
}

pub fn to_cbor_hex(data: &Data, config: &Config) -> String {
    hex::encode(to_cbor(data, config))
}

fn bignum(bytes: &[u8]) -> Result<BigInt, Error> {
    if bytes.first() == Some(&0) {
        return Err(Error::NotCanonical("bignum has leading zero bytes"));
    }
    let magnitude = BigUint::from_bytes_be(bytes);
    if magnitude.to_u64().is_some() {
        return Err(Error::NotCanonical("bignum fits in 64 bits"));
    }
    Ok(magnitude.into())
}

fn parse_bytes(chunks: &[&[u8]], tag: Option<u64>) -> Result<Data, Error> {
    let mut bytes = Vec::new();
    for chunk in chunks {
        if chunk.len() > MAX_CHUNK_LEN {
            return Err(Error::OversizedBytes(chunk.len()));
        }
        bytes.extend_from_slice(chunk);
    }
    match tag {
        None => Ok(Data::ByteArray(Bytes::new(bytes)?)),
        Some(BIGNUM_POSITIVE) => bignum(&bytes).map(Data::Integer),
        Some(BIGNUM_NEGATIVE) => bignum(&bytes).map(|m| Data::Integer(-(m + 1u32))),
        Some(tag) if constr_index(tag).is_some() || tag == CONSTR_TAG_GENERAL => {
            Err(decode::Error::IncorrectType("Array".into(), "Tagged Byte String".into()).into())
        }
        Some(tag) => Err(Error::UnrecognisedTag(tag)),
    }
}

fn parse_items(a: &mut decode::Array, depth: usize) -> Result<Vec<Data>, Error> {
    let depth = depth.checked_sub(1).ok_or(decode::Error::MaxRecursion)?;
    if !a.is_definite() {
        trace!("Parsing indefinite-length array");
    }
    let mut items = Vec::new();
    while let Some((item, _)) =
        a.try_parse_value(|value, shortest, tags| parse_data(value, shortest, tags, depth))?
    {
        items.push(item);
    }
    Ok(items)
}

fn parse_map(m: &mut decode::Map, depth: usize) -> Result<Vec<(Data, Data)>, Error> {
    let depth = depth.checked_sub(1).ok_or(decode::Error::MaxRecursion)?;
    if !m.is_definite() {
        trace!("Parsing indefinite-length map");
    }
    let mut entries = Vec::new();
    while let Some((k, _)) =
        m.try_parse_value(|value, shortest, tags| parse_data(value, shortest, tags, depth))?
    {
        let (v, _) =
            m.parse_value(|value, shortest, tags| parse_data(value, shortest, tags, depth))?;
        entries.push((k, v));
    }
    Ok(entries)
}

fn parse_general_constr(a: &mut decode::Array, depth: usize) -> Result<Data, Error> {
    trace!("Parsing tag 102 constructor");
    let depth = depth.checked_sub(1).ok_or(decode::Error::MaxRecursion)?;

    let (index, _) = a
        .try_parse_value(|value, shortest, tags| parse_data(value, shortest, tags, depth))?
        .ok_or(Error::InvalidGeneralConstr)?;
    let Data::Integer(index) = index else {
        return Err(Error::InvalidGeneralConstr);
    };
    let index = index.to_biguint().ok_or(Error::InvalidGeneralConstr)?;

    let (fields, _) = a
        .try_parse_value(|value, shortest, tags| match value {
            Value::Array(f) if tags.is_empty() => {
                if !shortest {
                    return Err(Error::NotCanonical("non-shortest array length"));
                }
                parse_items(f, depth)
            }
            _ => Err(Error::InvalidGeneralConstr),
        })?
        .ok_or(Error::InvalidGeneralConstr)?;

    if a.end()?.is_none() {
        return Err(Error::InvalidGeneralConstr);
    }
    Ok(Data::Constr(Constr { index, fields }))
}

fn parse_array(a: &mut decode::Array, tag: Option<u64>, depth: usize) -> Result<Data, Error> {
    let Some(tag) = tag else {
        return parse_items(a, depth).map(Data::List);
    };
    if tag == CONSTR_TAG_GENERAL {
        return parse_general_constr(a, depth);
    }
    match constr_index(tag) {
        Some(index) => Ok(Data::Constr(Constr {
            index: index.into(),
            fields: parse_items(a, depth)?,
        })),
        None if tag == BIGNUM_POSITIVE || tag == BIGNUM_NEGATIVE => {
            Err(decode::Error::IncorrectType("Byte String".into(), "Tagged Array".into()).into())
        }
        None => Err(Error::UnrecognisedTag(tag)),
    }
}

fn parse_data(value: Value, shortest: bool, tags: Vec<u64>, depth: usize) -> Result<Data, Error> {
    if !shortest {
        return Err(Error::NotCanonical("non-shortest length or value"));
    }
    let tag = match tags.as_slice() {
        [] => None,
        [tag] => Some(*tag),
        _ => return Err(Error::MultipleTags),
    };

    match value {
        Value::UnsignedInteger(n) if tag.is_none() => Ok(Data::Integer(n.into())),
        Value::NegativeInteger(n) if tag.is_none() => {
            Ok(Data::Integer(-(BigInt::from(n) + 1u32)))
        }
        Value::Bytes(b) => parse_bytes(&[b], tag),
        Value::ByteStream(chunks) => {
            trace!("Parsing chunked byte string of {} chunks", chunks.len());
            parse_bytes(&chunks, tag)
        }
        Value::Array(a) => parse_array(a, tag, depth),
        Value::Map(m) if tag.is_none() => parse_map(m, depth).map(Data::Map),
        value => match tag {
            Some(tag @ (BIGNUM_POSITIVE | BIGNUM_NEGATIVE)) => Err(decode::Error::IncorrectType(
                format!("Byte String for tag {tag}"),
                value.type_name(true),
            )
            .into()),
            Some(tag) if tag == CONSTR_TAG_GENERAL || constr_index(tag).is_some() => Err(
                decode::Error::IncorrectType("Array".into(), value.type_name(true)).into(),
            ),
            Some(tag) => Err(Error::UnrecognisedTag(tag)),
            None => Err(
                decode::Error::IncorrectType("Data".into(), value.type_name(false)).into(),
            ),
        },
    }
}

pub fn from_cbor(data: &[u8], config: &Config) -> Result<Data, Error> {
    let (value, len) = decode::parse_value(data, |value, shortest, tags| {
        parse_data(value, shortest, tags, config.max_depth)
    })?;
    if len != data.len() {
        return Err(Error::AdditionalData);
    }
    Ok(value)
}

pub fn from_cbor_hex(s: &str, config: &Config) -> Result<Data, Error> {
    from_cbor(&hex::decode(s)?, config)
}

impl decode::FromCbor for Data {
    type Error = self::Error;

    fn try_from_cbor(data: &[u8]) -> Result<Option<(Self, bool, usize)>, Self::Error> {
        let depth = Config::default().max_depth;
        decode::try_parse_value(data, |value, shortest, tags| {
            parse_data(value, shortest, tags, depth)
        })
        .map(|o| o.map(|(value, len)| (value, true, len)))
    }
}
