/*!
The Plutus Data algebra: the five shapes that an on-chain datum or redeemer
can take.

Values are immutable once built. The factory functions validate their inputs
and return [`Error`] rather than panicking, so untrusted hex or indices can be
passed straight through.
*/

use core::cmp::Ordering;
use num_bigint::{BigInt, BigUint};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Byte array must contain at least one byte")]
    EmptyByteArray,

    #[error("Hex string has odd length {0}")]
    OddLengthHex(usize),

    #[error("Invalid hex character {character:?} at position {position}")]
    InvalidHexCharacter { character: char, position: usize },

    #[error("Constructor index must not be negative, found {0}")]
    NegativeConstrIndex(BigInt),
}

/// A non-empty byte string, rendered externally as lowercase hex.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub fn new(bytes: Vec<u8>) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::EmptyByteArray);
        }
        Ok(Self(bytes))
    }

    /// Parses a lowercase hex string. Upper case digits, prefixes such as
    /// `0x` and whitespace are all rejected.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        if s.is_empty() {
            return Err(Error::EmptyByteArray);
        }
        if let Some((position, character)) = s
            .char_indices()
            .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(Error::InvalidHexCharacter {
                character,
                position,
            });
        }
        hex::decode(s).map(Self).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => Error::InvalidHexCharacter {
                character: c,
                position: index,
            },
            _ => Error::OddLengthHex(s.len()),
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Bytes {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&[u8]> for Bytes {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::new(value.to_vec())
    }
}

impl core::str::FromStr for Bytes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl core::fmt::Display for Bytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl core::fmt::Debug for Bytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "h'{}'", self.to_hex())
    }
}

/// A constructor application: the variant `index` and its positional `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constr {
    pub index: BigUint,
    pub fields: Vec<Data>,
}

impl Constr {
    pub fn new(index: impl Into<BigUint>, fields: Vec<Data>) -> Self {
        Self {
            index: index.into(),
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Data {
    Integer(BigInt),
    ByteArray(Bytes),
    List(Vec<Data>),
    Map(Vec<(Data, Data)>),
    Constr(Constr),
}

pub fn make_integer(value: impl Into<BigInt>) -> Data {
    Data::Integer(value.into())
}

pub fn make_byte_array(hex: &str) -> Result<Data, Error> {
    Bytes::from_hex(hex).map(Data::ByteArray)
}

pub fn make_bytes(bytes: impl Into<Vec<u8>>) -> Result<Data, Error> {
    Bytes::new(bytes.into()).map(Data::ByteArray)
}

pub fn make_list(items: Vec<Data>) -> Data {
    Data::List(items)
}

pub fn make_map(entries: Vec<(Data, Data)>) -> Data {
    Data::Map(entries)
}

pub fn make_constr(index: impl Into<BigInt>, fields: Vec<Data>) -> Result<Data, Error> {
    let index = index.into();
    match index.to_biguint() {
        Some(index) => Ok(Data::Constr(Constr { index, fields })),
        None => Err(Error::NegativeConstrIndex(index)),
    }
}

impl Data {
    pub fn is_integer(&self) -> bool {
        matches!(self, Data::Integer(_))
    }

    pub fn is_byte_array(&self) -> bool {
        matches!(self, Data::ByteArray(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Data::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Data::Map(_))
    }

    pub fn is_constr(&self) -> bool {
        matches!(self, Data::Constr(_))
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Data::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&Bytes> {
        match self {
            Data::ByteArray(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Data]> {
        match self {
            Data::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Data, Data)]> {
        match self {
            Data::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_constr(&self) -> Option<&Constr> {
        match self {
            Data::Constr(c) => Some(c),
            _ => None,
        }
    }

    /// The variant name, as used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Data::Integer(_) => "Integer",
            Data::ByteArray(_) => "ByteArray",
            Data::List(_) => "List",
            Data::Map(_) => "Map",
            Data::Constr(_) => "Constr",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Data::Constr(_) => 0,
            Data::Map(_) => 1,
            Data::List(_) => 2,
            Data::Integer(_) => 3,
            Data::ByteArray(_) => 4,
        }
    }

    /// Returns a copy with every map's entries sorted by key, recursively.
    ///
    /// Encoding never reorders a map; call this first if a sorted form is wanted.
    pub fn sorted(&self) -> Data {
        match self {
            Data::Map(entries) => {
                let mut entries = entries
                    .iter()
                    .map(|(k, v)| (k.sorted(), v.sorted()))
                    .collect::<Vec<_>>();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                Data::Map(entries)
            }
            Data::List(items) => Data::List(items.iter().map(Data::sorted).collect()),
            Data::Constr(c) => Data::Constr(Constr {
                index: c.index.clone(),
                fields: c.fields.iter().map(Data::sorted).collect(),
            }),
            _ => self.clone(),
        }
    }
}

fn cmp_seq<'a, T, F>(a: &'a [T], b: &'a [T], f: F) -> Ordering
where
    F: Fn(&'a T, &'a T) -> Ordering,
{
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|(a, b)| f(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

impl Ord for Data {
    /// Orders first by variant (`Constr < Map < List < Integer < ByteArray`),
    /// then by value. Sequences compare by length before their elements.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Data::Integer(a), Data::Integer(b)) => a.cmp(b),
            (Data::ByteArray(a), Data::ByteArray(b)) => a.cmp(b),
            (Data::List(a), Data::List(b)) => cmp_seq(a, b, Data::cmp),
            (Data::Map(a), Data::Map(b)) => {
                cmp_seq(a, b, |a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
            }
            (Data::Constr(a), Data::Constr(b)) => a
                .index
                .cmp(&b.index)
                .then_with(|| cmp_seq(&a.fields, &b.fields, Data::cmp)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Data {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Bytes> for Data {
    fn from(value: Bytes) -> Self {
        Data::ByteArray(value)
    }
}

impl From<Constr> for Data {
    fn from(value: Constr) -> Self {
        Data::Constr(value)
    }
}

impl From<BigInt> for Data {
    fn from(value: BigInt) -> Self {
        Data::Integer(value)
    }
}

macro_rules! impl_int_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Data {
                fn from(value: $ty) -> Self {
                    Data::Integer(value.into())
                }
            }
        )*
    };
}

impl_int_from!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);
