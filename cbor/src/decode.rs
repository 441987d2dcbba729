use alloc::{format, string::String, vec::Vec};
use thiserror::Error;

pub use super::decode_seq::Sequence;

pub type Array<'a> = Sequence<'a, 1>;
pub type Map<'a> = Sequence<'a, 2>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Not enough data for encoded value")]
    NotEnoughData,

    #[error("Additional items found at end of sequence")]
    AdditionalItems,

    #[error("Map has a key but no value")]
    PartialMap,

    #[error("Invalid minor-type value {0}")]
    InvalidMinorValue(u8),

    #[error("Tags with no following value")]
    JustTags,

    #[error("Chunked string contains an invalid chunk")]
    InvalidChunk,

    #[error("Unsupported major type {0}")]
    UnsupportedMajorType(u8),

    #[error("Unsupported simple value or float with minor-type {0}")]
    UnsupportedSimpleValue(u8),

    #[error("Maximum recursion depth reached")]
    MaxRecursion,

    #[error("Incorrect type, expecting {0}, found {1}")]
    IncorrectType(String, String),

    #[error("Encoded length exceeds addressable memory")]
    TooLong,
}

pub trait FromCbor: Sized {
    type Error;

    /// Returns the value, whether every head used its shortest form, and the number of bytes consumed
    fn try_from_cbor(data: &[u8]) -> Result<Option<(Self, bool, usize)>, Self::Error>;
}

pub enum Value<'a, 'b> {
    UnsignedInteger(u64),
    NegativeInteger(u64),
    Bytes(&'a [u8]),
    ByteStream(Vec<&'a [u8]>),
    Array(&'b mut Array<'a>),
    Map(&'b mut Map<'a>),
}

impl Value<'_, '_> {
    pub fn type_name(&self, tagged: bool) -> String {
        let prefix = if tagged { "Tagged " } else { "" };
        match self {
            Value::UnsignedInteger(_) => format!("{prefix}Unsigned Integer"),
            Value::NegativeInteger(_) => format!("{prefix}Negative Integer"),
            Value::Bytes(_) => format!("{prefix}Definite-length Byte String"),
            Value::ByteStream(_) => format!("{prefix}Indefinite-length Byte String"),
            Value::Array(_) => format!("{prefix}Array"),
            Value::Map(_) => format!("{prefix}Map"),
        }
    }
}

impl core::fmt::Debug for Value<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::UnsignedInteger(n) => write!(f, "{n}"),
            Value::NegativeInteger(n) => write!(f, "-1-{n}"),
            Value::Bytes(b) => write!(f, "h'{}'", HexDisplay(b)),
            Value::ByteStream(chunks) => {
                f.write_str("(_ ")?;
                for (idx, chunk) in chunks.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "h'{}'", HexDisplay(chunk))?;
                }
                f.write_str(")")
            }
            Value::Array(a) => match a.len() {
                Some(len) => write!(f, "[{len} items]"),
                None => f.write_str("[_ ...]"),
            },
            Value::Map(m) => match m.len() {
                Some(len) => write!(f, "{{{len} pairs}}"),
                None => f.write_str("{_ ...}"),
            },
        }
    }
}

struct HexDisplay<'a>(&'a [u8]);

impl core::fmt::Display for HexDisplay<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

fn take<const N: usize>(data: &[u8]) -> Result<[u8; N], Error> {
    data.get(..N)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::NotEnoughData)
}

fn parse_uint_minor(minor: u8, data: &[u8]) -> Result<(u64, bool, usize), Error> {
    match minor {
        0..=23 => Ok((minor as u64, true, 0)),
        24 => {
            let v = take::<1>(data)?[0];
            Ok((v as u64, v >= 24, 1))
        }
        25 => {
            let v = u16::from_be_bytes(take(data)?);
            Ok((v as u64, v > u8::MAX as u16, 2))
        }
        26 => {
            let v = u32::from_be_bytes(take(data)?);
            Ok((v as u64, v > u16::MAX as u32, 4))
        }
        27 => {
            let v = u64::from_be_bytes(take(data)?);
            Ok((v, v > u32::MAX as u64, 8))
        }
        _ => Err(Error::InvalidMinorValue(minor)),
    }
}

fn parse_tags(data: &[u8]) -> Result<(Vec<u64>, bool, usize), Error> {
    let mut tags = Vec::new();
    let mut shortest = true;
    let mut offset = 0;
    while let Some(&b) = data.get(offset) {
        if b >> 5 != 6 {
            break;
        }
        let (tag, s, len) = parse_uint_minor(b & 0x1F, &data[offset + 1..])?;
        tags.push(tag);
        shortest = shortest && s;
        offset += len + 1;
    }
    Ok((tags, shortest, offset))
}

fn parse_data_minor(minor: u8, data: &[u8]) -> Result<(&[u8], bool, usize), Error> {
    let (data_len, shortest, len) = parse_uint_minor(minor, data)?;
    let end = usize::try_from(data_len)
        .ok()
        .and_then(|l| l.checked_add(len))
        .ok_or(Error::TooLong)?;
    let bytes = data.get(len..end).ok_or(Error::NotEnoughData)?;
    Ok((bytes, shortest, end))
}

fn parse_data_chunked(data: &[u8]) -> Result<(Vec<&[u8]>, bool, usize), Error> {
    let mut chunks = Vec::new();
    let mut shortest = true;
    let mut offset = 0;
    loop {
        let b = *data.get(offset).ok_or(Error::NotEnoughData)?;
        offset += 1;
        if b == 0xFF {
            break Ok((chunks, shortest, offset));
        }

        // Chunks must be definite-length strings of the same major type
        if b >> 5 != 2 || b & 0x1F == 31 {
            return Err(Error::InvalidChunk);
        }

        let (chunk, s, chunk_len) = parse_data_minor(b & 0x1F, &data[offset..])?;
        chunks.push(chunk);
        shortest = shortest && s;
        offset += chunk_len;
    }
}

fn parse_count(minor: u8, data: &[u8], d: usize) -> Result<(usize, bool, usize), Error> {
    let (count, shortest, len) = parse_uint_minor(minor, data)?;
    let count = usize::try_from(count)
        .ok()
        .and_then(|c| c.checked_mul(d))
        .ok_or(Error::TooLong)?;
    Ok((count, shortest, len))
}

/// Parses a single item from the start of `data`.
///
/// `f` is called with the item, a flag that is `true` when every head of the
/// item (including its tags) was encoded in its shortest form, and the tags
/// that preceded it. Arrays and maps are handed to `f` as sequences; any items
/// `f` leaves unread are reported as [`Error::AdditionalItems`].
///
/// Returns `Ok(None)` if `data` is empty.
pub fn try_parse_value<T, F, E>(data: &[u8], f: F) -> Result<Option<(T, usize)>, E>
where
    F: FnOnce(Value, bool, Vec<u64>) -> Result<T, E>,
    E: From<Error>,
{
    let (tags, shortest, mut offset) = parse_tags(data)?;
    let Some(&initial) = data.get(offset) else {
        return if tags.is_empty() {
            Ok(None)
        } else {
            Err(Error::JustTags.into())
        };
    };
    offset += 1;

    let r = match (initial >> 5, initial & 0x1F) {
        (0, minor) => {
            let (v, s, len) = parse_uint_minor(minor, &data[offset..])?;
            offset += len;
            f(Value::UnsignedInteger(v), shortest && s, tags)?
        }
        (1, minor) => {
            let (v, s, len) = parse_uint_minor(minor, &data[offset..])?;
            offset += len;
            f(Value::NegativeInteger(v), shortest && s, tags)?
        }
        (2, 31) => {
            /* Indefinite length byte string */
            let (chunks, s, len) = parse_data_chunked(&data[offset..])?;
            offset += len;
            f(Value::ByteStream(chunks), shortest && s, tags)?
        }
        (2, minor) => {
            /* Known length byte string */
            let (bytes, s, len) = parse_data_minor(minor, &data[offset..])?;
            offset += len;
            f(Value::Bytes(bytes), shortest && s, tags)?
        }
        (4, 31) => {
            /* Indefinite length array */
            let mut a = Array::new(data, None, &mut offset);
            let r = f(Value::Array(&mut a), shortest, tags)?;
            a.complete()?;
            r
        }
        (4, minor) => {
            /* Known length array */
            let (count, s, len) = parse_count(minor, &data[offset..], 1)?;
            offset += len;
            let mut a = Array::new(data, Some(count), &mut offset);
            let r = f(Value::Array(&mut a), shortest && s, tags)?;
            a.complete()?;
            r
        }
        (5, 31) => {
            /* Indefinite length map */
            let mut m = Map::new(data, None, &mut offset);
            let r = f(Value::Map(&mut m), shortest, tags)?;
            m.complete()?;
            r
        }
        (5, minor) => {
            /* Known length map */
            let (count, s, len) = parse_count(minor, &data[offset..], 2)?;
            offset += len;
            let mut m = Map::new(data, Some(count), &mut offset);
            let r = f(Value::Map(&mut m), shortest && s, tags)?;
            m.complete()?;
            r
        }
        (3, _) => return Err(Error::UnsupportedMajorType(3).into()),
        (7, minor) => return Err(Error::UnsupportedSimpleValue(minor).into()),
        _ => unreachable!(),
    };
    Ok(Some((r, offset)))
}

#[inline]
pub fn parse_value<T, F, E>(data: &[u8], f: F) -> Result<(T, usize), E>
where
    F: FnOnce(Value, bool, Vec<u64>) -> Result<T, E>,
    E: From<Error>,
{
    try_parse_value(data, f)?.ok_or(Error::NotEnoughData.into())
}

pub fn parse<T>(data: &[u8]) -> Result<T, T::Error>
where
    T: FromCbor,
    T::Error: From<self::Error>,
{
    T::try_from_cbor(data)?
        .map(|(v, _, _)| v)
        .ok_or(Error::NotEnoughData.into())
}
