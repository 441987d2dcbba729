use arbitrary::{Arbitrary, Unstructured};
use plinth_data::{BigInt, BigUint, Bytes, Config, Constr, Data, codec};

const MAX_DEPTH: usize = 8;

/// A [`Data`] value built from fuzzer input
#[derive(Debug)]
pub struct ArbitraryData(pub Data);

fn arbitrary_data(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Data> {
    let kind = if depth == 0 {
        u.int_in_range(0..=1)?
    } else {
        u.int_in_range(0..=4)?
    };
    Ok(match kind {
        0 => Data::Integer(BigInt::from_signed_bytes_be(u.arbitrary()?)),
        1 => {
            let bytes: Vec<u8> = u.arbitrary()?;
            Data::ByteArray(Bytes::new(bytes).map_err(|_| arbitrary::Error::IncorrectFormat)?)
        }
        2 => {
            let len = u.arbitrary_len::<u8>()?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arbitrary_data(u, depth - 1)?);
            }
            Data::List(items)
        }
        3 => {
            let len = u.arbitrary_len::<(u8, u8)>()?;
            let mut entries = Vec::with_capacity(len);
            for _ in 0..len {
                entries.push((arbitrary_data(u, depth - 1)?, arbitrary_data(u, depth - 1)?));
            }
            Data::Map(entries)
        }
        _ => {
            let index = BigUint::from_bytes_be(u.arbitrary()?);
            let len = u.arbitrary_len::<u8>()?;
            let mut fields = Vec::with_capacity(len);
            for _ in 0..len {
                fields.push(arbitrary_data(u, depth - 1)?);
            }
            Data::Constr(Constr::new(index, fields))
        }
    })
}

impl<'a> Arbitrary<'a> for ArbitraryData {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        arbitrary_data(u, MAX_DEPTH).map(ArbitraryData)
    }
}

/// Decodes arbitrary bytes, re-encoding anything that decodes
pub fn test_decode(data: &[u8]) {
    let config = Config::default();
    if let Ok(decoded) = codec::from_cbor(data, &config) {
        let cbor = codec::to_cbor(&decoded, &config);
        assert_eq!(codec::from_cbor(&cbor, &config), Ok(decoded));
    }
}

pub fn test_roundtrip(data: &Data) {
    for config in [Config::default(), Config::canonical()] {
        let cbor = codec::to_cbor(data, &config);
        assert_eq!(codec::from_cbor(&cbor, &config).as_ref(), Ok(data));
    }
}
