use super::encode::*;
use alloc::vec::Vec;
use hex_literal::hex;

fn encode(f: impl FnOnce(&mut Encoder)) -> Vec<u8> {
    let mut e = Encoder::new();
    f(&mut e);
    e.build()
}

/// An untagged array of unsigned integers
struct Ints<'a> {
    items: &'a [u64],
    definite: bool,
}

impl ToCbor for Ints<'_> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_array(self.definite.then_some(self.items.len()), [], |a| {
            for i in self.items {
                a.emit(i);
            }
        })
    }
}

fn ints(items: &[u64]) -> Ints<'_> {
    Ints {
        items,
        definite: true,
    }
}

fn indefinite(items: &[u64]) -> Ints<'_> {
    Ints {
        items,
        definite: false,
    }
}

#[test]
fn rfc_tests() {
    // RFC 8949, Appendix A:
    // https://www.rfc-editor.org/rfc/rfc8949.html#section-appendix.a

    assert_eq!(emit(&0u64), hex!("00"));
    assert_eq!(emit(&1u64), hex!("01"));
    assert_eq!(emit(&10u64), hex!("0a"));
    assert_eq!(emit(&23u64), hex!("17"));
    assert_eq!(emit(&24u64), hex!("1818"));
    assert_eq!(emit(&25u64), hex!("1819"));
    assert_eq!(emit(&100u64), hex!("1864"));
    assert_eq!(emit(&1000u64), hex!("1903e8"));
    assert_eq!(emit(&1000000u64), hex!("1a000f4240"));
    assert_eq!(emit(&1000000000000u64), hex!("1b000000e8d4a51000"));
    assert_eq!(emit(&u64::MAX), hex!("1bffffffffffffffff"));

    assert_eq!(encode(|e| e.emit_negative(0)), hex!("20"));
    assert_eq!(encode(|e| e.emit_negative(9)), hex!("29"));
    assert_eq!(encode(|e| e.emit_negative(99)), hex!("3863"));
    assert_eq!(encode(|e| e.emit_negative(999)), hex!("3903e7"));
    assert_eq!(encode(|e| e.emit_negative(u64::MAX)), hex!("3bffffffffffffffff"));

    assert_eq!(
        encode(|e| e.emit_tagged(&hex!("010000000000000000")[..], [2])),
        hex!("c249010000000000000000")
    );
    assert_eq!(
        encode(|e| e.emit_tagged(&hex!("010000000000000000")[..], [3])),
        hex!("c349010000000000000000")
    );
    assert_eq!(
        encode(|e| e.emit_tagged(&1363896240u64, [1])),
        hex!("c11a514b67b0")
    );
    assert_eq!(
        encode(|e| e.emit_tagged(&hex!("01020304")[..], [23])),
        hex!("d74401020304")
    );

    assert_eq!(emit::<[u8]>(&[]), hex!("40"));
    assert_eq!(emit(&hex!("01020304")[..]), hex!("4401020304"));

    assert_eq!(emit(&ints(&[])), hex!("80"));
    assert_eq!(emit(&ints(&[1, 2, 3])), hex!("83010203"));
    assert_eq!(
        encode(|e| e.emit_array(Some(3), [], |a| {
            a.emit(&1u64);
            a.emit(&ints(&[2, 3]));
            a.emit(&ints(&[4, 5]));
        })),
        hex!("8301820203820405")
    );
    assert_eq!(
        emit(&ints(&(1..=25).collect::<Vec<u64>>())),
        hex!("98190102030405060708090a0b0c0d0e0f101112131415161718181819")
    );

    assert_eq!(encode(|e| e.emit_map(0, |_| {})), hex!("a0"));
    assert_eq!(
        encode(|e| e.emit_map(2, |m| {
            m.emit_entry(&1u64, &2u64);
            m.emit_entry(&3u64, &4u64);
        })),
        hex!("a201020304")
    );
    assert_eq!(
        encode(|e| e.emit_map(2, |m| {
            m.emit_entry(&1u64, &2u64);
            m.emit_entry(&3u64, &ints(&[4, 5]));
        })),
        hex!("a2010203820405")
    );

    assert_eq!(
        encode(|e| e.emit_byte_stream([], |s| {
            s.emit(&hex!("0102"));
            s.emit(&hex!("030405"));
        })),
        hex!("5f42010243030405ff")
    );

    assert_eq!(emit(&indefinite(&[])), hex!("9fff"));
    assert_eq!(
        encode(|e| e.emit_array(None, [], |a| {
            a.emit(&1u64);
            a.emit(&ints(&[2, 3]));
            a.emit(&indefinite(&[4, 5]));
        })),
        hex!("9f018202039f0405ffff")
    );
    assert_eq!(
        encode(|e| e.emit_array(Some(3), [], |a| {
            a.emit(&1u64);
            a.emit(&indefinite(&[2, 3]));
            a.emit(&ints(&[4, 5]));
        })),
        hex!("83019f0203ff820405")
    );
}

#[test]
fn head_boundaries() {
    assert_eq!(emit(&255u64), hex!("18ff"));
    assert_eq!(emit(&256u64), hex!("190100"));
    assert_eq!(emit(&65535u64), hex!("19ffff"));
    assert_eq!(emit(&65536u64), hex!("1a00010000"));
    assert_eq!(emit(&4294967295u64), hex!("1affffffff"));
    assert_eq!(emit(&4294967296u64), hex!("1b0000000100000000"));

    assert_eq!(encode(|e| e.emit_negative(23)), hex!("37"));
    assert_eq!(encode(|e| e.emit_negative(24)), hex!("3818"));
}

#[test]
fn chunked_byte_stream() {
    let payload = (0..150u8).collect::<Vec<_>>();
    let encoded = encode(|e| e.emit_byte_stream([], |s| s.emit_chunked(&payload)));

    // 0x5f, then 64 + 64 + 22 byte chunks, then the break
    assert_eq!(encoded[0], 0x5f);
    assert_eq!(encoded[1..3], hex!("5840"));
    assert_eq!(encoded[3..67], payload[..64]);
    assert_eq!(encoded[67..69], hex!("5840"));
    assert_eq!(encoded[69..133], payload[64..128]);
    assert_eq!(encoded[133], 0x56);
    assert_eq!(encoded[134..156], payload[128..]);
    assert_eq!(encoded[156], 0xff);
    assert_eq!(encoded.len(), 157);

    // A payload of exactly one chunk still gets the stream framing
    let encoded = encode(|e| e.emit_byte_stream([], |s| s.emit_chunked(&payload[..MAX_CHUNK_LEN])));
    assert_eq!(encoded[..3], hex!("5f5840"));
    assert_eq!(encoded.len(), 68);
    assert_eq!(encoded[67], 0xff);
}

#[test]
fn tagged_sequences() {
    assert_eq!(
        encode(|e| e.emit_array(Some(1), [121], |a| a.emit(&42u64))),
        hex!("d87981182a")
    );
    assert_eq!(
        encode(|e| e.emit_array(Some(0), [1280], |_| {})),
        hex!("d9050080")
    );
    assert_eq!(
        encode(|e| e.emit_byte_stream([2], |s| s.emit(&hex!("01")))),
        hex!("c25f4101ff")
    );
    assert_eq!(encode(|e| e.emit_tagged(&0u64, [1, 2])), hex!("c1c200"));
}

#[test]
#[should_panic]
fn short_definite_array() {
    encode(|e| e.emit_array(Some(2), [], |a| a.emit(&1u64)));
}

#[test]
#[should_panic]
fn long_definite_array() {
    encode(|e| e.emit_array(Some(1), [], |a| {
        a.emit(&1u64);
        a.emit(&2u64);
    }));
}

#[test]
#[should_panic]
fn short_map() {
    encode(|e| e.emit_map(1, |_| {}));
}

#[test]
#[should_panic]
fn long_map() {
    encode(|e| e.emit_map(0, |m| m.emit_entry(&1u64, &2u64)));
}
