use alloc::vec::Vec;

/// The largest chunk written by [`ByteStream::emit_chunked`]
pub const MAX_CHUNK_LEN: usize = 64;

const INDEFINITE: u8 = 31;
const BREAK: u8 = 0xFF;

pub trait ToCbor {
    fn to_cbor(&self, encoder: &mut Encoder);
}

#[derive(Default)]
pub struct Encoder {
    data: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    /// Writes an item head in shortest form
    fn emit_head(&mut self, major: u8, arg: u64) {
        let major = major << 5;
        match arg {
            0..=23 => self.data.push(major | arg as u8),
            24..=0xFF => self.data.extend([major | 24, arg as u8]),
            0x100..=0xFFFF => {
                self.data.push(major | 25);
                self.data.extend((arg as u16).to_be_bytes())
            }
            0x1_0000..=0xFFFF_FFFF => {
                self.data.push(major | 26);
                self.data.extend((arg as u32).to_be_bytes())
            }
            _ => {
                self.data.push(major | 27);
                self.data.extend(arg.to_be_bytes())
            }
        }
    }

    fn emit_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = u64>,
    {
        for tag in tags {
            self.emit_head(6, tag)
        }
    }

    pub fn emit<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        value.to_cbor(self)
    }

    pub fn emit_tagged<T, I>(&mut self, value: &T, tags: I)
    where
        T: ToCbor + ?Sized,
        I: IntoIterator<Item = u64>,
    {
        self.emit_tags(tags);
        self.emit(value)
    }

    /// Emits the negative integer `-1 - n`
    pub fn emit_negative(&mut self, n: u64) {
        self.emit_head(1, n)
    }

    /// Emits an indefinite-length byte string built by `f`
    pub fn emit_byte_stream<I, F>(&mut self, tags: I, f: F)
    where
        I: IntoIterator<Item = u64>,
        F: FnOnce(&mut ByteStream),
    {
        self.emit_tags(tags);
        self.data.push((2 << 5) | INDEFINITE);
        f(&mut ByteStream { encoder: self });
        self.data.push(BREAK)
    }

    /// Emits an array of `count` items, or an indefinite-length array if `None`.
    ///
    /// Panics if `f` emits a different number of items than `count`.
    pub fn emit_array<I, F>(&mut self, count: Option<usize>, tags: I, f: F)
    where
        I: IntoIterator<Item = u64>,
        F: FnOnce(&mut Array),
    {
        self.emit_tags(tags);
        match count {
            Some(count) => self.emit_head(4, count as u64),
            None => self.data.push((4 << 5) | INDEFINITE),
        }
        let mut a = Array {
            encoder: self,
            remaining: count,
        };
        f(&mut a);
        let remaining = a.remaining;
        match remaining {
            None => self.data.push(BREAK),
            Some(0) => {}
            Some(n) => panic!("Definite length array is {n} items short"),
        }
    }

    /// Emits a definite-length map of `len` entries.
    ///
    /// Panics if `f` emits a different number of entries.
    pub fn emit_map<F>(&mut self, len: usize, f: F)
    where
        F: FnOnce(&mut Map),
    {
        self.emit_head(5, len as u64);
        let mut m = Map {
            encoder: self,
            remaining: len,
        };
        f(&mut m);
        if m.remaining != 0 {
            panic!("Definite length map is {} entries short", m.remaining)
        }
    }
}

pub struct ByteStream<'a> {
    encoder: &'a mut Encoder,
}

impl ByteStream<'_> {
    pub fn emit(&mut self, chunk: &[u8]) {
        self.encoder.emit(chunk)
    }

    /// Emits `value` as a run of chunks, none longer than [`MAX_CHUNK_LEN`]
    pub fn emit_chunked(&mut self, value: &[u8]) {
        for chunk in value.chunks(MAX_CHUNK_LEN) {
            self.emit(chunk)
        }
    }
}

pub struct Array<'a> {
    encoder: &'a mut Encoder,
    remaining: Option<usize>,
}

impl Array<'_> {
    pub fn emit<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                panic!("Too many items added to definite length array")
            }
            *remaining -= 1;
        }
        self.encoder.emit(value)
    }
}

pub struct Map<'a> {
    encoder: &'a mut Encoder,
    remaining: usize,
}

impl Map<'_> {
    pub fn emit_entry<K, V>(&mut self, key: &K, value: &V)
    where
        K: ToCbor + ?Sized,
        V: ToCbor + ?Sized,
    {
        if self.remaining == 0 {
            panic!("Too many entries added to definite length map")
        }
        self.remaining -= 1;
        self.encoder.emit(key);
        self.encoder.emit(value)
    }
}

impl ToCbor for u64 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_head(0, *self)
    }
}

impl ToCbor for [u8] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_head(2, self.len() as u64);
        encoder.data.extend_from_slice(self)
    }
}

/// Encodes a single item
pub fn emit<T>(value: &T) -> Vec<u8>
where
    T: ToCbor + ?Sized,
{
    let mut e = Encoder::new();
    e.emit(value);
    e.build()
}
