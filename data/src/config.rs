/// Options shared by the CBOR encoder and decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Emit every list, map and constructor with a definite length.
    ///
    /// When `false` (the default) non-empty lists and constructor fields are
    /// written as indefinite-length arrays, matching the encoding produced by
    /// the Cardano node. Decoding accepts either form regardless.
    pub canonical: bool,

    /// The deepest nesting of lists, maps and constructors the decoder will
    /// follow before giving up.
    ///
    /// Decoding recurses once per level, so this bounds stack use. The
    /// default leaves headroom for a debug build on a 2 MiB thread stack.
    pub max_depth: usize,
}

impl Config {
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    pub fn canonical() -> Self {
        Self {
            canonical: true,
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canonical: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
