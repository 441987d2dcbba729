use super::*;

/// Encodes a native value as [`Data`] using `schema`.
///
/// On failure the error carries the path to the offending sub-value, see
/// [`schema::Error::path`].
#[cfg_attr(feature = "instrument", instrument(skip_all))]
pub fn encode_data(value: &Value, schema: &Schema) -> Result<Data, schema::Error> {
    schema
        .to_data(value)
        .inspect_err(|e| debug!("Failed to encode {} as {schema}: {e}", value.kind()))
}

/// Decodes [`Data`] into a native value using `schema`
#[cfg_attr(feature = "instrument", instrument(skip_all))]
pub fn decode_data(data: &Data, schema: &Schema) -> Result<Value, schema::Error> {
    schema
        .from_data(data)
        .inspect_err(|e| debug!("Failed to decode {} as {schema}: {e}", data.kind()))
}

#[cfg_attr(feature = "instrument", instrument(skip_all))]
pub fn encode_cbor(value: &Value, schema: &Schema, config: &Config) -> Result<Vec<u8>, Error> {
    Ok(codec::to_cbor(&encode_data(value, schema)?, config))
}

pub fn encode_cbor_hex(value: &Value, schema: &Schema, config: &Config) -> Result<String, Error> {
    encode_cbor(value, schema, config).map(hex::encode)
}

#[cfg_attr(feature = "instrument", instrument(skip_all))]
pub fn decode_cbor(bytes: &[u8], schema: &Schema, config: &Config) -> Result<Value, Error> {
    let data = codec::from_cbor(bytes, config)
        .inspect_err(|e| debug!("Failed to decode CBOR: {e}"))?;
    Ok(decode_data(&data, schema)?)
}

pub fn decode_cbor_hex(s: &str, schema: &Schema, config: &Config) -> Result<Value, Error> {
    let bytes = hex::decode(s).map_err(codec::Error::from)?;
    decode_cbor(&bytes, schema, config)
}
