/*!
The Cardano node's "detailed schema" JSON rendering of [`Data`]:

```json
{"constructor": 0, "fields": [{"int": 42}, {"bytes": "deadbeef"}]}
{"list": [{"int": 1}]}
{"map": [{"k": {"bytes": "00"}, "v": {"int": -1}}]}
```

Integers go through `serde_json`'s arbitrary precision numbers, so values
beyond 64 bits survive unchanged.
*/

use super::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as Json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected an object with one of int, bytes, list, map or constructor")]
    UnknownShape,

    #[error("Missing key {0}")]
    MissingKey(&'static str),

    #[error("{0} is not an integer")]
    NotAnInteger(String),

    #[error("Expected {0} to be an array")]
    ExpectedArray(&'static str),

    #[error("Expected bytes to be a hex string")]
    ExpectedHexString,

    #[error(transparent)]
    InvalidData(#[from] data::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn int_to_json(i: &BigInt) -> Result<Json, Error> {
    Ok(Json::Number(i.to_string().parse::<Number>()?))
}

fn int_from_json(json: &Json) -> Result<BigInt, Error> {
    match json {
        Json::Number(n) => n
            .to_string()
            .parse()
            .map_err(|_| Error::NotAnInteger(n.to_string())),
        _ => Err(Error::NotAnInteger(json.to_string())),
    }
}

fn array<'a>(json: &'a Json, what: &'static str) -> Result<&'a [Json], Error> {
    json.as_array()
        .map(Vec::as_slice)
        .ok_or(Error::ExpectedArray(what))
}

fn object<const N: usize>(entries: [(&str, Json); N]) -> Json {
    Json::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Map<_, _>>(),
    )
}

fn json_list(items: &[Data]) -> Result<Json, Error> {
    items
        .iter()
        .map(to_json)
        .collect::<Result<_, _>>()
        .map(Json::Array)
}

pub fn to_json(data: &Data) -> Result<Json, Error> {
    Ok(match data {
        Data::Integer(i) => object([("int", int_to_json(i)?)]),
        Data::ByteArray(b) => object([("bytes", Json::String(b.to_hex()))]),
        Data::List(items) => object([("list", json_list(items)?)]),
        Data::Map(entries) => object([(
            "map",
            entries
                .iter()
                .map(|(k, v)| Ok(object([("k", to_json(k)?), ("v", to_json(v)?)])))
                .collect::<Result<_, Error>>()
                .map(Json::Array)?,
        )]),
        Data::Constr(c) => object([
            ("constructor", int_to_json(&BigInt::from(c.index.clone()))?),
            ("fields", json_list(&c.fields)?),
        ]),
    })
}

pub fn from_json(json: &Json) -> Result<Data, Error> {
    let Json::Object(obj) = json else {
        return Err(Error::UnknownShape);
    };

    if let Some(i) = obj.get("int") {
        return int_from_json(i).map(Data::Integer);
    }
    if let Some(b) = obj.get("bytes") {
        let s = b.as_str().ok_or(Error::ExpectedHexString)?;
        return Ok(make_byte_array(s)?);
    }
    if let Some(l) = obj.get("list") {
        return array(l, "list")?
            .iter()
            .map(from_json)
            .collect::<Result<_, _>>()
            .map(Data::List);
    }
    if let Some(m) = obj.get("map") {
        return array(m, "map")?
            .iter()
            .map(|entry| {
                let k = entry.get("k").ok_or(Error::MissingKey("k"))?;
                let v = entry.get("v").ok_or(Error::MissingKey("v"))?;
                Ok((from_json(k)?, from_json(v)?))
            })
            .collect::<Result<_, Error>>()
            .map(Data::Map);
    }
    if let Some(index) = obj.get("constructor") {
        let index = int_from_json(index)?;
        let fields = array(
            obj.get("fields").ok_or(Error::MissingKey("fields"))?,
            "fields",
        )?
        .iter()
        .map(from_json)
        .collect::<Result<_, _>>()?;
        return Ok(make_constr(index, fields)?);
    }
    Err(Error::UnknownShape)
}

pub fn to_json_string(data: &Data) -> Result<String, Error> {
    to_json(data).map(|json| json.to_string())
}

pub fn from_json_str(s: &str) -> Result<Data, Error> {
    from_json(&serde_json::from_str(s)?)
}

impl Serialize for Data {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        to_json(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        from_json(&Json::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}
