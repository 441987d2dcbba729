/*!
Plutus Data values and their conversion to and from CBOR and native values.

The crate is layered:

- [`data`]: the five-variant [`Data`] algebra and its validating constructors.
- [`codec`]: the on-chain CBOR encoding of [`Data`].
- [`schema`]: descriptors mapping a native [`Value`] onto [`Data`].
- [`encode_data`] / [`decode_data`] and the CBOR shortcuts tie the layers together.

```
use plinth_data::{Config, Schema, Value, decode_cbor, encode_cbor};

let schema = Schema::structure([
    ("owner", Schema::ByteArray),
    ("active", Schema::Boolean),
]);
let value = Value::record([
    ("owner", Value::from("deadbeef")),
    ("active", Value::from(true)),
]);

let config = Config::default();
let cbor = encode_cbor(&value, &schema, &config).unwrap();
assert_eq!(decode_cbor(&cbor, &schema, &config).unwrap(), value);
```
*/

use tracing::*;

pub mod codec;
pub mod data;
pub mod schema;

mod config;
mod engine;
mod error;
mod value;

#[cfg(feature = "serde")]
pub mod json;



pub use config::Config;
pub use data::{
    Bytes, Constr, Data, make_byte_array, make_bytes, make_constr, make_integer, make_list,
    make_map,
};
pub use engine::{
    decode_cbor, decode_cbor_hex, decode_data, encode_cbor, encode_cbor_hex, encode_data,
};
pub use error::Error;
pub use schema::{Field, Schema, Struct};
pub use value::Value;

pub use num_bigint::{BigInt, BigUint};
