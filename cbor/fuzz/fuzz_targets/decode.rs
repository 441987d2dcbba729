#![no_main]

use libfuzzer_sys::fuzz_target;
use plinth_cbor::decode::{self, Error, Value};

fn walk(value: Value, depth: usize) -> Result<(), Error> {
    if depth == 0 {
        return Err(Error::MaxRecursion);
    }
    _ = format!("{value:?}");
    match value {
        Value::Array(a) => {
            while a
                .try_parse_value(|value, _, _| walk(value, depth - 1))?
                .is_some()
            {}
        }
        Value::Map(m) => {
            while m
                .try_parse_value(|value, _, _| walk(value, depth - 1))?
                .is_some()
            {}
        }
        _ => {}
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    _ = decode::try_parse_value(data, |value, _, _| walk(value, 64));
});
