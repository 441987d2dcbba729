#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: common::ArbitraryData| {
    common::test_roundtrip(&data.0);
});
