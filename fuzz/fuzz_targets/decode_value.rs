#![no_main]
use libfuzzer_sys::fuzz_target;
use rvmarshal::{Extensions, Value};

fuzz_target!(|data: &[u8]| {
    let _ = rvmarshal::from_slice::<Value>(data, &Extensions::rgss());
});
