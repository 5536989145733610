#![no_main]
use libfuzzer_sys::fuzz_target;
use rvmarshal::rgss::Map;
use rvmarshal::Extensions;

fuzz_target!(|data: &[u8]| {
    let _ = rvmarshal::from_slice::<Map>(data, &Extensions::rgss());
});
