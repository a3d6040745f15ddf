#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probing and full decode must never panic
    let _ = zenbmp32::probe_bmp(data);
    let _ = zenbmp32::decode_bmp(data, enough::Unstoppable);
});
