#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        // Property files are user input - they may be rejected, never panic
        let _ = pap::Config::from_yaml(yaml, "/srv/app/");
    }
});
