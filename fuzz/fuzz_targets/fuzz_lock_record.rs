#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        // A lock file can contain anything; parsing must never panic
        if let Ok(record) = pap::LockRecord::parse(line) {
            let _ = pap::LockRecord::parse(&record.to_line());
        }
    }
});
