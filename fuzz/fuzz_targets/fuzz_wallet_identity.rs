//! Fuzz target: wallet `.id` record parsing and fingerprinting.

#![no_main]

use libfuzzer_sys::fuzz_target;
use weshare_fabric::Identity;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(identity) = serde_json::from_str::<Identity>(text) {
        // Fingerprinting must not panic and must produce 64 hex chars.
        let fingerprint = identity.fingerprint();
        assert_eq!(fingerprint.len(), 64);
        // Re-serialization of a parsed record must not fail.
        let _ = serde_json::to_string(&identity).expect("identity serialization must not fail");
    }
});
