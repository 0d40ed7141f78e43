//! Fuzz target: connection-profile parsing and endpoint resolution.
//!
//! Arbitrary profile documents must parse or fail cleanly, and
//! resolution over a parsed document must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use weshare_fabric::ConnectionProfile;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(profile) = ConnectionProfile::from_json(text) {
        let _ = profile.gateway_endpoint();
        let _ = profile.client_msp_id();
    }
});
