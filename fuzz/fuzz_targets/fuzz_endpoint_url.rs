//! Fuzz target: peer endpoint URL parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use weshare_fabric::Endpoint;

fuzz_target!(|data: &[u8]| {
    let Ok(url) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(endpoint) = Endpoint::parse(url) {
        // A parsed endpoint must render a usable authority.
        let authority = endpoint.authority();
        assert!(authority.contains(':'));
    }
});
