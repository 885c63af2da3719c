//! Fuzz target: SS58 address validation
//!
//! Feeds arbitrary strings to decode_address() to ensure:
//! 1. No panics on any input
//! 2. Anything that decodes re-encodes to the same string
//!
//! Run: cargo +nightly fuzz run fuzz_address_validation -- -max_len=256

#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // decode_address must never panic, even on garbage input
        if let Ok((prefix, key)) = tips_crypto::decode_address(s) {
            let again = tips_crypto::encode_address(prefix, &key).unwrap();
            assert_eq!(again, s, "decoded address must re-encode identically");
        }
    }

    // Any 32 bytes under the generic prefix MUST yield a valid address
    if data.len() >= 32 {
        let mut key = [0u8; 32];
        key.copy_from_slice(&data[..32]);
        let addr = tips_crypto::encode_address(tips_crypto::GENERIC_PREFIX, &key).unwrap();
        assert!(
            tips_crypto::validate_address(&addr),
            "Generated address must pass validation: {}",
            addr
        );
    }
});
