// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PROPERTY-BASED TESTS — tips-crypto
//
// Verifies address invariants:
// - Encode → decode recovers prefix and public key
// - Every encoded address validates and parses as AccountId
// - Corrupted / truncated addresses are rejected
//
// Run: cargo test --release -p tips-crypto --test prop_crypto
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use proptest::prelude::*;
use tips_crypto::{decode_address, encode_address, validate_address, AccountId, MAX_SIMPLE_PREFIX};

proptest! {
    /// PROPERTY: decode(encode(prefix, key)) == (prefix, key)
    #[test]
    fn prop_encode_decode_recovers_key(
        prefix in 0u16..=MAX_SIMPLE_PREFIX,
        key in any::<[u8; 32]>(),
    ) {
        let address = encode_address(prefix, &key).unwrap();
        prop_assert_eq!(decode_address(&address).unwrap(), (prefix, key));
    }

    /// PROPERTY: encoded addresses always parse as AccountId
    #[test]
    fn prop_encoded_address_is_account(key in any::<[u8; 32]>()) {
        let account = AccountId::from_public_key(42, &key).unwrap();
        prop_assert!(validate_address(account.as_str()));
        prop_assert_eq!(account.public_key(), key);
    }

    /// PROPERTY: dropping the last character invalidates the address
    #[test]
    fn prop_truncated_address_rejected(key in any::<[u8; 32]>()) {
        let address = encode_address(42, &key).unwrap();
        let truncated = &address[..address.len() - 1];
        prop_assert!(!validate_address(truncated));
    }

    /// PROPERTY: any corrupted checksum byte is rejected
    #[test]
    fn prop_flipped_byte_rejected(key in any::<[u8; 32]>(), idx in 33usize..35) {
        let address = encode_address(42, &key).unwrap();
        let mut raw = bs58::decode(&address).into_vec().unwrap();
        raw[idx] ^= 0xFF;
        let corrupted = bs58::encode(raw).into_string();
        prop_assert!(!validate_address(&corrupted));
    }

    /// PROPERTY: random short strings never validate
    #[test]
    fn prop_garbage_rejected(garbage in "[A-Za-z0-9]{0,20}") {
        prop_assert!(!validate_address(&garbage));
    }
}

