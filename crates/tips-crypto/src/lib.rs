// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TREASURY TIPS - ADDRESS MODULE
//
// SS58 account addresses as used by Substrate-based chains.
// - Decoding + checksum verification (Base58 with BLAKE2b-512 "SS58PRE" checksum)
// - Encoding a 32-byte public key under a network prefix
// - AccountId newtype: an address string that is known to be valid
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use blake2::{Blake2b512, Digest};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Checksum preimage prefix defined by the SS58 format
const SS58_PREFIX: &[u8] = b"SS58PRE";

/// Number of checksum bytes carried by a 32-byte account address
const CHECKSUM_LEN: usize = 2;

/// Public key length for sr25519 / ed25519 accounts
pub const PUBLIC_KEY_LEN: usize = 32;

/// Largest network prefix that fits the single-byte SS58 form
pub const MAX_SIMPLE_PREFIX: u16 = 63;

/// Generic Substrate network prefix ("5..." addresses)
pub const GENERIC_PREFIX: u16 = 42;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid base58 encoding: {0}")]
    BadBase58(String),
    #[error("Invalid address length: {0} bytes")]
    BadLength(usize),
    #[error("Address checksum mismatch")]
    BadChecksum,
    #[error("Unsupported SS58 prefix: {0}")]
    UnsupportedPrefix(u16),
}

fn ss58_checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_PREFIX);
    hasher.update(payload);
    let hash = hasher.finalize();
    [hash[0], hash[1]]
}

/// Encode a public key as an SS58 address
///
/// Format: Base58(prefix_byte + pubkey + checksum)
/// - Prefix: single byte, 0..=63
/// - Checksum: first 2 bytes of BLAKE2b-512("SS58PRE" + prefix_byte + pubkey)
///
/// # Example
/// ```
/// use tips_crypto::{decode_address, encode_address, GENERIC_PREFIX};
/// let address = encode_address(GENERIC_PREFIX, &[7u8; 32]).unwrap();
/// assert_eq!(decode_address(&address).unwrap(), (GENERIC_PREFIX, [7u8; 32]));
/// ```
pub fn encode_address(prefix: u16, public_key: &[u8; PUBLIC_KEY_LEN]) -> Result<String, AddressError> {
    if prefix > MAX_SIMPLE_PREFIX {
        return Err(AddressError::UnsupportedPrefix(prefix));
    }

    let mut payload = Vec::with_capacity(1 + PUBLIC_KEY_LEN + CHECKSUM_LEN);
    payload.push(prefix as u8);
    payload.extend_from_slice(public_key);
    let checksum = ss58_checksum(&payload);
    payload.extend_from_slice(&checksum);

    Ok(bs58::encode(payload).into_string())
}

/// Decode an SS58 address into (network prefix, public key)
///
/// Only the single-byte prefix form with a 32-byte key is accepted; that is
/// the only form an account-backed tip can carry.
pub fn decode_address(address: &str) -> Result<(u16, [u8; PUBLIC_KEY_LEN]), AddressError> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| AddressError::BadBase58(e.to_string()))?;

    if decoded.len() != 1 + PUBLIC_KEY_LEN + CHECKSUM_LEN {
        return Err(AddressError::BadLength(decoded.len()));
    }

    let prefix = decoded[0];
    if u16::from(prefix) > MAX_SIMPLE_PREFIX {
        return Err(AddressError::UnsupportedPrefix(u16::from(prefix)));
    }

    let (payload, checksum) = decoded.split_at(1 + PUBLIC_KEY_LEN);
    if checksum != ss58_checksum(payload) {
        return Err(AddressError::BadChecksum);
    }

    let mut public_key = [0u8; PUBLIC_KEY_LEN];
    public_key.copy_from_slice(&payload[1..]);
    Ok((u16::from(prefix), public_key))
}

/// Validate SS58 address format and checksum
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

/// A validated SS58 account address
///
/// Equality and ordering are on the address string, so the same key under two
/// network prefixes is two different accounts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn from_public_key(prefix: u16, public_key: &[u8; PUBLIC_KEY_LEN]) -> Result<Self, AddressError> {
        encode_address(prefix, public_key).map(AccountId)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn prefix(&self) -> u16 {
        // Validated at construction
        decode_address(&self.0).map(|(p, _)| p).unwrap_or_default()
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        decode_address(&self.0).map(|(_, k)| k).unwrap_or_default()
    }

    /// Public key as 0x-prefixed hex (for display / debugging)
    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.public_key()))
    }

    /// Shortened form for log lines: first 6 and last 6 characters
    pub fn short(&self) -> String {
        let s = &self.0;
        if s.len() <= 14 {
            return s.clone();
        }
        format!("{}…{}", &s[..6], &s[s.len() - 6..])
    }
}

impl FromStr for AccountId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        decode_address(trimmed)?;
        Ok(AccountId(trimmed.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
