use crate::{Balance, BlockNumber};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tips_crypto::AccountId;

/// Length of a tip id / reason hash (blake2-256)
pub const HASH_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum TipError {
    #[error("Malformed tip record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid hash '{0}' (expected 0x + 64 hex chars)")]
    Hash(String),
}

/// 32-byte hash rendered as 0x-prefixed lowercase hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TipHash(pub [u8; HASH_LEN]);

impl TipHash {
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for TipHash {
    type Err = TipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| TipError::Hash(s.to_string()))?;
        let bytes = hex::decode(digits).map_err(|_| TipError::Hash(s.to_string()))?;
        let arr: [u8; HASH_LEN] = bytes
            .try_into()
            .map_err(|_| TipError::Hash(s.to_string()))?;
        Ok(TipHash(arr))
    }
}

impl fmt::Display for TipHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for TipHash {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TipHash {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One endorsement: (tipper, amount). Encoded on the wire as a 2-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(AccountId, Balance)", into = "(AccountId, Balance)")]
pub struct Contribution {
    pub account: AccountId,
    pub amount: Balance,
}

impl From<(AccountId, Balance)> for Contribution {
    fn from((account, amount): (AccountId, Balance)) -> Self {
        Contribution { account, amount }
    }
}

impl From<Contribution> for (AccountId, Balance) {
    fn from(c: Contribution) -> Self {
        (c.account, c.amount)
    }
}

/// Current tip layout: finder and deposit are dedicated fields, plus the
/// `findersFee` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTip {
    pub who: AccountId,
    pub reason: TipHash,
    #[serde(default)]
    pub closes: Option<BlockNumber>,
    pub finder: AccountId,
    pub deposit: Balance,
    #[serde(default)]
    pub tips: Vec<Contribution>,
    pub finders_fee: bool,
}

/// Legacy tip layout: the finder is an optional (account, deposit) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTip {
    pub who: AccountId,
    pub reason: TipHash,
    #[serde(default)]
    pub closes: Option<BlockNumber>,
    #[serde(default)]
    pub finder: Option<(AccountId, Balance)>,
    #[serde(default)]
    pub tips: Vec<Contribution>,
}

/// A raw on-chain tip in either of its two storage layouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TipRecord {
    Current(CurrentTip),
    Legacy(LegacyTip),
}

impl TipRecord {
    pub fn from_json(json: &str) -> Result<Self, TipError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn who(&self) -> &AccountId {
        match self {
            TipRecord::Current(t) => &t.who,
            TipRecord::Legacy(t) => &t.who,
        }
    }

    pub fn reason(&self) -> &TipHash {
        match self {
            TipRecord::Current(t) => &t.reason,
            TipRecord::Legacy(t) => &t.reason,
        }
    }

    pub fn closes(&self) -> Option<BlockNumber> {
        match self {
            TipRecord::Current(t) => t.closes,
            TipRecord::Legacy(t) => t.closes,
        }
    }

    pub fn tips(&self) -> &[Contribution] {
        match self {
            TipRecord::Current(t) => &t.tips,
            TipRecord::Legacy(t) => &t.tips,
        }
    }

    /// Finder and deposit, whichever layout carries them
    pub fn finder_and_deposit(&self) -> (Option<&AccountId>, Option<Balance>) {
        match self {
            TipRecord::Current(t) => (Some(&t.finder), Some(t.deposit)),
            TipRecord::Legacy(t) => match &t.finder {
                Some((finder, deposit)) => (Some(finder), Some(*deposit)),
                None => (None, None),
            },
        }
    }
}

/// The layout is chosen by the presence of `findersFee`; a legacy record
/// never carries it.
impl<'de> Deserialize<'de> for TipRecord {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(d)?;
        let is_current = value
            .as_object()
            .ok_or_else(|| D::Error::custom("tip record must be an object"))?
            .contains_key("findersFee");

        if is_current {
            serde_json::from_value(value)
                .map(TipRecord::Current)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(TipRecord::Legacy)
                .map_err(D::Error::custom)
        }
    }
}

/// A tip record together with its storage key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipEntry {
    pub hash: TipHash,
    pub tip: TipRecord,
}

/// Parse a JSON document holding either one entry or an array of entries
pub fn parse_entries(json: &str) -> Result<Vec<TipEntry>, TipError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let entries = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(entries)
}
