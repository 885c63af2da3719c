use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// On-chain balance in the chain's smallest unit (planck).
///
/// u128 is the native balance width of the chain, so every amount a tip can
/// carry is representable exactly. NO floating-point arithmetic is used on
/// balances anywhere in this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Balance(pub u128);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid balance '{0}'")]
pub struct BalanceParseError(pub String);

impl Balance {
    pub const ZERO: Balance = Balance(0);

    pub const fn new(value: u128) -> Self {
        Balance(value)
    }

    pub const fn get(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// floor((self + other) / 2) without overflow, for any pair of u128 values
    pub const fn midpoint(self, other: Balance) -> Balance {
        let (a, b) = (self.0, other.0);
        Balance(a / 2 + b / 2 + (a % 2 + b % 2) / 2)
    }

    pub fn checked_add(self, other: Balance) -> Option<Balance> {
        self.0.checked_add(other.0).map(Balance)
    }

    pub fn saturating_add(self, other: Balance) -> Balance {
        Balance(self.0.saturating_add(other.0))
    }
}

impl From<u128> for Balance {
    fn from(v: u128) -> Self {
        Balance(v)
    }
}

impl From<u64> for Balance {
    fn from(v: u64) -> Self {
        Balance(v as u128)
    }
}

impl FromStr for Balance {
    type Err = BalanceParseError;

    /// Accepts a decimal string or a 0x-prefixed hex string (the two forms
    /// chain RPC returns balances in).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if let Some(hex_digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if hex_digits.is_empty() {
                return Err(BalanceParseError(s.to_string()));
            }
            u128::from_str_radix(hex_digits, 16)
        } else {
            s.parse::<u128>()
        };
        parsed.map(Balance).map_err(|_| BalanceParseError(s.to_string()))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialized as a decimal string: JSON consumers cannot hold u128 in a number.
impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0.to_string())
    }
}

/// Deserialize from a decimal/hex string or a non-negative integer.
/// Amounts above u64::MAX must be given as strings.
impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};
        struct BalanceVisitor;

        impl<'de> Visitor<'de> for BalanceVisitor {
            type Value = Balance;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a balance as a decimal string, 0x-hex string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Balance, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Balance, E> {
                Ok(Balance(v as u128))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Balance, E> {
                Ok(Balance(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Balance, E> {
                if v >= 0 {
                    Ok(Balance(v as u128))
                } else {
                    Err(E::custom("negative value for balance"))
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Balance, E> {
                Err(E::custom(format!(
                    "balance {} is not an exact integer (pass large amounts as strings)",
                    v
                )))
            }
        }

        d.deserialize_any(BalanceVisitor)
    }
}

/// Format a balance with `decimals` fractional digits, integer math only.
/// Trailing fractional zeros are trimmed; whole amounts print without a dot.
pub fn format_balance(amount: Balance, decimals: u8) -> String {
    if decimals == 0 {
        return amount.0.to_string();
    }
    // 10^39 > u128::MAX, so anything past 38 decimals leaves a zero whole part
    let Some(unit) = 10u128.checked_pow(u32::from(decimals)) else {
        let digits = amount.0.to_string();
        let padded = format!("{:0>width$}", digits, width = decimals as usize);
        let frac = padded.trim_end_matches('0');
        return if frac.is_empty() {
            "0".to_string()
        } else {
            format!("0.{}", frac)
        };
    };

    let whole = amount.0 / unit;
    let frac = amount.0 % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}
