use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount must not be negative, got {0}")]
    Negative(String),
    #[error("amount must be an integer number of base units, got {0}")]
    Fractional(String),
    #[error("amount is not a decimal integer: {0:?}")]
    Malformed(String),
}

/// A monetary value as handed over by an external registry.
///
/// Registries are loose about types: the same field may be a JSON integer in one snapshot and
/// a decimal string in the next (the latter being the only safe encoding above 2^53). Neither
/// form should be used for arithmetic; call [`RawAmount::to_biguint`] once at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl RawAmount {
    pub fn to_biguint(&self) -> Result<BigUint, AmountError> {
        match self {
            RawAmount::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Ok(BigUint::from(v))
                } else if n.as_i64().is_some() {
                    Err(AmountError::Negative(n.to_string()))
                } else if n.as_f64().is_some_and(|f| f.fract() == 0.0) {
                    // above u64 or in exponent form; the exact digits are already lost to f64
                    Err(AmountError::Malformed(n.to_string()))
                } else {
                    Err(AmountError::Fractional(n.to_string()))
                }
            }
            RawAmount::Text(s) => parse_decimal(s),
        }
    }
}

impl From<u64> for RawAmount {
    fn from(value: u64) -> Self {
        RawAmount::Number(value.into())
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

impl From<&BigUint> for RawAmount {
    fn from(value: &BigUint) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// Parses a base-10 string of ASCII digits into an unsigned big integer.
pub fn parse_decimal(s: &str) -> Result<BigUint, AmountError> {
    let trimmed = s.trim();
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative(trimmed.to_string()));
    }
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let is_fraction = trimmed
            .split_once('.')
            .is_some_and(|(int, frac)| {
                int.bytes().all(|b| b.is_ascii_digit()) && frac.bytes().all(|b| b.is_ascii_digit())
            });
        return if is_fraction && trimmed.len() > 1 {
            Err(AmountError::Fractional(trimmed.to_string()))
        } else {
            Err(AmountError::Malformed(trimmed.to_string()))
        };
    }
    BigUint::parse_bytes(trimmed.as_bytes(), 10)
        .ok_or_else(|| AmountError::Malformed(trimmed.to_string()))
}

/// Serde adapter that writes a [`BigUint`] as a decimal string and reads it back from either a
/// string or an integer.
///
/// ```ignore
/// #[serde(with = "planner_primitives::decimal")]
/// pub amount: BigUint,
/// ```
pub mod decimal {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RawAmount;

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawAmount::deserialize(deserializer)?
            .to_biguint()
            .map_err(serde::de::Error::custom)
    }
}

/// Same as [`decimal`], for optional fields.
pub mod decimal_opt {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RawAmount;

    pub fn serialize<S>(value: &Option<BigUint>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawAmount>::deserialize(deserializer)?
            .map(|raw| raw.to_biguint().map_err(serde::de::Error::custom))
            .transpose()
    }
}
