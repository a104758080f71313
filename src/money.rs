use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type AmountValue = i64;

/// Money in whole cents, so bids compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    cents: AmountValue,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount cannot be negative")]
    Negative,

    #[error("Amount must be a finite number")]
    NotFinite,

    #[error("Amount cannot have more than two decimals: {0}")]
    TooPrecise(String),

    #[error("Invalid amount: {0}")]
    Invalid(String),
}

impl Amount {
    pub const ZERO: Amount = Amount { cents: 0 };

    pub fn from_cents(cents: AmountValue) -> Result<Self, MoneyError> {
        if cents < 0 {
            return Err(MoneyError::Negative);
        }
        Ok(Amount { cents })
    }

    /// Whole currency units, e.g. `Amount::units(55)` is 55.00.
    pub fn units(units: AmountValue) -> Self {
        Amount { cents: units.max(0) * 100 }
    }

    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        if value < 0.0 {
            return Err(MoneyError::Negative);
        }
        let scaled = value * 100.0;
        // `as` saturates, so anything past i64 would silently clamp.
        if scaled >= AmountValue::MAX as f64 {
            return Err(MoneyError::Invalid(value.to_string()));
        }
        let cents = scaled.round();
        if (scaled - cents).abs() > 1e-6 {
            return Err(MoneyError::TooPrecise(value.to_string()));
        }
        Ok(Amount { cents: cents as AmountValue })
    }

    pub fn cents(&self) -> AmountValue {
        self.cents
    }

    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Amount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let text = text.strip_prefix('$').unwrap_or(text);
        if text.starts_with('-') {
            return Err(MoneyError::Negative);
        }

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(MoneyError::Invalid(s.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyError::TooPrecise(s.to_string()));
        }
        let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !digits(whole) || !digits(fraction) {
            return Err(MoneyError::Invalid(s.to_string()));
        }

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<AmountValue>()
                .map_err(|_| MoneyError::Invalid(s.to_string()))?
        };
        let fraction_value = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<AmountValue>().unwrap_or(0) * 10,
            _ => fraction.parse::<AmountValue>().unwrap_or(0),
        };

        whole_value
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_value))
            .map(|cents| Amount { cents })
            .ok_or_else(|| MoneyError::Invalid(s.to_string()))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Amount::from_f64(value),
            Raw::Text(text) => Amount::from_str(&text),
        }
        .map_err(serde::de::Error::custom)
    }
}
