use crate::error::EnrollmentError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-negative monetary value in the catalog's single currency.
///
/// Wraps `rust_decimal::Decimal` so prices can never go below zero: the only
/// subtraction offered is `saturating_sub`, which clamps at `ZERO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Const constructor for literal amounts. `value` must be non-negative.
    pub(crate) const fn from_literal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn new(value: Decimal) -> Result<Self, EnrollmentError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(EnrollmentError::InvalidInput(format!(
                "amount must not be negative, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtracts `rhs`, clamping the result at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        if rhs.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - rhs.0)
        }
    }

    /// Rounds to cents, half away from zero.
    pub fn round_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// Route deserialization through `new` so a negative amount in a config file is
// rejected at the edge.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::new(value).map_err(serde::de::Error::custom)
    }
}

/// Parses an amount from its text form, for sources such as CSV where the
/// default `Decimal` deserializer would infer an `f64` first.
pub fn deserialize_exact<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <String as Deserialize>::deserialize(deserializer)?;
    let value = Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom)?;
    Money::new(value).map_err(serde::de::Error::custom)
}
