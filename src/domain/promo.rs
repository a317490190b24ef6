use super::money::Money;
use crate::error::EnrollmentError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The reduction a promo code grants off the base price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Discount {
    Fixed(Money),
    Percent(Decimal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    pub code: String,
    pub discount: Discount,
}

impl PromoCode {
    pub fn fixed(code: &str, amount: Money) -> Self {
        Self {
            code: normalize_code(code),
            discount: Discount::Fixed(amount),
        }
    }

    pub fn percent(code: &str, percent: Decimal) -> Result<Self, EnrollmentError> {
        if percent < Decimal::ZERO || percent > dec!(100) {
            return Err(EnrollmentError::InvalidInput(format!(
                "promo {code}: percent must be within 0..=100, got {percent}"
            )));
        }
        Ok(Self {
            code: normalize_code(code),
            discount: Discount::Percent(percent),
        })
    }
}

/// Codes compare case-insensitively and ignore surrounding whitespace.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// The table of codes a checkout will honour, keyed by normalized code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromoCatalog {
    codes: BTreeMap<String, PromoCode>,
}

impl PromoCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, promo: PromoCode) -> Self {
        self.insert(promo);
        self
    }

    pub fn insert(&mut self, promo: PromoCode) {
        self.codes.insert(normalize_code(&promo.code), promo);
    }

    pub fn lookup(&self, code: &str) -> Option<&PromoCode> {
        self.codes.get(&normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<PromoCode> for PromoCatalog {
    fn from_iter<I: IntoIterator<Item = PromoCode>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for promo in iter {
            catalog.insert(promo);
        }
        catalog
    }
}

const SAVE10_DISCOUNT: Money = Money::from_literal(dec!(30));

/// The storefront's standing offer: `SAVE10` takes 30 off the base price.
pub fn default_catalog() -> PromoCatalog {
    PromoCatalog::new().with_code(PromoCode::fixed("SAVE10", SAVE10_DISCOUNT))
}
