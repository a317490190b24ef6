use super::money::Money;
use rust_decimal::Decimal;
use serde::Serialize;

/// The price breakdown shown at checkout.
///
/// Derived on demand from a course and an optional promo; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentQuote {
    pub list_price: Money,
    pub base_price: Money,
    /// `list_price - base_price`.
    pub discount_amount: Money,
    /// Whole-number percentage of `list_price`, rounded half up.
    pub discount_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    /// Reduction actually taken off `base_price` by the promo.
    pub promo_discount: Money,
    pub final_price: Money,
}
