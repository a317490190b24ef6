use crate::domain::course::Course;
use crate::domain::money::Money;
use crate::domain::promo::{Discount, PromoCatalog, PromoCode};
use crate::domain::quote::EnrollmentQuote;
use crate::error::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Computes what a buyer owes for a course.
///
/// Pure and synchronous: holds no state, never mutates its inputs and can be
/// shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Builds the quote for `course`, applying at most one promo.
    ///
    /// Every call starts from `course.base_price`, so re-quoting with the same
    /// promo never stacks discounts.
    ///
    /// # Errors
    ///
    /// Returns `EnrollmentError::InvalidInput` when the course violates
    /// `list_price >= base_price`.
    pub fn quote(&self, course: &Course, applied_promo: Option<&PromoCode>) -> Result<EnrollmentQuote> {
        course.validate()?;

        let discount_amount = course.list_price.saturating_sub(course.base_price);
        let discount_percent = percent_of(discount_amount, course.list_price);

        let promo_reduction = match applied_promo.map(|p| p.discount) {
            None => Money::ZERO,
            Some(Discount::Fixed(amount)) => amount,
            Some(Discount::Percent(pct)) => {
                Money::new(course.base_price.value() * pct / dec!(100))?.round_cents()
            }
        };
        let final_price = course.base_price.saturating_sub(promo_reduction);

        tracing::debug!(
            course_id = %course.id,
            promo = applied_promo.map(|p| p.code.as_str()),
            final_price = %final_price,
            "quoted course"
        );

        Ok(EnrollmentQuote {
            list_price: course.list_price,
            base_price: course.base_price,
            discount_amount,
            discount_percent,
            promo_code: applied_promo.map(|p| p.code.clone()),
            promo_discount: course.base_price.saturating_sub(final_price),
            final_price,
        })
    }

    /// Looks `code` up in `known_codes`, ignoring case and surrounding
    /// whitespace. `None` means the code is not recognised; whether that is
    /// shown to the user is the caller's call.
    pub fn apply_promo_code(&self, code: &str, known_codes: &PromoCatalog) -> Option<PromoCode> {
        known_codes.lookup(code).cloned()
    }
}

fn percent_of(part: Money, whole: Money) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part.value() / whole.value() * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
