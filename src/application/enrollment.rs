use super::marketing::MarketingSyncCoordinator;
use super::pricing::PricingEngine;
use crate::domain::contact::MarketingContact;
use crate::domain::enrollment::Enrollment;
use crate::domain::ports::{CourseStoreBox, EnrollmentStoreBox};
use crate::domain::promo::{PromoCatalog, PromoCode};
use crate::domain::quote::EnrollmentQuote;
use crate::domain::sync::SyncReport;
use crate::error::{EnrollmentError, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A buyer's request to enroll in a course.
#[derive(Debug, Clone)]
pub struct EnrollmentRequest {
    pub course_id: String,
    pub promo_code: Option<String>,
    pub contact: MarketingContact,
}

/// The confirmed enrollment plus the still-running marketing sync.
///
/// `sync` is advisory: awaiting it only yields telemetry, the enrollment has
/// already been recorded.
#[derive(Debug)]
pub struct EnrollmentReceipt {
    pub enrollment: Enrollment,
    pub sync: JoinHandle<SyncReport>,
}

/// The checkout flow around the pricing engine and the marketing fan-out.
///
/// Owns the storage backends; courses are read through `CourseStore` and every
/// confirmed purchase is written to `EnrollmentStore` before marketing starts.
pub struct EnrollmentService {
    courses: CourseStoreBox,
    enrollments: EnrollmentStoreBox,
    promos: PromoCatalog,
    pricing: PricingEngine,
    marketing: Arc<MarketingSyncCoordinator>,
}

impl EnrollmentService {
    /// Creates a new `EnrollmentService`.
    ///
    /// # Arguments
    ///
    /// * `courses` - The course catalog.
    /// * `enrollments` - Where confirmed enrollments are recorded.
    /// * `promos` - The promo codes checkout will honour.
    /// * `marketing` - Channels notified after each enrollment.
    pub fn new(
        courses: CourseStoreBox,
        enrollments: EnrollmentStoreBox,
        promos: PromoCatalog,
        marketing: Arc<MarketingSyncCoordinator>,
    ) -> Self {
        Self {
            courses,
            enrollments,
            promos,
            pricing: PricingEngine::new(),
            marketing,
        }
    }

    /// Resolves a user-entered promo code, failing when it is not recognised.
    pub fn apply_promo(&self, code: &str) -> Result<PromoCode> {
        self.pricing
            .apply_promo_code(code, &self.promos)
            .ok_or_else(|| EnrollmentError::PromoNotFound(code.trim().to_string()))
    }

    /// Prices `course_id`, optionally with a promo code.
    pub async fn quote(&self, course_id: &str, promo_code: Option<&str>) -> Result<EnrollmentQuote> {
        let course = self
            .courses
            .get(course_id)
            .await?
            .ok_or_else(|| EnrollmentError::CourseNotFound(course_id.to_string()))?;

        let promo = promo_code.map(|code| self.apply_promo(code)).transpose()?;
        self.pricing.quote(&course, promo.as_ref())
    }

    /// Confirms an enrollment and kicks off the marketing sync in the
    /// background.
    ///
    /// Pricing and storage errors fail the enrollment; marketing outcomes never
    /// do.
    pub async fn enroll(&self, request: EnrollmentRequest) -> Result<EnrollmentReceipt> {
        let EnrollmentRequest {
            course_id,
            promo_code,
            contact,
        } = request;

        let quote = self.quote(&course_id, promo_code.as_deref()).await?;

        let enrollment = Enrollment {
            id: self.enrollments.next_id().await?,
            course_id,
            email: contact.email.clone(),
            quote,
            enrolled_at: Utc::now(),
        };
        self.enrollments.store(enrollment.clone()).await?;

        tracing::info!(
            enrollment_id = enrollment.id,
            course_id = %enrollment.course_id,
            final_price = %enrollment.quote.final_price,
            "enrollment confirmed"
        );

        let marketing = Arc::clone(&self.marketing);
        let sync = tokio::spawn(async move { marketing.sync_new_user(contact).await });

        Ok(EnrollmentReceipt { enrollment, sync })
    }

    pub async fn enrollments_for(&self, email: &str) -> Result<Vec<Enrollment>> {
        self.enrollments.for_email(email).await
    }
}
