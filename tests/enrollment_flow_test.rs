use enrollsync::application::enrollment::{EnrollmentRequest, EnrollmentService};
use enrollsync::application::marketing::MarketingSyncCoordinator;
use enrollsync::domain::money::Money;
use enrollsync::domain::ports::{CourseStore, CourseStoreBox};
use enrollsync::domain::promo::default_catalog;
use enrollsync::error::EnrollmentError;
use enrollsync::infrastructure::in_memory::{InMemoryCourseStore, InMemoryEnrollmentStore};
use enrollsync::interfaces::csv::course_reader::CourseReader;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::NamedTempFile;

mod common;
use common::{Behavior, SpyChannel, as_channels, contact, write_catalog};

async fn catalog_store() -> CourseStoreBox {
    let file = NamedTempFile::new().unwrap();
    write_catalog(file.path()).unwrap();

    let courses = CourseReader::new(std::fs::File::open(file.path()).unwrap())
        .courses()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let store = InMemoryCourseStore::new();
    store.seed(courses).await.unwrap();
    Box::new(store)
}

#[tokio::test]
async fn test_enrollment_succeeds_when_every_channel_fails() {
    let spies = vec![
        SpyChannel::new("mailchimp").behaving(Behavior::Fail).shared(),
        SpyChannel::new("hubspot").behaving(Behavior::Panic).shared(),
    ];
    let service = EnrollmentService::new(
        catalog_store().await,
        Box::new(InMemoryEnrollmentStore::new()),
        default_catalog(),
        Arc::new(MarketingSyncCoordinator::new(as_channels(&spies))),
    );

    let receipt = service
        .enroll(EnrollmentRequest {
            course_id: "web-dev".to_string(),
            promo_code: Some("SAVE10".to_string()),
            contact: contact(),
        })
        .await
        .unwrap();

    assert_eq!(receipt.enrollment.quote.final_price, Money::new(dec!(269)).unwrap());

    let report = receipt.sync.await.unwrap();
    assert_eq!(report.failed_channels(), vec!["mailchimp", "hubspot"]);

    let stored = service.enrollments_for("grace@example.com").await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_enrollment_syncs_the_enrolled_contact() {
    let crm = SpyChannel::new("crm").shared();
    let sms = SpyChannel::new("sms").phone_only().shared();
    let service = EnrollmentService::new(
        catalog_store().await,
        Box::new(InMemoryEnrollmentStore::new()),
        default_catalog(),
        Arc::new(MarketingSyncCoordinator::new(as_channels(&[crm.clone(), sms.clone()]))),
    );

    let receipt = service
        .enroll(EnrollmentRequest {
            course_id: "ds-101".to_string(),
            promo_code: None,
            contact: contact().with_phone("+15550199"),
        })
        .await
        .unwrap();
    let report = receipt.sync.await.unwrap();

    assert!(report.all_succeeded());
    assert_eq!(crm.seen()[0].email, "grace@example.com");
    assert_eq!(sms.calls(), 1);
}

#[tokio::test]
async fn test_unknown_promo_blocks_enrollment_before_marketing() {
    let crm = SpyChannel::new("crm").shared();
    let service = EnrollmentService::new(
        catalog_store().await,
        Box::new(InMemoryEnrollmentStore::new()),
        default_catalog(),
        Arc::new(MarketingSyncCoordinator::new(as_channels(&[crm.clone()]))),
    );

    let result = service
        .enroll(EnrollmentRequest {
            course_id: "web-dev".to_string(),
            promo_code: Some("SAVE99".to_string()),
            contact: contact(),
        })
        .await;

    assert!(matches!(result, Err(EnrollmentError::PromoNotFound(_))));
    assert_eq!(crm.calls(), 0);
}

#[tokio::test]
async fn test_free_course_quote() {
    let service = EnrollmentService::new(
        catalog_store().await,
        Box::new(InMemoryEnrollmentStore::new()),
        default_catalog(),
        Arc::new(MarketingSyncCoordinator::new(vec![])),
    );

    let quote = service.quote("free-intro", Some("save10")).await.unwrap();
    assert_eq!(quote.discount_percent, dec!(100));
    assert_eq!(quote.final_price, Money::ZERO);
    assert_eq!(quote.promo_discount, Money::ZERO);
}

#[tokio::test]
async fn test_course_store_as_trait_object_across_tasks() {
    let store = catalog_store().await;
    let handle = tokio::spawn(async move { store.all().await.unwrap() });
    let courses = handle.await.unwrap();
    assert_eq!(courses.len(), 3);
}
