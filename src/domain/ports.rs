use super::contact::MarketingContact;
use super::course::Course;
use super::enrollment::Enrollment;
use crate::error::{ChannelError, Result};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn store(&self, course: Course) -> Result<()>;
    async fn get(&self, course_id: &str) -> Result<Option<Course>>;
    async fn all(&self) -> Result<Vec<Course>>;
}

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Persists the enrollment under `enrollment.id`, as issued by `next_id`.
    async fn store(&self, enrollment: Enrollment) -> Result<()>;
    async fn get(&self, enrollment_id: u64) -> Result<Option<Enrollment>>;
    async fn for_email(&self, email: &str) -> Result<Vec<Enrollment>>;
    async fn next_id(&self) -> Result<u64>;
}

/// A third-party contact synchronization integration.
///
/// Implementations own their wire protocol. Errors are returned, never
/// panicked; the sync coordinator turns them into a `false` report entry.
#[async_trait]
pub trait ContactChannel: Send + Sync {
    fn name(&self) -> &str;

    /// Channels that can only reach the contact by phone (SMS, WhatsApp).
    fn requires_phone(&self) -> bool {
        false
    }

    async fn send_contact(&self, contact: MarketingContact) -> std::result::Result<(), ChannelError>;
}

pub type CourseStoreBox = Box<dyn CourseStore>;
pub type EnrollmentStoreBox = Box<dyn EnrollmentStore>;
pub type ChannelRef = Arc<dyn ContactChannel>;
