use super::quote::EnrollmentQuote;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A confirmed purchase of a course at a quoted price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrollment {
    pub id: u64,
    pub course_id: String,
    pub email: String,
    pub quote: EnrollmentQuote,
    pub enrolled_at: DateTime<Utc>,
}
