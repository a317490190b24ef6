use crate::domain::course::Course;
use crate::domain::enrollment::Enrollment;
use crate::domain::ports::{CourseStore, EnrollmentStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A thread-safe in-memory course catalog.
///
/// Uses `Arc<RwLock<HashMap<String, Course>>>` so clones share one catalog.
#[derive(Default, Clone)]
pub struct InMemoryCourseStore {
    courses: Arc<RwLock<HashMap<String, Course>>>,
}

impl InMemoryCourseStore {
    /// Creates a new, empty in-memory course store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and inserts every course, stopping at the first invalid one.
    pub async fn seed(&self, courses: impl IntoIterator<Item = Course>) -> Result<()> {
        for course in courses {
            self.store(course).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn store(&self, course: Course) -> Result<()> {
        course.validate()?;
        let mut courses = self.courses.write().await;
        courses.insert(course.id.clone(), course);
        Ok(())
    }

    async fn get(&self, course_id: &str) -> Result<Option<Course>> {
        let courses = self.courses.read().await;
        Ok(courses.get(course_id).cloned())
    }

    async fn all(&self) -> Result<Vec<Course>> {
        let courses = self.courses.read().await;
        let mut all: Vec<Course> = courses.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}

/// A thread-safe in-memory ledger of confirmed enrollments.
///
/// Ids are handed out from a shared counter starting at 1.
#[derive(Default, Clone)]
pub struct InMemoryEnrollmentStore {
    enrollments: Arc<RwLock<BTreeMap<u64, Enrollment>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryEnrollmentStore {
    /// Creates a new, empty in-memory enrollment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryEnrollmentStore {
    async fn store(&self, enrollment: Enrollment) -> Result<()> {
        let mut enrollments = self.enrollments.write().await;
        enrollments.insert(enrollment.id, enrollment);
        Ok(())
    }

    async fn get(&self, enrollment_id: u64) -> Result<Option<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments.get(&enrollment_id).cloned())
    }

    async fn for_email(&self, email: &str) -> Result<Vec<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .values()
            .filter(|e| e.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect())
    }

    async fn next_id(&self) -> Result<u64> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
