//! In-memory implementation of every repository trait
//!
//! All tables sit behind one mutex, so each compound operation (insert plus
//! counter update) is a single critical section. Foreign keys and unique
//! constraints of the SQL schema are checked by hand and reported with the same
//! domain errors as the PostgreSQL repositories.
//!
//! Used as the test double for the service and HTTP layers.

mod catalog;
mod community;
mod learning;

use std::sync::Arc;

use parking_lot::Mutex;

use academy_core::entities::{
    Category, Course, Discussion, DiscussionReply, Enrollment, ForumCategory, Lesson,
    LessonProgress, LiveClass, LiveClassAttendee, Notification, Review, User,
};
use academy_core::error::DomainError;
use academy_core::value_objects::EntityId;

/// Shared in-memory store; clones share the same tables
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

/// Rows in insertion order; soft-deleted rows stay with a `deleted` flag
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    forum_categories: Vec<ForumCategory>,
    courses: Vec<Row<Course>>,
    lessons: Vec<Row<Lesson>>,
    enrollments: Vec<Enrollment>,
    lesson_progress: Vec<LessonProgress>,
    live_classes: Vec<LiveClass>,
    attendees: Vec<LiveClassAttendee>,
    discussions: Vec<Discussion>,
    replies: Vec<DiscussionReply>,
    notifications: Vec<Notification>,
    reviews: Vec<Review>,
}

struct Row<T> {
    value: T,
    deleted: bool,
}

impl<T> Row<T> {
    fn live(value: T) -> Self {
        Self {
            value,
            deleted: false,
        }
    }
}

impl Tables {
    fn require_user(&self, id: EntityId) -> Result<(), DomainError> {
        if self.users.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(id))
        }
    }

    /// Any course row, deleted or not, as a foreign key would see it
    fn course_row_mut(&mut self, id: EntityId) -> Option<&mut Row<Course>> {
        self.courses.iter_mut().find(|r| r.value.id == id)
    }

    fn live_course(&self, id: EntityId) -> Option<&Course> {
        self.courses
            .iter()
            .find(|r| !r.deleted && r.value.id == id)
            .map(|r| &r.value)
    }

    fn live_lessons(&self, course_id: EntityId) -> impl Iterator<Item = &Lesson> {
        self.lessons
            .iter()
            .filter(move |r| !r.deleted && r.value.course_id == course_id)
            .map(|r| &r.value)
    }
}

/// Newest first by `key`, ties broken by latest insertion
fn newest_first<T: Clone, K: Ord>(rows: impl DoubleEndedIterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = rows.rev().collect();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}
