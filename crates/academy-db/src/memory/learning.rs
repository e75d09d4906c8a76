//! Enrollments, lesson progress, live classes and reviews

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use academy_core::entities::{
    Enrollment, EnrollmentWithCourse, EnrollmentWithUser, Lesson, LessonProgress, LiveClass,
    LiveClassAttendee, Review, ReviewWithUser,
};
use academy_core::error::DomainError;
use academy_core::progress::EnrollmentSnapshot;
use academy_core::traits::{
    EnrollmentRepository, LiveClassRepository, RepoResult, ReviewRepository,
};
use academy_core::value_objects::{EntityId, ProgressPercent};

use super::{newest_first, MemoryStore};

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn create(&self, enrollment: &Enrollment) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        tables.require_user(enrollment.user_id)?;

        let duplicate = tables
            .enrollments
            .iter()
            .any(|e| e.user_id == enrollment.user_id && e.course_id == enrollment.course_id);
        if duplicate {
            return Err(DomainError::AlreadyEnrolled);
        }

        let row = tables
            .course_row_mut(enrollment.course_id)
            .ok_or(DomainError::CourseNotFound(enrollment.course_id))?;
        row.value.total_enrollments += 1;

        tables.enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn find(&self, user_id: EntityId, course_id: EntityId) -> RepoResult<Option<Enrollment>> {
        Ok(self
            .tables
            .lock()
            .enrollments
            .iter()
            .find(|e| e.user_id == user_id && e.course_id == course_id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: EntityId) -> RepoResult<Vec<EnrollmentWithCourse>> {
        let tables = self.tables.lock();
        let rows = tables
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter_map(|e| {
                let course = tables.live_course(e.course_id)?.clone();
                Some(EnrollmentWithCourse {
                    enrollment: e.clone(),
                    course,
                })
            })
            .collect::<Vec<_>>();
        Ok(newest_first(rows.into_iter(), |r| r.enrollment.enrolled_at))
    }

    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<EnrollmentWithUser>> {
        let tables = self.tables.lock();
        let rows = tables
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .filter_map(|e| {
                let user = tables.users.iter().find(|u| u.id == e.user_id)?.clone();
                Some(EnrollmentWithUser {
                    enrollment: e.clone(),
                    user,
                })
            })
            .collect::<Vec<_>>();
        Ok(newest_first(rows.into_iter(), |r| r.enrollment.enrolled_at))
    }

    async fn update_progress(
        &self,
        user_id: EntityId,
        course_id: EntityId,
        progress: ProgressPercent,
    ) -> RepoResult<Enrollment> {
        let mut tables = self.tables.lock();
        let enrollment = tables
            .enrollments
            .iter_mut()
            .find(|e| e.user_id == user_id && e.course_id == course_id)
            .ok_or(DomainError::NotEnrolled)?;
        enrollment.apply_progress(progress, Utc::now());
        Ok(enrollment.clone())
    }

    async fn record_lesson_completion(
        &self,
        user_id: EntityId,
        lesson: &Lesson,
        watch_time_seconds: i32,
    ) -> RepoResult<Enrollment> {
        let now = Utc::now();
        let mut tables = self.tables.lock();

        let index = tables
            .enrollments
            .iter()
            .position(|e| e.user_id == user_id && e.course_id == lesson.course_id)
            .ok_or(DomainError::NotEnrolled)?;

        let existing = tables
            .lesson_progress
            .iter()
            .position(|p| p.user_id == user_id && p.lesson_id == lesson.id);
        match existing {
            Some(at) => tables.lesson_progress[at].complete(watch_time_seconds, now),
            None => {
                let mut record = LessonProgress::new(user_id, lesson.id);
                record.complete(watch_time_seconds, now);
                tables.lesson_progress.push(record);
            }
        }

        let lesson_ids: Vec<EntityId> = tables.live_lessons(lesson.course_id).map(|l| l.id).collect();
        let completed = tables
            .lesson_progress
            .iter()
            .filter(|p| p.user_id == user_id && p.is_completed && lesson_ids.contains(&p.lesson_id))
            .count();

        let progress = ProgressPercent::from_ratio(completed as u64, lesson_ids.len() as u64);
        let enrollment = &mut tables.enrollments[index];
        enrollment.apply_progress(progress, now);
        Ok(enrollment.clone())
    }

    async fn progress_snapshots(&self, user_id: EntityId) -> RepoResult<Vec<EnrollmentSnapshot>> {
        let tables = self.tables.lock();
        Ok(tables
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id && tables.live_course(e.course_id).is_some())
            .map(|e| EnrollmentSnapshot {
                progress: e.progress,
                completed: e.completed_at.is_some(),
                course_minutes: tables.live_lessons(e.course_id).map(Lesson::minutes).sum(),
            })
            .collect())
    }
}

#[async_trait]
impl LiveClassRepository for MemoryStore {
    async fn create(&self, live_class: &LiveClass) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        tables.require_user(live_class.instructor_id)?;
        if let Some(course_id) = live_class.course_id {
            if tables.course_row_mut(course_id).is_none() {
                return Err(DomainError::CourseNotFound(course_id));
            }
        }
        tables.live_classes.push(live_class.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<LiveClass>> {
        Ok(self.tables.lock().live_classes.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<LiveClass>> {
        let classes = self.tables.lock().live_classes.clone();
        Ok(newest_first(classes.into_iter(), |c| c.scheduled_at))
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> RepoResult<Vec<LiveClass>> {
        let mut classes: Vec<LiveClass> = self
            .tables
            .lock()
            .live_classes
            .iter()
            .filter(|c| c.is_upcoming(now))
            .cloned()
            .collect();
        classes.sort_by_key(|c| c.scheduled_at);
        Ok(classes)
    }

    async fn set_active(&self, id: EntityId, active: bool) -> RepoResult<LiveClass> {
        let mut tables = self.tables.lock();
        let class = tables
            .live_classes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::LiveClassNotFound(id))?;
        class.is_active = active;
        Ok(class.clone())
    }

    async fn join(&self, attendee: &LiveClassAttendee) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let max_attendees = tables
            .live_classes
            .iter()
            .find(|c| c.id == attendee.live_class_id)
            .map(|c| c.max_attendees)
            .ok_or(DomainError::LiveClassNotFound(attendee.live_class_id))?;

        let present: Vec<&LiveClassAttendee> = tables
            .attendees
            .iter()
            .filter(|a| a.live_class_id == attendee.live_class_id && a.is_present())
            .collect();

        if present.iter().any(|a| a.user_id == attendee.user_id) {
            return Err(DomainError::AlreadyAttending);
        }
        if present.len() >= usize::try_from(max_attendees).unwrap_or_default() {
            return Err(DomainError::LiveClassFull { max: max_attendees });
        }

        tables.require_user(attendee.user_id)?;
        tables.attendees.push(attendee.clone());
        Ok(())
    }

    async fn leave(
        &self,
        live_class_id: EntityId,
        user_id: EntityId,
        left_at: DateTime<Utc>,
    ) -> RepoResult<LiveClassAttendee> {
        let mut tables = self.tables.lock();
        let attendee = tables
            .attendees
            .iter_mut()
            .find(|a| a.live_class_id == live_class_id && a.user_id == user_id && a.is_present())
            .ok_or(DomainError::AttendanceNotFound)?;
        attendee.left_at = Some(left_at);
        Ok(attendee.clone())
    }

    async fn find_attendees(&self, live_class_id: EntityId) -> RepoResult<Vec<LiveClassAttendee>> {
        let mut attendees: Vec<LiveClassAttendee> = self
            .tables
            .lock()
            .attendees
            .iter()
            .filter(|a| a.live_class_id == live_class_id)
            .cloned()
            .collect();
        attendees.sort_by_key(|a| a.joined_at);
        Ok(attendees)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create(&self, review: &Review) -> RepoResult<Decimal> {
        let mut tables = self.tables.lock();
        if tables.live_course(review.course_id).is_none() {
            return Err(DomainError::CourseNotFound(review.course_id));
        }
        tables.require_user(review.user_id)?;
        tables.reviews.push(review.clone());

        let ratings: Vec<Decimal> = tables
            .reviews
            .iter()
            .filter(|r| r.course_id == review.course_id)
            .map(|r| Decimal::from(r.rating))
            .collect();
        let sum: Decimal = ratings.iter().sum();
        let mean = (sum / Decimal::from(ratings.len()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let row = tables
            .course_row_mut(review.course_id)
            .ok_or(DomainError::CourseNotFound(review.course_id))?;
        row.value.rating = mean;
        Ok(mean)
    }

    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<ReviewWithUser>> {
        let tables = self.tables.lock();
        let rows = tables
            .reviews
            .iter()
            .filter(|r| r.course_id == course_id)
            .filter_map(|r| {
                let user = tables.users.iter().find(|u| u.id == r.user_id)?.clone();
                Some(ReviewWithUser {
                    review: r.clone(),
                    user,
                })
            })
            .collect::<Vec<_>>();
        Ok(newest_first(rows.into_iter(), |r| r.review.created_at))
    }
}
