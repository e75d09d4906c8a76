//! Fixtures for service tests backed by the in-memory store

use std::sync::Arc;

use academy_common::JwtService;
use academy_core::entities::{Course, CourseLevel, Lesson, User, UserRole};
use academy_core::EntityId;
use rust_decimal::Decimal;

use super::context::ServiceContext;

pub fn test_context() -> ServiceContext {
    ServiceContext::in_memory(Arc::new(JwtService::new("test-secret")))
}

pub async fn seed_user(ctx: &ServiceContext, role: UserRole) -> User {
    let id = EntityId::generate();
    let mut user = User::new(id, Some(format!("{id}@example.com")));
    user.first_name = Some("Test".to_string());
    ctx.user_repo().upsert(&user).await.unwrap();
    if role != UserRole::Learner {
        return ctx.user_repo().update_role(id, role).await.unwrap();
    }
    user
}

/// A course owned by a fresh instructor, priced 499.00 INR
pub async fn seed_course(ctx: &ServiceContext, published: bool) -> Course {
    let instructor = seed_user(ctx, UserRole::Instructor).await;
    let mut course = Course::new(
        "Rust for the impatient".to_string(),
        "Ownership, traits and async".to_string(),
        Decimal::new(49_900, 2),
        instructor.id,
        CourseLevel::Beginner,
    );
    course.is_published = published;
    ctx.course_repo().create(&course).await.unwrap();
    course
}

pub async fn seed_lesson(ctx: &ServiceContext, course: &Course, order: i32, minutes: i32) -> Lesson {
    let mut lesson = Lesson::new(course.id, format!("Lesson {order}"), order);
    lesson.duration = Some(minutes);
    ctx.lesson_repo().create(&lesson).await.unwrap();
    lesson
}
