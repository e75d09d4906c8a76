//! Route definitions
//!
//! All API routes organized by area and mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{
    catalog, courses, discussions, enrollments, health, lessons, live_classes, notifications,
    payments, users,
};
use crate::state::AppState;

/// Prefix of every route
pub const API_PREFIX: &str = "/api/v1";

/// Create the main API router (health probes are separate)
pub fn create_router() -> Router<AppState> {
    Router::new().nest(API_PREFIX, api_v1_routes())
}

/// Health check routes (kept apart to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new().nest(
        API_PREFIX,
        Router::new()
            .route("/health", get(health::health_check))
            .route("/health/ready", get(health::readiness_check)),
    )
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(catalog_routes())
        .merge(course_routes())
        .merge(enrollment_routes())
        .merge(live_class_routes())
        .merge(discussion_routes())
        .merge(notification_routes())
        .merge(payment_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/user",
            get(users::get_current_user).put(users::sync_current_user),
        )
        .route("/users/:user_id/role", put(users::update_user_role))
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/forum-categories",
            get(catalog::list_forum_categories).post(catalog::create_forum_category),
        )
}

fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route(
            "/courses/:course_id",
            get(courses::get_course)
                .patch(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/courses/:course_id/lessons", post(courses::create_lesson))
        .route(
            "/courses/:course_id/enrollments",
            get(courses::list_course_enrollments),
        )
        .route(
            "/courses/:course_id/reviews",
            get(courses::list_reviews).post(courses::submit_review),
        )
        .route(
            "/instructors/:user_id/courses",
            get(courses::list_instructor_courses),
        )
        .route(
            "/lessons/:lesson_id",
            patch(lessons::update_lesson).delete(lessons::delete_lesson),
        )
        .route("/lessons/:lesson_id/complete", post(lessons::complete_lesson))
}

fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(enrollments::enroll))
        .route(
            "/enrollments/:course_id/progress",
            put(enrollments::update_progress),
        )
        .route("/user/enrollments", get(enrollments::list_my_enrollments))
        .route("/user/progress", get(enrollments::my_progress))
}

fn live_class_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/live-classes",
            get(live_classes::list_live_classes).post(live_classes::create_live_class),
        )
        .route("/live-classes/:id", get(live_classes::get_live_class))
        .route(
            "/live-classes/:id/active",
            put(live_classes::set_live_class_active),
        )
        .route("/live-classes/:id/join", post(live_classes::join_live_class))
        .route("/live-classes/:id/leave", post(live_classes::leave_live_class))
        .route("/live-classes/:id/attendees", get(live_classes::list_attendees))
}

fn discussion_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/discussions",
            get(discussions::list_discussions).post(discussions::create_discussion),
        )
        .route(
            "/discussions/:id",
            get(discussions::get_discussion).patch(discussions::update_discussion),
        )
        .route("/discussions/:id/replies", post(discussions::create_reply))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/read-all",
            put(notifications::mark_all_notifications_read),
        )
        .route(
            "/notifications/:id/read",
            put(notifications::mark_notification_read),
        )
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments/intent", post(payments::create_payment_intent))
        .route("/payments/confirm", post(payments::confirm_payment))
}
