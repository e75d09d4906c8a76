//! End-to-end API tests
//!
//! Each test starts its own server on a fresh in-memory store.

use std::collections::BTreeMap;
use std::sync::Arc;

use academy_core::UserRole;
use academy_service::{PaymentError, PaymentGateway, PaymentIntent, PaymentIntentParams};
use async_trait::async_trait;
use integration_tests::*;
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::json;

fn decimal(value: &str) -> f64 {
    value.parse().expect("decimal string")
}

/// Create a course as `token` and return it
async fn create_course(server: &TestServer, token: &str, body: &CreateCourseBody) -> CourseBody {
    let response = server.post_auth("/courses", token, body).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_lesson(server: &TestServer, token: &str, course_id: &str, order: i32, minutes: i32) -> LessonBody {
    let response = server
        .post_auth(
            &format!("/courses/{course_id}/lessons"),
            token,
            &CreateLessonBody::new(order, minutes),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn enroll(server: &TestServer, token: &str, course_id: &str) -> reqwest::Response {
    server
        .post_auth("/enrollments", token, &json!({ "courseId": course_id }))
        .await
        .unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/health").await.unwrap();
    let body: HealthBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "healthy");
}

#[tokio::test]
async fn test_readiness_reports_payments_disabled() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["payments"], "disabled");
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/auth/user").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_profile_sync_creates_learner() {
    let server = TestServer::start().await.unwrap();
    let (user_id, token) = server.sign_in(UserRole::Learner).await.unwrap();

    let response = server.get_auth("/auth/user", &token).await.unwrap();
    let user: UserBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, user_id.to_string());
    assert_eq!(user.role, "learner");
    assert_eq!(user.first_name.as_deref(), Some("Test"));
    assert_eq!(user.email, Some(format!("{user_id}@example.com")));
}

#[tokio::test]
async fn test_role_change_requires_admin() {
    let server = TestServer::start().await.unwrap();
    let (learner_id, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let (_, admin) = server.sign_in(UserRole::Admin).await.unwrap();

    let path = format!("/users/{learner_id}/role");
    let body = json!({ "role": "instructor" });

    let response = server.put_auth(&path, &learner, &body).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "ADMIN_REQUIRED");

    let response = server.put_auth(&path, &admin, &body).await.unwrap();
    let user: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.role, "instructor");
}

// ============================================================================
// Courses
// ============================================================================

#[tokio::test]
async fn test_learner_cannot_create_course() {
    let server = TestServer::start().await.unwrap();
    let (_, learner) = server.sign_in(UserRole::Learner).await.unwrap();

    let response = server
        .post_auth("/courses", &learner, &CreateCourseBody::published())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_INSTRUCTOR");
}

#[tokio::test]
async fn test_create_and_list_courses() {
    let server = TestServer::start().await.unwrap();
    let (instructor_id, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();

    let published = create_course(&server, &instructor, &CreateCourseBody::published()).await;
    let draft = create_course(&server, &instructor, &CreateCourseBody::draft()).await;

    assert_eq!(published.instructor_id, instructor_id.to_string());
    assert!((decimal(&published.price) - 499.0).abs() < f64::EPSILON);
    assert_eq!(published.total_enrollments, 0);
    assert!(!draft.is_published);

    let response = server.get("/courses").await.unwrap();
    let courses: Vec<CourseBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
    assert!(ids.contains(&published.id.as_str()));
    assert!(!ids.contains(&draft.id.as_str()));
}

#[tokio::test]
async fn test_draft_visible_only_to_owner() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let draft = create_course(&server, &instructor, &CreateCourseBody::draft()).await;
    let path = format!("/courses/{}", draft.id);

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth(&path, &learner).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth(&path, &instructor).await.unwrap();
    let detail: CourseDetailBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.course.id, draft.id);
}

#[tokio::test]
async fn test_course_detail_lists_lessons_in_order() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;

    create_lesson(&server, &instructor, &course.id, 2, 30).await;
    create_lesson(&server, &instructor, &course.id, 1, 45).await;

    let response = server.get(&format!("/courses/{}", course.id)).await.unwrap();
    let detail: CourseDetailBody = assert_json(response, StatusCode::OK).await.unwrap();

    let orders: Vec<i32> = detail.lessons.iter().map(|l| l.order).collect();
    assert_eq!(orders, vec![1, 2]);
    assert!(detail.reviews.is_empty());
}

#[tokio::test]
async fn test_duplicate_lesson_order_conflicts() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;
    create_lesson(&server, &instructor, &course.id, 1, 30).await;

    let response = server
        .post_auth(
            &format!("/courses/{}/lessons", course.id),
            &instructor,
            &CreateLessonBody::new(1, 15),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "LESSON_ORDER_TAKEN");
}

#[tokio::test]
async fn test_other_instructor_cannot_edit_course() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, other) = server.sign_in(UserRole::Instructor).await.unwrap();
    let course = create_course(&server, &owner, &CreateCourseBody::published()).await;
    let path = format!("/courses/{}", course.id);

    let response = server
        .patch_auth(&path, &other, &json!({ "title": "Hijacked" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_COURSE_OWNER");

    let response = server
        .patch_auth(&path, &owner, &json!({ "title": "Rust in Depth" }))
        .await
        .unwrap();
    let updated: CourseBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Rust in Depth");
}

#[tokio::test]
async fn test_deleted_course_disappears() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;
    let path = format!("/courses/{}", course.id);

    let response = server.delete_auth(&path, &instructor).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COURSE");
}

#[tokio::test]
async fn test_malformed_course_id_is_bad_request() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/courses/not-a-uuid").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Enrollments and progress
// ============================================================================

#[tokio::test]
async fn test_enrollment_counts_once() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (learner_id, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;

    let response = enroll(&server, &learner, &course.id).await;
    let enrollment: EnrollmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(enrollment.user_id, learner_id.to_string());
    assert!(decimal(&enrollment.progress).abs() < f64::EPSILON);

    let response = enroll(&server, &learner, &course.id).await;
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_ENROLLED");

    let response = server.get(&format!("/courses/{}", course.id)).await.unwrap();
    let detail: CourseDetailBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.course.total_enrollments, 1);
}

#[tokio::test]
async fn test_cannot_enroll_in_draft() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let draft = create_course(&server, &instructor, &CreateCourseBody::draft()).await;

    let response = enroll(&server, &learner, &draft.id).await;
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_completing_lessons_drives_progress() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;
    let first = create_lesson(&server, &instructor, &course.id, 1, 60).await;
    let second = create_lesson(&server, &instructor, &course.id, 2, 60).await;

    let response = enroll(&server, &learner, &course.id).await;
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(&format!("/lessons/{}/complete", first.id), &learner, &json!({}))
        .await
        .unwrap();
    let enrollment: EnrollmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!((decimal(&enrollment.progress) - 50.0).abs() < f64::EPSILON);
    assert!(enrollment.completed_at.is_none());

    let response = server
        .post_auth(
            &format!("/lessons/{}/complete", second.id),
            &learner,
            &json!({ "watchTimeSeconds": 3600 }),
        )
        .await
        .unwrap();
    let enrollment: EnrollmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!((decimal(&enrollment.progress) - 100.0).abs() < f64::EPSILON);
    assert!(enrollment.completed_at.is_some());

    let response = server.get_auth("/user/progress", &learner).await.unwrap();
    let summary: ProgressSummaryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.total_courses, 1);
    assert_eq!(summary.completed_courses, 1);
    assert_eq!(summary.total_hours, 2);
    assert_eq!(summary.overall_progress, 100);
}

#[tokio::test]
async fn test_completing_lesson_requires_enrollment() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;
    let lesson = create_lesson(&server, &instructor, &course.id, 1, 10).await;

    let response = server
        .post_auth(&format!("/lessons/{}/complete", lesson.id), &learner, &json!({}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
    assert_eq!(code, "NOT_ENROLLED");
}

#[tokio::test]
async fn test_progress_out_of_range_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;
    assert_status(enroll(&server, &learner, &course.id).await, StatusCode::CREATED)
        .await
        .unwrap();

    let path = format!("/enrollments/{}/progress", course.id);
    let response = server
        .put_auth(&path, &learner, &json!({ "progress": "120" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PROGRESS");

    let response = server
        .put_auth(&path, &learner, &json!({ "progress": "40" }))
        .await
        .unwrap();
    let enrollment: EnrollmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!((decimal(&enrollment.progress) - 40.0).abs() < f64::EPSILON);

    let response = server.get_auth("/user/enrollments", &learner).await.unwrap();
    let enrollments: Vec<EnrollmentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].course_id, course.id);
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_reviews_update_course_rating() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, first) = server.sign_in(UserRole::Learner).await.unwrap();
    let (_, second) = server.sign_in(UserRole::Learner).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;
    let path = format!("/courses/{}/reviews", course.id);

    let response = server
        .post_auth(&path, &first, &json!({ "rating": 5, "comment": "Great" }))
        .await
        .unwrap();
    let submitted: ReviewSubmittedBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(submitted.review.rating, 5);
    assert!((decimal(&submitted.course_rating) - 5.0).abs() < f64::EPSILON);

    let response = server
        .post_auth(&path, &second, &json!({ "rating": 4 }))
        .await
        .unwrap();
    let submitted: ReviewSubmittedBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!((decimal(&submitted.course_rating) - 4.5).abs() < f64::EPSILON);

    let response = server.get(&path).await.unwrap();
    let reviews: Vec<ReviewBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reviews.len(), 2);
}

#[tokio::test]
async fn test_review_rating_out_of_range() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;

    let response = server
        .post_auth(
            &format!("/courses/{}/reviews", course.id),
            &learner,
            &json!({ "rating": 6 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Live classes
// ============================================================================

#[tokio::test]
async fn test_live_class_capacity() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (first_id, first) = server.sign_in(UserRole::Learner).await.unwrap();
    let (_, second) = server.sign_in(UserRole::Learner).await.unwrap();

    let response = server
        .post_auth("/live-classes", &instructor, &CreateLiveClassBody::tomorrow(Some(1)))
        .await
        .unwrap();
    let class: LiveClassBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(class.max_attendees, 1);

    let join = format!("/live-classes/{}/join", class.id);
    let response = server.post_empty_auth(&join, &first).await.unwrap();
    let attendee: AttendeeBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(attendee.user_id, first_id.to_string());

    let response = server.post_empty_auth(&join, &first).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.post_empty_auth(&join, &second).await.unwrap();
    let code = assert_error(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
    assert_eq!(code, "LIVE_CLASS_FULL");

    let response = server
        .post_empty_auth(&format!("/live-classes/{}/leave", class.id), &first)
        .await
        .unwrap();
    let left: AttendeeBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(left.left_at.is_some());

    let response = server.post_empty_auth(&join, &second).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_live_class_defaults_and_activation() {
    let server = TestServer::start().await.unwrap();
    let (_, host) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, other) = server.sign_in(UserRole::Instructor).await.unwrap();

    let response = server
        .post_auth("/live-classes", &host, &CreateLiveClassBody::tomorrow(None))
        .await
        .unwrap();
    let class: LiveClassBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(class.max_attendees, 100);
    assert!(!class.is_active);

    let path = format!("/live-classes/{}/active", class.id);
    let response = server
        .put_auth(&path, &other, &json!({ "isActive": true }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(&path, &host, &json!({ "isActive": true }))
        .await
        .unwrap();
    let class: LiveClassBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(class.is_active);
}

// ============================================================================
// Discussions
// ============================================================================

async fn forum_category(server: &TestServer) -> ForumCategoryBody {
    let (_, admin) = server.sign_in(UserRole::Admin).await.unwrap();
    let response = server
        .post_auth(
            "/forum-categories",
            &admin,
            &json!({ "name": format!("General {}", unique_suffix()) }),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_discussion_views_and_replies() {
    let server = TestServer::start().await.unwrap();
    let category = forum_category(&server).await;
    let (_, author) = server.sign_in(UserRole::Learner).await.unwrap();

    let response = server
        .post_auth(
            "/discussions",
            &author,
            &CreateDiscussionBody {
                title: "Lifetimes".to_string(),
                content: "When do I need explicit lifetimes?".to_string(),
                category_id: category.id.clone(),
            },
        )
        .await
        .unwrap();
    let discussion: DiscussionBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(discussion.view_count, 0);

    let replies = format!("/discussions/{}/replies", discussion.id);
    let response = server
        .post_auth(
            &replies,
            &author,
            &CreateReplyBody {
                content: "Mostly when returning references".to_string(),
                parent_reply_id: None,
            },
        )
        .await
        .unwrap();
    let top: ReplyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &replies,
            &author,
            &CreateReplyBody {
                content: "Agreed".to_string(),
                parent_reply_id: Some(top.id.clone()),
            },
        )
        .await
        .unwrap();
    let child: ReplyBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(child.parent_reply_id.as_deref(), Some(top.id.as_str()));

    let response = server
        .post_auth(
            &replies,
            &author,
            &CreateReplyBody {
                content: "Too deep".to_string(),
                parent_reply_id: Some(child.id.clone()),
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "NESTED_REPLY");

    let path = format!("/discussions/{}", discussion.id);
    server.get(&path).await.unwrap();
    let response = server.get(&path).await.unwrap();
    let detail: DiscussionDetailBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.discussion.view_count, 2);
    assert_eq!(detail.discussion.reply_count, 2);
    assert_eq!(detail.replies.len(), 2);
}

#[tokio::test]
async fn test_discussion_requires_known_category() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.sign_in(UserRole::Learner).await.unwrap();

    let response = server
        .post_auth(
            "/discussions",
            &author,
            &CreateDiscussionBody {
                title: "Orphan".to_string(),
                content: "No category".to_string(),
                category_id: academy_core::EntityId::generate().to_string(),
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_FORUM_CATEGORY");
}

// ============================================================================
// Payments and notifications
// ============================================================================

#[derive(Default)]
struct FakeGateway {
    intents: Mutex<Vec<PaymentIntentParams>>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_customer(
        &self,
        _email: Option<&str>,
        _name: Option<&str>,
    ) -> Result<String, PaymentError> {
        Ok("cus_test".to_string())
    }

    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut intents = self.intents.lock();
        intents.push(params.clone());
        Ok(PaymentIntent {
            id: format!("pi_{}", intents.len()),
            client_secret: format!("pi_{}_secret", intents.len()),
        })
    }
}

#[tokio::test]
async fn test_payments_disabled_without_gateway() {
    let server = TestServer::start().await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (_, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;

    let response = server
        .post_auth("/payments/intent", &learner, &json!({ "courseId": course.id }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::SERVICE_UNAVAILABLE).await.unwrap();
    assert_eq!(code, "PAYMENTS_DISABLED");
}

#[tokio::test]
async fn test_checkout_enrolls_and_notifies() {
    let gateway = Arc::new(FakeGateway::default());
    let server = TestServer::start_with_payments(gateway.clone()).await.unwrap();
    let (_, instructor) = server.sign_in(UserRole::Instructor).await.unwrap();
    let (learner_id, learner) = server.sign_in(UserRole::Learner).await.unwrap();
    let course = create_course(&server, &instructor, &CreateCourseBody::published()).await;

    let response = server
        .post_auth("/payments/intent", &learner, &json!({ "courseId": course.id }))
        .await
        .unwrap();
    let intent: PaymentIntentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(intent.amount, 49_900);
    assert_eq!(intent.currency, "inr");
    assert_eq!(intent.payment_intent_id, "pi_1");
    assert!(!intent.client_secret.is_empty());

    let recorded = gateway.intents.lock()[0].metadata.clone();
    let expected: BTreeMap<String, String> = [
        ("courseId".to_string(), course.id.clone()),
        ("userId".to_string(), learner_id.to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(recorded, expected);

    let confirm = json!({ "courseId": course.id, "paymentIntentId": intent.payment_intent_id });
    let response = server
        .post_auth("/payments/confirm", &learner, &confirm)
        .await
        .unwrap();
    let confirmed: ConfirmPaymentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(confirmed.message, "Payment confirmed and enrolled successfully");
    assert_eq!(confirmed.enrollment.course_id, course.id);
    assert_eq!(confirmed.notification.kind, "course_update");

    let response = server
        .post_auth("/payments/confirm", &learner, &confirm)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get_auth("/notifications", &learner).await.unwrap();
    let notifications: Vec<NotificationBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(!notifications[0].is_read);

    let response = server
        .put_empty_auth(&format!("/notifications/{}/read", notifications[0].id), &learner)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.put_empty_auth("/notifications/read-all", &learner).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["updated"], 0);
}
