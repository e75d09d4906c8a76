//! Service context - dependency container for services
//!
//! Holds all repositories, the token verifier and the optional payment gateway.
//! Constructed explicitly at startup and handed to every request handler.

use std::sync::Arc;

use academy_common::auth::JwtService;
use academy_core::traits::{
    CategoryRepository, CourseRepository, DiscussionRepository, EnrollmentRepository,
    ForumCategoryRepository, LessonRepository, LiveClassRepository, NotificationRepository,
    ReviewRepository, UserRepository,
};
use academy_db::{
    MemoryStore, PgCategoryRepository, PgCourseRepository, PgDiscussionRepository,
    PgEnrollmentRepository, PgForumCategoryRepository, PgLessonRepository, PgLiveClassRepository,
    PgNotificationRepository, PgPool, PgReviewRepository, PgUserRepository,
};

use crate::payments::PaymentGateway;

use super::error::{ServiceError, ServiceResult};

/// Currency used for payment intents when none is configured
pub const DEFAULT_PAYMENT_CURRENCY: &str = "inr";

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (PostgreSQL or in-memory)
/// - The database pool for readiness checks, when backed by PostgreSQL
/// - JWT service for verifying identity-provider tokens
/// - The payment gateway, when payments are configured
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    forum_category_repo: Arc<dyn ForumCategoryRepository>,
    course_repo: Arc<dyn CourseRepository>,
    lesson_repo: Arc<dyn LessonRepository>,
    enrollment_repo: Arc<dyn EnrollmentRepository>,
    live_class_repo: Arc<dyn LiveClassRepository>,
    discussion_repo: Arc<dyn DiscussionRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    review_repo: Arc<dyn ReviewRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    payment_gateway: Option<Arc<dyn PaymentGateway>>,
    payment_currency: String,
}

impl ServiceContext {
    /// Context backed by PostgreSQL repositories
    pub fn postgres(pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            category_repo: Arc::new(PgCategoryRepository::new(pool.clone())),
            forum_category_repo: Arc::new(PgForumCategoryRepository::new(pool.clone())),
            course_repo: Arc::new(PgCourseRepository::new(pool.clone())),
            lesson_repo: Arc::new(PgLessonRepository::new(pool.clone())),
            enrollment_repo: Arc::new(PgEnrollmentRepository::new(pool.clone())),
            live_class_repo: Arc::new(PgLiveClassRepository::new(pool.clone())),
            discussion_repo: Arc::new(PgDiscussionRepository::new(pool.clone())),
            notification_repo: Arc::new(PgNotificationRepository::new(pool.clone())),
            review_repo: Arc::new(PgReviewRepository::new(pool.clone())),
            pool: Some(pool),
            jwt_service,
            payment_gateway: None,
            payment_currency: DEFAULT_PAYMENT_CURRENCY.to_string(),
        }
    }

    /// Context backed by a fresh [`MemoryStore`]
    pub fn in_memory(jwt_service: Arc<JwtService>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            pool: None,
            user_repo: store.clone(),
            category_repo: store.clone(),
            forum_category_repo: store.clone(),
            course_repo: store.clone(),
            lesson_repo: store.clone(),
            enrollment_repo: store.clone(),
            live_class_repo: store.clone(),
            discussion_repo: store.clone(),
            notification_repo: store.clone(),
            review_repo: store,
            jwt_service,
            payment_gateway: None,
            payment_currency: DEFAULT_PAYMENT_CURRENCY.to_string(),
        }
    }

    /// Enable checkout through `gateway`, charging in `currency`
    pub fn with_payments(
        mut self,
        gateway: Arc<dyn PaymentGateway>,
        currency: impl Into<String>,
    ) -> Self {
        self.payment_gateway = Some(gateway);
        self.payment_currency = currency.into();
        self
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if this context is database-backed
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    pub fn forum_category_repo(&self) -> &dyn ForumCategoryRepository {
        self.forum_category_repo.as_ref()
    }

    pub fn course_repo(&self) -> &dyn CourseRepository {
        self.course_repo.as_ref()
    }

    pub fn lesson_repo(&self) -> &dyn LessonRepository {
        self.lesson_repo.as_ref()
    }

    pub fn enrollment_repo(&self) -> &dyn EnrollmentRepository {
        self.enrollment_repo.as_ref()
    }

    pub fn live_class_repo(&self) -> &dyn LiveClassRepository {
        self.live_class_repo.as_ref()
    }

    pub fn discussion_repo(&self) -> &dyn DiscussionRepository {
        self.discussion_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the payment gateway, if payments are configured
    pub fn payment_gateway(&self) -> Option<&dyn PaymentGateway> {
        self.payment_gateway.as_deref()
    }

    /// Currency charged at checkout
    pub fn payment_currency(&self) -> &str {
        &self.payment_currency
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("payments", &self.payment_gateway.is_some())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    forum_category_repo: Option<Arc<dyn ForumCategoryRepository>>,
    course_repo: Option<Arc<dyn CourseRepository>>,
    lesson_repo: Option<Arc<dyn LessonRepository>>,
    enrollment_repo: Option<Arc<dyn EnrollmentRepository>>,
    live_class_repo: Option<Arc<dyn LiveClassRepository>>,
    discussion_repo: Option<Arc<dyn DiscussionRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    payment_gateway: Option<Arc<dyn PaymentGateway>>,
    payment_currency: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn forum_category_repo(mut self, repo: Arc<dyn ForumCategoryRepository>) -> Self {
        self.forum_category_repo = Some(repo);
        self
    }

    pub fn course_repo(mut self, repo: Arc<dyn CourseRepository>) -> Self {
        self.course_repo = Some(repo);
        self
    }

    pub fn lesson_repo(mut self, repo: Arc<dyn LessonRepository>) -> Self {
        self.lesson_repo = Some(repo);
        self
    }

    pub fn enrollment_repo(mut self, repo: Arc<dyn EnrollmentRepository>) -> Self {
        self.enrollment_repo = Some(repo);
        self
    }

    pub fn live_class_repo(mut self, repo: Arc<dyn LiveClassRepository>) -> Self {
        self.live_class_repo = Some(repo);
        self
    }

    pub fn discussion_repo(mut self, repo: Arc<dyn DiscussionRepository>) -> Self {
        self.discussion_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn payment_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.payment_gateway = Some(gateway);
        self
    }

    pub fn payment_currency(mut self, currency: impl Into<String>) -> Self {
        self.payment_currency = Some(currency.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            category_repo: required(self.category_repo, "category_repo")?,
            forum_category_repo: required(self.forum_category_repo, "forum_category_repo")?,
            course_repo: required(self.course_repo, "course_repo")?,
            lesson_repo: required(self.lesson_repo, "lesson_repo")?,
            enrollment_repo: required(self.enrollment_repo, "enrollment_repo")?,
            live_class_repo: required(self.live_class_repo, "live_class_repo")?,
            discussion_repo: required(self.discussion_repo, "discussion_repo")?,
            notification_repo: required(self.notification_repo, "notification_repo")?,
            review_repo: required(self.review_repo, "review_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            payment_gateway: self.payment_gateway,
            payment_currency: self
                .payment_currency
                .unwrap_or_else(|| DEFAULT_PAYMENT_CURRENCY.to_string()),
        })
    }
}
