//! Checkout service
//!
//! Paid enrollment in two steps: a payment intent is created at the processor
//! and the client completes it, then the client confirms and the user is
//! enrolled with a confirmation notification.

use std::collections::BTreeMap;

use academy_common::AppError;
use academy_core::entities::{Notification, User};
use academy_core::{DomainError, EntityId};
use tracing::{info, instrument};

use crate::dto::{
    ConfirmPaymentRequest, ConfirmPaymentResponse, EnrollmentResponse, NotificationResponse,
    PaymentIntentRequest, PaymentIntentResponse,
};
use crate::payments::{PaymentGateway, PaymentIntentParams};

use super::access::AccessService;
use super::context::ServiceContext;
use super::enrollment::EnrollmentService;
use super::error::ServiceResult;

/// Checkout service
pub struct CheckoutService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CheckoutService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn gateway(&self) -> ServiceResult<&'a dyn PaymentGateway> {
        Ok(self.ctx.payment_gateway().ok_or(AppError::PaymentsDisabled)?)
    }

    /// Create a payment intent for the course price
    #[instrument(skip(self, request))]
    pub async fn create_payment_intent(
        &self,
        user_id: EntityId,
        request: PaymentIntentRequest,
    ) -> ServiceResult<PaymentIntentResponse> {
        let gateway = self.gateway()?;
        let user = AccessService::new(self.ctx).require_user(user_id).await?;
        let course = EnrollmentService::new(self.ctx)
            .require_published(request.course_id)
            .await?;

        if self
            .ctx
            .enrollment_repo()
            .find(user_id, course.id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyEnrolled.into());
        }

        let amount_minor = course.price_minor_units().ok_or_else(|| {
            DomainError::ValidationError(format!("Price {} is out of range", course.price))
        })?;
        let customer = self.ensure_customer(gateway, &user).await?;

        let mut metadata = BTreeMap::new();
        metadata.insert("courseId".to_string(), course.id.to_string());
        metadata.insert("userId".to_string(), user_id.to_string());

        let params = PaymentIntentParams {
            amount_minor,
            currency: self.ctx.payment_currency().to_lowercase(),
            customer: Some(customer),
            metadata,
        };
        let intent = gateway.create_payment_intent(&params).await?;

        info!(
            payment_intent_id = %intent.id,
            course_id = %course.id,
            user_id = %user_id,
            amount_minor,
            "Payment intent created"
        );
        Ok(PaymentIntentResponse {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id,
            amount: amount_minor,
            currency: params.currency,
        })
    }

    /// Billing customer of the user, registered at the processor on first use
    async fn ensure_customer(&self, gateway: &dyn PaymentGateway, user: &User) -> ServiceResult<String> {
        if let Some(existing) = &user.billing_customer_id {
            return Ok(existing.clone());
        }

        let name = user.display_name();
        let customer_id = gateway
            .create_customer(user.email.as_deref(), name.as_deref())
            .await?;
        self.ctx
            .user_repo()
            .set_billing_customer(user.id, &customer_id)
            .await?;

        info!(user_id = %user.id, "Billing customer registered");
        Ok(customer_id)
    }

    /// Enroll after a successful payment and notify the user
    #[instrument(skip(self, request))]
    pub async fn confirm_payment(
        &self,
        user_id: EntityId,
        request: ConfirmPaymentRequest,
    ) -> ServiceResult<ConfirmPaymentResponse> {
        self.gateway()?;
        let enrollments = EnrollmentService::new(self.ctx);
        let course = enrollments.require_published(request.course_id).await?;
        // A confirm that enrolled but failed before notifying is finished by the retry
        let enrollment = match self.ctx.enrollment_repo().find(user_id, course.id).await? {
            Some(existing) if !self.is_notified(user_id, course.id).await? => existing,
            Some(_) => return Err(DomainError::AlreadyEnrolled.into()),
            None => enrollments.create_enrollment(user_id, &course).await?,
        };

        let notification = Notification::enrollment_confirmed(user_id, course.id);
        self.ctx.notification_repo().create(&notification).await?;

        info!(
            course_id = %course.id,
            user_id = %user_id,
            payment_intent_id = request.payment_intent_id.as_deref().unwrap_or("-"),
            "Payment confirmed"
        );
        Ok(ConfirmPaymentResponse {
            message: "Payment confirmed and enrolled successfully".to_string(),
            enrollment: EnrollmentResponse::from(enrollment),
            notification: NotificationResponse::from(&notification),
        })
    }

    async fn is_notified(&self, user_id: EntityId, course_id: EntityId) -> ServiceResult<bool> {
        let notifications = self.ctx.notification_repo().find_by_user(user_id).await?;
        Ok(notifications.iter().any(|n| n.confirms_enrollment(course_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::{PaymentError, PaymentIntent};
    use crate::services::context::ServiceContextBuilder;
    use crate::services::test_support::{seed_course, seed_user, test_context};
    use academy_common::JwtService;
    use academy_core::traits::{NotificationRepository, RepoResult};
    use academy_core::UserRole;
    use academy_db::MemoryStore;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeGateway {
        customers: Mutex<Vec<Option<String>>>,
        intents: Mutex<Vec<PaymentIntentParams>>,
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_customer(
            &self,
            email: Option<&str>,
            _name: Option<&str>,
        ) -> Result<String, PaymentError> {
            let mut customers = self.customers.lock();
            customers.push(email.map(str::to_string));
            Ok(format!("cus_{}", customers.len()))
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

    fn paid_context(gateway: Arc<FakeGateway>) -> ServiceContext {
        test_context().with_payments(gateway, "inr")
    }

    #[tokio::test]
    async fn test_intent_charges_price_in_minor_units() {
        let gateway = Arc::new(FakeGateway::default());
        let ctx = paid_context(gateway.clone());
        let course = seed_course(&ctx, true).await;
        let buyer = seed_user(&ctx, UserRole::Learner).await;

        let intent = CheckoutService::new(&ctx)
            .create_payment_intent(buyer.id, PaymentIntentRequest { course_id: course.id })
            .await
            .unwrap();
        assert_eq!(intent.amount, 49_900);
        assert_eq!(intent.currency, "inr");
        assert_eq!(intent.client_secret, "pi_1_secret");

        let sent = gateway.intents.lock()[0].clone();
        assert_eq!(sent.customer.as_deref(), Some("cus_1"));
        assert_eq!(sent.metadata["courseId"], course.id.to_string());
        assert_eq!(sent.metadata["userId"], buyer.id.to_string());
    }

    #[tokio::test]
    async fn test_customer_registered_once() {
        let gateway = Arc::new(FakeGateway::default());
        let ctx = paid_context(gateway.clone());
        let first = seed_course(&ctx, true).await;
        let second = seed_course(&ctx, true).await;
        let buyer = seed_user(&ctx, UserRole::Learner).await;
        let service = CheckoutService::new(&ctx);

        for course in [&first, &second] {
            service
                .create_payment_intent(buyer.id, PaymentIntentRequest { course_id: course.id })
                .await
                .unwrap();
        }
        assert_eq!(gateway.customers.lock().len(), 1);

        let stored = ctx.user_repo().find_by_id(buyer.id).await.unwrap().unwrap();
        assert_eq!(stored.billing_customer_id.as_deref(), Some("cus_1"));
    }

    #[tokio::test]
    async fn test_payments_disabled_without_gateway() {
        let ctx = test_context();
        let course = seed_course(&ctx, true).await;
        let buyer = seed_user(&ctx, UserRole::Learner).await;

        let err = CheckoutService::new(&ctx)
            .create_payment_intent(buyer.id, PaymentIntentRequest { course_id: course.id })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.error_code(), "PAYMENTS_DISABLED");
    }

    #[tokio::test]
    async fn test_confirm_enrolls_and_notifies() {
        let ctx = paid_context(Arc::new(FakeGateway::default()));
        let course = seed_course(&ctx, true).await;
        let buyer = seed_user(&ctx, UserRole::Learner).await;
        let service = CheckoutService::new(&ctx);
        let request = ConfirmPaymentRequest {
            course_id: course.id,
            payment_intent_id: Some("pi_1".to_string()),
        };

        let confirmed = service.confirm_payment(buyer.id, request.clone()).await.unwrap();
        assert_eq!(confirmed.enrollment.course_id, course.id.to_string());
        assert_eq!(confirmed.notification.kind, "course_update");
        assert_eq!(confirmed.notification.title, "Course Enrollment Successful");

        let stored = ctx.course_repo().find_by_id(course.id).await.unwrap().unwrap();
        assert_eq!(stored.total_enrollments, 1);
        assert_eq!(ctx.notification_repo().find_by_user(buyer.id).await.unwrap().len(), 1);

        let err = service.confirm_payment(buyer.id, request).await.unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_ENROLLED");

        let err = service
            .create_payment_intent(buyer.id, PaymentIntentRequest { course_id: course.id })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    /// Notification store that can be switched to fail every insert
    struct FailingNotifications {
        store: Arc<MemoryStore>,
        failing: AtomicBool,
    }

    #[async_trait]
    impl NotificationRepository for FailingNotifications {
        async fn create(&self, notification: &Notification) -> RepoResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(DomainError::DatabaseError("insert failed".to_string()));
            }
            NotificationRepository::create(self.store.as_ref(), notification).await
        }

        async fn find_by_user(&self, user_id: EntityId) -> RepoResult<Vec<Notification>> {
            NotificationRepository::find_by_user(self.store.as_ref(), user_id).await
        }

        async fn mark_read(&self, id: EntityId, user_id: EntityId) -> RepoResult<()> {
            NotificationRepository::mark_read(self.store.as_ref(), id, user_id).await
        }

        async fn mark_all_read(&self, user_id: EntityId) -> RepoResult<u64> {
            NotificationRepository::mark_all_read(self.store.as_ref(), user_id).await
        }
    }

    #[tokio::test]
    async fn test_confirm_retry_completes_after_notification_failure() {
        let store = Arc::new(MemoryStore::new());
        let notifications = Arc::new(FailingNotifications {
            store: store.clone(),
            failing: AtomicBool::new(true),
        });
        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .category_repo(store.clone())
            .forum_category_repo(store.clone())
            .course_repo(store.clone())
            .lesson_repo(store.clone())
            .enrollment_repo(store.clone())
            .live_class_repo(store.clone())
            .discussion_repo(store.clone())
            .notification_repo(notifications.clone())
            .review_repo(store)
            .jwt_service(Arc::new(JwtService::new("test-secret")))
            .payment_gateway(Arc::new(FakeGateway::default()))
            .build()
            .unwrap();
        let course = seed_course(&ctx, true).await;
        let buyer = seed_user(&ctx, UserRole::Learner).await;
        let service = CheckoutService::new(&ctx);
        let request = ConfirmPaymentRequest {
            course_id: course.id,
            payment_intent_id: Some("pi_1".to_string()),
        };

        let err = service.confirm_payment(buyer.id, request.clone()).await.unwrap_err();
        assert_eq!(err.error_code(), "DATABASE_ERROR");

        notifications.failing.store(false, Ordering::SeqCst);
        let confirmed = service.confirm_payment(buyer.id, request.clone()).await.unwrap();
        assert_eq!(confirmed.enrollment.course_id, course.id.to_string());

        let stored = ctx.course_repo().find_by_id(course.id).await.unwrap().unwrap();
        assert_eq!(stored.total_enrollments, 1);
        let inbox = ctx.notification_repo().find_by_user(buyer.id).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert!(inbox[0].confirms_enrollment(course.id));

        let err = service.confirm_payment(buyer.id, request).await.unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_ENROLLED");
    }
}
