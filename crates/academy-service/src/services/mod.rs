//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod access;
pub mod catalog;
pub mod checkout;
pub mod context;
pub mod course;
pub mod discussion;
pub mod enrollment;
pub mod error;
pub mod live_class;
pub mod notification;
pub mod progress;
pub mod review;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use access::AccessService;
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_PAYMENT_CURRENCY};
pub use course::CourseService;
pub use discussion::DiscussionService;
pub use enrollment::EnrollmentService;
pub use error::{ServiceError, ServiceResult};
pub use live_class::LiveClassService;
pub use notification::NotificationService;
pub use progress::ProgressService;
pub use review::ReviewService;
pub use user::UserService;
