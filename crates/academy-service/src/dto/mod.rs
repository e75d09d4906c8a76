//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CompleteLessonRequest, ConfirmPaymentRequest, CreateCategoryRequest, CreateCourseRequest,
    CreateDiscussionRequest, CreateForumCategoryRequest, CreateLessonRequest,
    CreateLiveClassRequest, CreateReplyRequest, EnrollRequest, PaymentIntentRequest,
    SetLiveClassActiveRequest, SubmitReviewRequest, SyncProfileRequest, UpdateCourseRequest,
    UpdateDiscussionRequest, UpdateLessonRequest, UpdateProgressRequest, UpdateRoleRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, AttendeeResponse, CategoryResponse, ConfirmPaymentResponse,
    CourseDetailResponse, CourseResponse, DiscussionDetailResponse, DiscussionResponse,
    EnrollmentResponse, ForumCategoryResponse, HealthChecks, HealthResponse, LessonResponse,
    LiveClassResponse, MarkAllReadResponse, MessageResponse, NotificationResponse,
    PaymentIntentResponse, PublicUserResponse, ReadinessResponse, ReplyResponse, ReviewResponse,
    ReviewSubmittedResponse, UserResponse,
};
