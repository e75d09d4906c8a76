//! Review service

use academy_core::entities::Review;
use academy_core::{DomainError, EntityId, Rating};
use tracing::{info, instrument};

use crate::dto::{ReviewResponse, ReviewSubmittedResponse, SubmitReviewRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a review and return it with the course's new mean rating
    #[instrument(skip(self, request))]
    pub async fn submit(
        &self,
        user_id: EntityId,
        course_id: EntityId,
        request: SubmitReviewRequest,
    ) -> ServiceResult<ReviewSubmittedResponse> {
        let rating = Rating::new(request.rating)?;
        let review = Review::new(course_id, user_id, rating, request.comment);

        let course_rating = self.ctx.review_repo().create(&review).await?;

        info!(course_id = %course_id, rating = review.rating, %course_rating, "Review submitted");
        Ok(ReviewSubmittedResponse {
            review: ReviewResponse::from(&review),
            course_rating,
        })
    }

    /// Reviews of a live course, newest first
    #[instrument(skip(self))]
    pub async fn list_for_course(&self, course_id: EntityId) -> ServiceResult<Vec<ReviewResponse>> {
        if self.ctx.course_repo().find_by_id(course_id).await?.is_none() {
            return Err(DomainError::CourseNotFound(course_id).into());
        }
        let reviews = self.ctx.review_repo().find_by_course(course_id).await?;
        Ok(reviews.iter().map(ReviewResponse::from).collect())
    }
}
