//! Learner dashboard statistics

use academy_core::{EntityId, ProgressSummary};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Progress service
pub struct ProgressService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProgressService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Totals across all of the user's enrollments
    #[instrument(skip(self))]
    pub async fn summary(&self, user_id: EntityId) -> ServiceResult<ProgressSummary> {
        let snapshots = self.ctx.enrollment_repo().progress_snapshots(user_id).await?;
        Ok(ProgressSummary::from_snapshots(&snapshots))
    }
}
