//! # academy-db
//!
//! Storage layer implementing the repository traits of `academy-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repository implementations
//! - [`MemoryStore`], an in-memory implementation of every repository trait
//!
//! Aggregate counters (`total_enrollments`, `rating`, `reply_count`,
//! `view_count`, enrollment `progress`) are written in the same transaction as
//! the rows they summarize.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use academy_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use academy_db::repositories::PgCourseRepository;
//! use academy_core::traits::CourseRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let courses = PgCourseRepository::new(pool);
//!
//!     let published = courses.list_published().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCategoryRepository, PgCourseRepository, PgDiscussionRepository, PgEnrollmentRepository,
    PgForumCategoryRepository, PgLessonRepository, PgLiveClassRepository,
    PgNotificationRepository, PgReviewRepository, PgUserRepository,
};
