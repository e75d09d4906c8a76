//! Route handlers
//!
//! All HTTP request handlers organized by area.

pub mod catalog;
pub mod courses;
pub mod discussions;
pub mod enrollments;
pub mod health;
pub mod lessons;
pub mod live_classes;
pub mod notifications;
pub mod payments;
pub mod users;
