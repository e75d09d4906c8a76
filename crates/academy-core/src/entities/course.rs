//! Course entity - a priced, instructor-owned unit of learning
//!
//! `rating` and `total_enrollments` are derived fields. They are written only by
//! the repositories that insert reviews and enrollments.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::EntityId;

/// Difficulty level of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Course entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub category_id: Option<EntityId>,
    pub instructor_id: EntityId,
    pub level: CourseLevel,
    /// Advertised length in minutes
    pub duration: Option<i32>,
    pub is_published: bool,
    pub rating: Decimal,
    pub total_enrollments: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub const DEFAULT_CURRENCY: &'static str = "INR";

    /// Create an unpublished course with zeroed aggregates
    pub fn new(
        title: String,
        description: String,
        price: Decimal,
        instructor_id: EntityId,
        level: CourseLevel,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            title,
            description,
            thumbnail: None,
            price,
            currency: Self::DEFAULT_CURRENCY.to_string(),
            category_id: None,
            instructor_id,
            level,
            duration: None,
            is_published: false,
            rating: Decimal::ZERO,
            total_enrollments: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_instructor(&self, user_id: EntityId) -> bool {
        self.instructor_id == user_id
    }

    /// Price in minor currency units (paise, cents), rounded half away from zero
    pub fn price_minor_units(&self) -> Option<i64> {
        use rust_decimal::prelude::ToPrimitive;
        use rust_decimal::RoundingStrategy;

        (self.price * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
    }

    /// Stamp `updated_at` after a mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
