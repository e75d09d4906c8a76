//! Review rating - an integer star rating in the range 1..=5

use serde::Serialize;

use crate::error::DomainError;

/// Star rating attached to a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw rating value
    pub fn new(value: i32) -> Result<Self, DomainError> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(DomainError::InvalidRating(value)),
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        i32::from(rating.0)
    }
}
