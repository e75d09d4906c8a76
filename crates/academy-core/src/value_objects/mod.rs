//! Value objects - immutable types that represent domain concepts

mod entity_id;
mod progress_percent;
mod rating;

pub use entity_id::{EntityId, EntityIdParseError};
pub use progress_percent::ProgressPercent;
pub use rating::Rating;
