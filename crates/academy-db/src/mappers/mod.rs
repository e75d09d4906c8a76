//! Entity <-> Model mappers
//!
//! Row models convert into domain entities with `From`, or `TryFrom` where the
//! row carries an enum name or a bounded value. A row that fails those checks
//! becomes `DomainError::DatabaseError`.

mod catalog;
mod community;
mod learning;
