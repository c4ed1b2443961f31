//! Domain layer - aggregates and pure business logic.

pub mod book;
pub mod discussion;
pub mod foundation;
pub mod poll;
pub mod round;
