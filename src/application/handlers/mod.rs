//! Command and query handlers, one per operation.

pub mod discussion;
pub mod poll;
pub mod round;
