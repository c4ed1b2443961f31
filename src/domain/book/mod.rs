//! Book - terminal artifact of a resolved Books-topic poll.

mod aggregate;

pub use aggregate::Book;
