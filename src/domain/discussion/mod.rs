//! Discussion aggregate - the proposal-collection phase of a round.

mod aggregate;

pub use aggregate::{Discussion, Post, PostDraft};
