//! Storage adapters - entity store implementations.

mod in_memory;

pub use in_memory::{InMemoryClubStore, InMemoryRoster};
