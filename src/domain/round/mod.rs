//! Round aggregate - one full cycle of proposal, vote, and resolution.

mod aggregate;

pub use aggregate::Round;
