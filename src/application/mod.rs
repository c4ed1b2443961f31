//! Application layer - command handlers and cross-cutting services.

pub mod handlers;
pub mod locks;
pub mod newsletter;

pub use locks::RoundLocks;
pub use newsletter::Newsletter;
