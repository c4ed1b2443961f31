//! Bookbound - Book Club Round Management
//!
//! This crate runs the recurring book club round workflow: members propose
//! books or themes in a discussion, vote in a poll, and tiebreak until a
//! single winner produces a Book or a follow-on Discussion.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
