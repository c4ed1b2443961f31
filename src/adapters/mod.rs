//! Adapters - implementations of the ports.

pub mod http;
pub mod notifications;
pub mod storage;
