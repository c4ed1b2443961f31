//! HTTP adapter for the club lifecycle API.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use handlers::ClubAppState;
pub use routes::club_router;
