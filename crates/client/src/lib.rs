//! HTTP+JSON client for the teaser backend.

pub mod api;
pub mod backend;
pub mod dto;

pub use api::{ApiError, TeaserApi};
pub use backend::{AdminBackend, DisplayBackend};
