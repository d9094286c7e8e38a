//! Admin dashboard controller for the teaser kiosk.
//!
//! Handlers live in per-concern modules as `impl AdminController` blocks.

pub mod config;
pub mod controller;
pub mod events;
pub mod view;

mod saving;
mod status;
mod tools;
mod upload;
mod zones;

pub use config::AdminSettings;
pub use controller::AdminController;
pub use events::AdminEvent;
pub use tools::{CONFIRM_CLEANUP, CONFIRM_DELETE};
pub use view::AdminView;
