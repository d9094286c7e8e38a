//! Public teaser display: clock, weather, now-playing and carousel loops.

pub mod config;
pub mod controller;
pub mod locate;
pub mod surface;

pub use config::DisplaySettings;
pub use controller::DisplayController;
pub use locate::{Coordinates, LocateError, Locator};
pub use surface::DisplaySurface;
