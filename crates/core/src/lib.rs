pub mod error;
pub mod notification;
pub mod reorder;
pub mod session;
pub mod settings;
pub mod status;
pub mod types;
pub mod upload;
pub mod widgets;
pub mod zone;
