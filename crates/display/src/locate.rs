//! Geolocation for the weather widget.
//!
//! A [`Locator`] yields the kiosk position. Every attempt is bounded by
//! [`locate_within`]; the caller substitutes the fallback report on any
//! error.

use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("Geolocation unavailable")]
    Unavailable,

    #[error("Geolocation denied: {0}")]
    Denied(String),

    #[error("Geolocation timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocateError>;
}

/// A kiosk with a known, configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        Ok(self.0)
    }
}

/// No positioning source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

#[async_trait]
impl Locator for NoLocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        Err(LocateError::Unavailable)
    }
}

/// Run one geolocation attempt, giving up after `limit`.
pub async fn locate_within(
    locator: &dyn Locator,
    limit: Duration,
) -> Result<Coordinates, LocateError> {
    tokio::time::timeout(limit, locator.locate())
        .await
        .map_err(|_| LocateError::Timeout(limit))?
}
