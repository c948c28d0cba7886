//! Forbidden-Zone Geometry
//!
//! Provides polygon containment tests and zone configuration loading
//! for restricted-area monitoring.

mod config;
mod polygon;

pub use config::{CameraSource, ZoneSetConfig};
pub use polygon::{ZoneKind, ZonePolygon};

use thiserror::Error;

/// Zone errors
#[derive(Debug, Error)]
pub enum ZoneError {
    /// A polygon with fewer than 3 vertices cannot bound an area
    #[error("zone '{name}' has {count} vertices, at least 3 are required")]
    DegeneratePolygon { name: String, count: usize },

    /// Zone configuration file could not be read
    #[error("failed to read zone config: {0}")]
    Io(#[from] std::io::Error),

    /// Zone configuration file could not be parsed
    #[error("failed to parse zone config: {0}")]
    Parse(#[from] serde_json::Error),
}
