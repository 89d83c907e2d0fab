//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ScrollyError`] covers every failure mode of the page:
//! - Asset and texture loading failures (network, I/O, decoding)
//! - Missing render surfaces or containers at scene construction
//! - Malformed trigger anchors and conflicting timeline writes
//!
//! None of these errors cross a scene-context or timeline boundary. The
//! [`Page`](crate::page::Page) catches them per component and reports them
//! through the `log` facade.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scrolly::errors::{ScrollyError, Result};
//!
//! fn parse_anchor(text: &str) -> Result<Anchor> {
//!     text.parse()
//! }
//! ```

use thiserror::Error;

use crate::dom::Property;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum ScrollyError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// A 3D asset or texture could not be fetched or decoded.
    #[error("Failed to load asset `{url}`: {reason}")]
    AssetLoad {
        /// Source the load was issued for
        url: String,
        /// Human-readable cause
        reason: String,
    },

    /// The requested asset does not exist in the reader's source.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    Gltf(String),

    /// Scene description (JSON) parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // I/O & Network Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level network failure.
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP response error with status code.
    #[error("HTTP response error: status {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    // ========================================================================
    // Page Binding Errors
    // ========================================================================
    /// The canvas or its sizing container is missing from the page.
    #[error("Render surface unavailable: `{id}` not found")]
    RenderSurfaceUnavailable {
        /// Identifier that failed to resolve
        id: String,
    },

    // ========================================================================
    // Scroll Timeline Errors
    // ========================================================================
    /// A start/end anchor such as `"top center"` could not be parsed.
    #[error("Invalid trigger anchor: `{0}`")]
    InvalidAnchor(String),

    /// Two timelines tried to write the same element property.
    #[error("Property `{property:?}` of `{selector}` is already driven by timeline `{owner}`")]
    PropertyConflict {
        /// Element selector
        selector: String,
        /// Conflicting property
        property: Property,
        /// Name of the timeline that registered it first
        owner: String,
    },

    // ========================================================================
    // Platform Errors
    // ========================================================================
    /// Feature not enabled.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(String),
}

impl ScrollyError {
    /// Wraps any error as an [`ScrollyError::AssetLoad`] for `url`.
    pub fn asset_load(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetLoad {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<image::ImageError> for ScrollyError {
    fn from(err: image::ImageError) -> Self {
        ScrollyError::ImageDecode(err.to_string())
    }
}

#[cfg(feature = "gltf")]
impl From<gltf::Error> for ScrollyError {
    fn from(err: gltf::Error) -> Self {
        ScrollyError::Gltf(err.to_string())
    }
}

/// Alias for `Result<T, ScrollyError>`.
pub type Result<T> = std::result::Result<T, ScrollyError>;
