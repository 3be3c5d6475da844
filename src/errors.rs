//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`ViewerError`] covers every failure the viewer can
//! surface:
//! - Initialization of the rendering context
//! - Model and per-animation asset loading
//! - Decoding of glTF and JSON clip assets
//!
//! Requests to switch to an animation that has not been registered are not
//! errors; the controller ignores them.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ViewerError>`.
//!
//! ```rust,ignore
//! use avatar_viewer::errors::{Result, ViewerError};
//!
//! fn load_clip() -> Result<()> {
//!     Err(ViewerError::AnimationNotFound("walking.glb".into()))
//! }
//! ```

use thiserror::Error;

/// The main error type for the avatar viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // Viewer Lifecycle Errors
    // ========================================================================
    /// The 3D context could not be created. Fatal to the viewer.
    #[error("Failed to initialize the 3D context: {0}")]
    Initialization(String),

    /// The avatar model could not be loaded.
    #[error("Failed to load model '{locator}': {reason}")]
    ModelLoad {
        /// Locator of the model asset
        locator: String,
        /// Underlying failure
        reason: String,
    },

    /// One animation could not be loaded. Does not affect the others.
    #[error("Failed to load animation '{name}' from '{locator}': {reason}")]
    AnimationLoad {
        /// Animation identifier (e.g. `walking`)
        name: String,
        /// Locator of the animation asset
        locator: String,
        /// Underlying failure
        reason: String,
    },

    // ========================================================================
    // Asset I/O Errors
    // ========================================================================
    /// Reading raw asset bytes failed.
    #[error("Failed to read asset '{uri}': {reason}")]
    AssetRead {
        /// Requested asset URI
        uri: String,
        /// Underlying failure
        reason: String,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    Gltf(String),

    /// The asset extension is not handled by any loader.
    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    /// A track name or track payload is malformed.
    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    /// A clip payload is malformed.
    #[error("Invalid clip: {0}")]
    InvalidClip(String),

    /// The asset was decoded but contains no animation.
    #[error("No animation found in asset: {0}")]
    AnimationNotFound(String),

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// A decoding task failed to complete.
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

impl From<gltf::Error> for ViewerError {
    fn from(err: gltf::Error) -> Self {
        ViewerError::Gltf(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ViewerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ViewerError::TaskJoin(err.to_string())
    }
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
