//! Asset Loading
//!
//! The model and animation sources the viewer depends on:
//!
//! - [`AssetReader`]: fetches raw bytes ([`FileAssetReader`], [`MemoryAssetReader`])
//! - [`loaders`]: decodes glTF/GLB scenes and clips, and three.js clip JSON
//! - [`AssetServer`]: runs loads concurrently and reports each outcome as a
//!   [`LoadEvent`] on a channel, consumed by a single owner

pub mod io;
pub mod loaders;
pub mod server;

pub use io::{AssetReader, FileAssetReader, MemoryAssetReader};
pub use loaders::{AssetFormat, decode_animation, decode_model};
pub use server::{AssetServer, LoadEvent};
