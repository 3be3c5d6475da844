pub mod clip_json;
pub mod gltf;

use std::path::Path;

use crate::animation::AnimationClip;
use crate::errors::{Result, ViewerError};
use crate::scene::Scene;

/// Asset formats understood by the loaders, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    /// `.gltf` / `.glb`
    Gltf,
    /// three.js clip `.json`
    ClipJson,
}

impl AssetFormat {
    pub fn from_locator(locator: &str) -> Result<Self> {
        let extension = Path::new(locator)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("gltf" | "glb") => Ok(Self::Gltf),
            Some("json") => Ok(Self::ClipJson),
            _ => Err(ViewerError::UnsupportedFormat(locator.to_string())),
        }
    }
}

/// Decodes a model asset. Only glTF carries a scene graph.
pub fn decode_model(locator: &str, bytes: &[u8]) -> Result<Scene> {
    match AssetFormat::from_locator(locator)? {
        AssetFormat::Gltf => self::gltf::load_model_from_slice(bytes),
        AssetFormat::ClipJson => Err(ViewerError::UnsupportedFormat(format!(
            "{locator} (clip JSON holds no model)"
        ))),
    }
}

/// Decodes the first animation clip found in an asset.
pub fn decode_animation(locator: &str, bytes: &[u8]) -> Result<AnimationClip> {
    match AssetFormat::from_locator(locator)? {
        AssetFormat::Gltf => self::gltf::load_first_animation_from_slice(bytes),
        AssetFormat::ClipJson => clip_json::load_first_animation_from_slice(bytes),
    }
}
