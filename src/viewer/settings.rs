//! Viewer Settings
//!
//! Everything the viewer needs to know before it starts loading: where the
//! assets live, which animations to fetch, which one plays by default, and
//! how the camera is placed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use avatar_viewer::viewer::ViewerSettings;
//!
//! // Reference setup: walking / sitting / standing_up, walking by default
//! let settings = ViewerSettings::default();
//!
//! // Or from a JSON file; missing fields keep their defaults
//! let settings = ViewerSettings::from_json_file("viewer.json")?;
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::animation::controller::{ControllerConfig, SITTING, STANDING_UP, WALKING};
use crate::animation::retarget::MIXAMO_BONE_PREFIX;
use crate::errors::Result;

/// One named animation and the asset it is loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSource {
    pub name: String,
    pub locator: String,
}

impl AnimationSource {
    #[must_use]
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 1.5, 3.0],
            target: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Directory (or base) the locators are resolved against.
    pub asset_root: PathBuf,
    pub model: String,
    pub animations: Vec<AnimationSource>,
    pub default_animation: String,
    /// Bone-name prefix of the skeleton the clips were authored for.
    pub bone_prefix: String,
    pub camera: CameraSettings,
    pub viewport: (u32, u32),
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            model: "avatar.glb".into(),
            animations: vec![
                AnimationSource::new(WALKING, "animations/walking.glb"),
                AnimationSource::new(SITTING, "animations/sitting.glb"),
                AnimationSource::new(STANDING_UP, "animations/standing_up.glb"),
            ],
            default_animation: WALKING.into(),
            bone_prefix: MIXAMO_BONE_PREFIX.into(),
            camera: CameraSettings::default(),
            viewport: (1280, 720),
        }
    }
}

impl ViewerSettings {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The animation controller setup implied by these settings.
    #[must_use]
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            expected: self.animations.iter().map(|a| a.name.clone()).collect(),
            default_animation: self.default_animation.clone(),
            bone_prefix: self.bone_prefix.clone(),
        }
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        let (width, height) = self.viewport;
        if height == 0 { 1.0 } else { width as f32 / height as f32 }
    }
}
