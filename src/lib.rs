#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Humanoid avatar viewer with switchable skeletal animations.
//!
//! Clips authored for a Mixamo skeleton are retargeted onto the avatar
//! (rotation channels only, bone prefix stripped), registered as named
//! actions as they finish loading, and switched on demand.

pub mod animation;
pub mod assets;
pub mod errors;
pub mod scene;
pub mod utils;
pub mod viewer;

pub use animation::{
    AnimationAction, AnimationClip, AnimationController, AnimationMixer, ControllerConfig,
    ControllerState, LoopMode, retarget, retarget_with_prefix,
};
pub use assets::{AssetReader, AssetServer, FileAssetReader, LoadEvent, MemoryAssetReader};
pub use errors::{Result, ViewerError};
pub use scene::{Camera, Node, Scene};
pub use utils::Timer;
pub use viewer::{AvatarViewer, HeadlessRenderer, Renderer, ViewerSettings, ViewerStatus};
