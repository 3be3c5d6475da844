mod values;
pub mod tracks;
pub mod clip;
pub mod action;
pub mod binding;
pub mod binder;
pub mod mixer;
pub mod retarget;
pub mod controller;

pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use action::{AnimationAction, LoopMode, TrackValue};
pub use mixer::{ActionHandle, AnimationMixer};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath, sanitize_node_name};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
pub use retarget::{MIXAMO_BONE_PREFIX, retarget, retarget_with_prefix};
pub use controller::{AnimationController, ControllerConfig, ControllerState};
