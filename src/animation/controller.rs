//! Animation Controller
//!
//! Owns the avatar's [`AnimationMixer`] and a registry of named actions that
//! fills up as clips arrive, in any order.
//!
//! # Lifecycle
//!
//! - **Loading**: some expected animations are still outstanding.
//! - **Ready**: every expected animation has settled; the default animation
//!   (if registered) was started from frame zero, replacing anything picked
//!   while loading.
//! - **Active**: the user switched animations after loading completed.
//!
//! Every mutation goes through `&mut self`, so registering a clip and checking
//! whether loading is complete happen as one step. Completion fires exactly
//! once, whatever order the clips arrive in.
//!
//! ```rust,ignore
//! let mut controller = AnimationController::new(ControllerConfig::default());
//! controller.register_animation(&scene, "walking", &walking_clip);
//! controller.register_animation(&scene, "sitting", &sitting_clip);
//! controller.register_animation(&scene, "standing_up", &standing_clip);
//! assert_eq!(controller.active_animation(), Some("walking"));
//!
//! controller.switch_to("sitting");
//! controller.update(dt, &mut scene);
//! ```

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::animation::action::AnimationAction;
use crate::animation::clip::AnimationClip;
use crate::animation::mixer::{ActionHandle, AnimationMixer};
use crate::animation::retarget::{MIXAMO_BONE_PREFIX, retarget_with_prefix};
use crate::scene::Scene;

pub const WALKING: &str = "walking";
pub const SITTING: &str = "sitting";
pub const STANDING_UP: &str = "standing_up";

/// Which animations the controller waits for and which one it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub expected: Vec<String>,
    pub default_animation: String,
    /// Bone prefix stripped from incoming clips.
    pub bone_prefix: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            expected: vec![WALKING.into(), SITTING.into(), STANDING_UP.into()],
            default_animation: WALKING.into(),
            bone_prefix: MIXAMO_BONE_PREFIX.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Loading,
    Ready,
    Active,
}

#[derive(Debug)]
pub struct AnimationController {
    config: ControllerConfig,
    mixer: AnimationMixer,
    registry: FxHashMap<String, ActionHandle>,
    failed: FxHashSet<String>,
    active: Option<String>,
    loading_complete: bool,
    user_switched: bool,
}

impl AnimationController {
    #[must_use]
    pub fn new(config: ControllerConfig) -> Self {
        let mut controller = Self {
            config,
            mixer: AnimationMixer::new(),
            registry: FxHashMap::default(),
            failed: FxHashSet::default(),
            active: None,
            loading_complete: false,
            user_switched: false,
        };
        // Nothing to wait for
        if controller.config.expected.is_empty() {
            controller.try_complete_loading();
        }
        controller
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Retargets `clip`, binds it to `scene` and stores the action under `name`.
    ///
    /// A repeated name replaces the previous action (last write wins). When
    /// this call completes the expected set, the default animation starts.
    pub fn register_animation(&mut self, scene: &Scene, name: &str, clip: &AnimationClip) {
        let retargeted = retarget_with_prefix(clip, &self.config.bone_prefix);
        if retargeted.tracks.is_empty() {
            log::warn!(
                "Animation '{name}' has no rotation tracks after retargeting (source '{}', {} tracks)",
                clip.name,
                clip.tracks.len()
            );
        }

        let handle = self.mixer.clip_action(Arc::new(retargeted), scene);
        if let Some(action) = self.mixer.action(handle)
            && action.bindings.len() < action.clip().tracks.len()
        {
            log::warn!(
                "Animation '{name}': {} of {} tracks bound to the avatar skeleton",
                action.bindings.len(),
                action.clip().tracks.len()
            );
        }

        self.failed.remove(name);
        if let Some(previous) = self.registry.insert(name.to_string(), handle) {
            log::warn!("Animation '{name}' registered twice; replacing the previous action");
            let was_running = self
                .mixer
                .uncache_action(previous)
                .is_some_and(|a| a.is_running());
            if was_running && self.active.as_deref() == Some(name) {
                self.start(handle);
            }
        }

        log::info!(
            "Registered animation '{name}' ({}/{} expected)",
            self.registered_expected_count(),
            self.config.expected.len()
        );

        if self.loading_complete {
            // A default that failed earlier and arrived late still plays
            // when nothing else does.
            if self.active.is_none() && name == self.config.default_animation {
                self.start_default();
            }
        } else {
            self.try_complete_loading();
        }
    }

    /// Records that the animation `name` will never arrive.
    ///
    /// Failed names count as settled: once every expected name is either
    /// registered or failed, loading completes and the default animation
    /// starts if it is available.
    pub fn report_failure(&mut self, name: &str) {
        if self.registry.contains_key(name) {
            return;
        }
        log::warn!("Animation '{name}' will not be available");
        self.failed.insert(name.to_string());
        self.try_complete_loading();
    }

    fn try_complete_loading(&mut self) {
        if self.loading_complete {
            return;
        }
        let settled = self
            .config
            .expected
            .iter()
            .all(|n| self.registry.contains_key(n) || self.failed.contains(n));
        if !settled {
            return;
        }

        self.loading_complete = true;
        log::info!("All expected animations settled ({} failed)", self.failed.len());

        if !self.start_default() {
            log::warn!(
                "Default animation '{}' is not registered; nothing new plays",
                self.config.default_animation
            );
        }
    }

    /// Makes the default animation the only running action, from frame zero.
    /// Returns `false` when the default is not registered.
    fn start_default(&mut self) -> bool {
        let default = self.config.default_animation.clone();
        let Some(handle) = self.registry.get(&default).copied() else {
            return false;
        };

        self.stop_active();
        self.start(handle);
        self.active = Some(default);
        self.user_switched = false;
        true
    }

    fn stop_active(&mut self) {
        if let Some(current) = self.active.as_deref().and_then(|n| self.registry.get(n).copied())
            && let Some(action) = self.mixer.action_mut(current)
        {
            action.stop();
        }
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Switches playback to `name`, restarting it from frame zero.
    ///
    /// Unknown or not-yet-loaded names are ignored and `false` is returned.
    /// The previous action stops immediately (no cross-fade).
    pub fn switch_to(&mut self, name: &str) -> bool {
        let Some(&target) = self.registry.get(name) else {
            log::debug!("Ignoring switch to '{name}': not registered");
            return false;
        };

        self.stop_active();
        self.start(target);
        self.active = Some(name.to_string());
        self.user_switched = true;
        log::info!("Switched animation to '{name}'");
        true
    }

    fn start(&mut self, handle: ActionHandle) {
        if let Some(action) = self.mixer.action_mut(handle) {
            action.reset();
            action.play();
        }
    }

    /// Advances the active action by the measured frame delta.
    ///
    /// Negative or non-finite deltas are treated as zero.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid frame delta {dt}");
            0.0
        };

        if self.active.is_none() {
            return;
        }
        self.mixer.update(dt, scene);
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    #[must_use]
    pub fn state(&self) -> ControllerState {
        if !self.loading_complete {
            ControllerState::Loading
        } else if self.user_switched {
            ControllerState::Active
        } else {
            ControllerState::Ready
        }
    }

    #[must_use]
    pub fn is_loading_complete(&self) -> bool {
        self.loading_complete
    }

    #[must_use]
    pub fn active_animation(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&AnimationAction> {
        self.registry.get(name).and_then(|&h| self.mixer.action(h))
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    fn registered_expected_count(&self) -> usize {
        self.config
            .expected
            .iter()
            .filter(|n| self.registry.contains_key(*n))
            .count()
    }

    /// Expected names that failed to load, sorted.
    #[must_use]
    pub fn failed_animations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.failed.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }
}
