use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binder::Binder;
use crate::animation::binding::TargetPath;
use crate::animation::clip::AnimationClip;
use crate::scene::Scene;

new_key_type! {
    /// Non-owning reference to an action stored in an [`AnimationMixer`].
    pub struct ActionHandle;
}

/// Per-avatar mixer: owns the actions and writes their poses into the scene.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: SlotMap<ActionHandle, AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stopped action for `clip`, bound to the bones of `scene`.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>, scene: &Scene) -> ActionHandle {
        let bindings = Binder::bind(scene, &clip);
        let mut action = AnimationAction::new(clip);
        action.bindings = bindings;
        self.add_action(action)
    }

    pub fn add_action(&mut self, action: AnimationAction) -> ActionHandle {
        self.actions.insert(action)
    }

    /// Removes an action from the mixer, returning it.
    pub fn uncache_action(&mut self, handle: ActionHandle) -> Option<AnimationAction> {
        self.actions.remove(handle)
    }

    #[must_use]
    pub fn action(&self, handle: ActionHandle) -> Option<&AnimationAction> {
        self.actions.get(handle)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut AnimationAction> {
        self.actions.get_mut(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of actions currently influencing the skeleton.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.actions.values().filter(|a| a.is_running()).count()
    }

    pub fn stop_all_actions(&mut self) {
        for action in self.actions.values_mut() {
            action.stop();
        }
    }

    /// Advances every running action by `dt` seconds and applies the sampled
    /// poses to the bound nodes.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for action in self.actions.values_mut() {
            if !action.is_running() {
                continue;
            }

            action.update(dt);

            if action.weight <= 0.0 {
                continue;
            }

            for i in 0..action.bindings.len() {
                let binding = action.bindings[i].clone();
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };
                let Some(node) = scene.get_node_mut(binding.node_handle) else {
                    continue;
                };

                match (value, binding.target) {
                    (TrackValue::Vector3(v), TargetPath::Translation) => node.transform.position = v,
                    (TrackValue::Vector3(v), TargetPath::Scale) => node.transform.scale = v,
                    (TrackValue::Quaternion(q), TargetPath::Rotation) => node.transform.rotation = q,
                    _ => {}
                }
            }
        }
    }
}
