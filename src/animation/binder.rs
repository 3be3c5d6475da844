use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::Scene;

pub struct Binder;

impl Binder {
    /// Resolves each track of `clip` to the scene node with the same bone name.
    ///
    /// Tracks whose bone is missing from the scene are skipped.
    #[must_use]
    pub fn bind(scene: &Scene, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let bindings: Vec<PropertyBinding> = clip
            .tracks
            .iter()
            .enumerate()
            .filter_map(|(track_index, track)| {
                scene
                    .find_node_by_name(&track.meta.node_name)
                    .map(|node_handle| PropertyBinding {
                        track_index,
                        node_handle,
                        target: track.meta.target,
                    })
            })
            .collect();

        let unbound = clip.tracks.len() - bindings.len();
        if unbound > 0 {
            log::debug!(
                "Clip '{}': {unbound} of {} tracks target bones missing from scene '{}'",
                clip.name,
                clip.tracks.len(),
                scene.name
            );
        }

        bindings
    }
}
