//! glTF / GLB loading for avatar models and animation clips.
//!
//! Buffers must be embedded (GLB binary chunk or `data:` URIs); the bytes
//! have already been fetched by an [`AssetReader`](crate::assets::AssetReader).
//! Node names are sanitized on both paths so clip tracks and skeleton bones
//! agree (`mixamorig:Hips` → `mixamorigHips`).

use glam::{Quat, Vec3};

use crate::animation::clip::{AnimationClip, Track};
use crate::animation::sanitize_node_name;
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::errors::{Result, ViewerError};
use crate::scene::{Node, NodeHandle, Scene, Transform};

use gltf::animation::util::ReadOutputs;

fn node_name(node: &gltf::Node<'_>) -> String {
    node.name()
        .map_or_else(|| format!("Node_{}", node.index()), sanitize_node_name)
}

// ============================================================================
// Models
// ============================================================================

/// Decodes the default scene (or the first scene) of a glTF asset into a
/// [`Scene`] holding the node hierarchy and rest transforms.
pub fn load_model_from_slice(bytes: &[u8]) -> Result<Scene> {
    let (document, _buffers, _images) = gltf::import_slice(bytes)?;

    let gltf_scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| ViewerError::Gltf("asset contains no scene".into()))?;

    let mut scene = Scene::new(gltf_scene.name().unwrap_or("avatar"));

    let mut stack: Vec<(gltf::Node<'_>, Option<NodeHandle>)> =
        gltf_scene.nodes().map(|n| (n, None)).collect();
    stack.reverse();

    while let Some((gltf_node, parent)) = stack.pop() {
        let (translation, rotation, scale) = gltf_node.transform().decomposed();
        let transform = Transform::from_trs(
            Vec3::from_array(translation),
            Quat::from_array(rotation),
            Vec3::from_array(scale),
        );

        let handle = scene.add_node(
            Node::new(node_name(&gltf_node)).with_transform(transform),
            parent,
        );

        let children: Vec<_> = gltf_node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, Some(handle))));
    }

    scene.update_matrix_world();
    log::debug!("Decoded glTF scene '{}' with {} nodes", scene.name, scene.node_count());
    Ok(scene)
}

// ============================================================================
// Animations
// ============================================================================

/// Decodes the first animation of a glTF asset.
///
/// Translation, rotation and scale channels become tracks named after the
/// target node. Morph-target channels are skipped.
pub fn load_first_animation_from_slice(bytes: &[u8]) -> Result<AnimationClip> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;

    let anim = document
        .animations()
        .next()
        .ok_or_else(|| ViewerError::AnimationNotFound("glTF asset has no animations".into()))?;

    let mut tracks = Vec::new();

    for channel in anim.channels() {
        let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
        let target = channel.target();
        let bone = node_name(&target.node());

        let times: Vec<f32> = reader
            .read_inputs()
            .ok_or_else(|| ViewerError::InvalidTrack(format!("channel for '{bone}' has no input times")))?
            .collect();

        let interpolation = match channel.sampler().interpolation() {
            gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
            gltf::animation::Interpolation::Step => InterpolationMode::Step,
            gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
        };

        let Some(outputs) = reader.read_outputs() else {
            log::warn!("Skipping channel for '{bone}': no output values");
            continue;
        };

        let track = match outputs {
            ReadOutputs::Translations(iter) => {
                let values: Vec<Vec3> = iter.map(Vec3::from_array).collect();
                Track::position(bone, KeyframeTrack::try_new(times, values, interpolation)?)
            }
            ReadOutputs::Rotations(iter) => {
                let values: Vec<Quat> = iter.into_f32().map(Quat::from_array).collect();
                Track::rotation(bone, KeyframeTrack::try_new(times, values, interpolation)?)
            }
            ReadOutputs::Scales(iter) => {
                let values: Vec<Vec3> = iter.map(Vec3::from_array).collect();
                Track::scale(bone, KeyframeTrack::try_new(times, values, interpolation)?)
            }
            ReadOutputs::MorphTargetWeights(_) => {
                log::debug!("Skipping morph-target channel for '{bone}'");
                continue;
            }
        };

        tracks.push(track);
    }

    let clip = AnimationClip::new(anim.name().unwrap_or("animation"), tracks);
    log::debug!(
        "Decoded glTF animation '{}' ({} tracks, {:.2}s)",
        clip.name,
        clip.tracks.len(),
        clip.duration
    );
    Ok(clip)
}
