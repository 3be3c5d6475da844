//! Scene graph for the loaded avatar:
//! - Node: named node with parent/child links and a transform
//! - Transform: position, rotation, scale with cached matrices
//! - Scene: node container with a bone-name index
//! - Camera: perspective camera driven by viewport resizes

pub mod camera;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
