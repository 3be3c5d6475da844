use std::fmt;
use std::str::FromStr;

use crate::errors::ViewerError;
use crate::scene::NodeHandle;

/// Defines the target property for animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation, // transform.position, track suffix "position"
    Rotation,    // transform.rotation, track suffix "quaternion"
    Scale,       // transform.scale, track suffix "scale"
}

impl TargetPath {
    /// Property suffix used in track names (`<bone>.<suffix>`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetPath::Translation => "position",
            TargetPath::Rotation => "quaternion",
            TargetPath::Scale => "scale",
        }
    }

    /// Number of scalars per keyframe value.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            TargetPath::Rotation => 4,
            TargetPath::Translation | TargetPath::Scale => 3,
        }
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetPath {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "position" => Ok(TargetPath::Translation),
            "quaternion" => Ok(TargetPath::Rotation),
            "scale" => Ok(TargetPath::Scale),
            other => Err(ViewerError::InvalidTrack(format!(
                "unsupported track property '{other}'"
            ))),
        }
    }
}

/// Binding relationship: maps track `track_index` from a clip to the target
/// property of `node_handle` in the scene.
#[derive(Debug, Clone)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node_handle: NodeHandle,
    pub target: TargetPath,
}

/// Makes a node name usable as the bone part of a track name.
///
/// Reserved characters (`[ ] . : /`) are removed and whitespace becomes `_`,
/// so an exported `mixamorig:Hips` bone is addressed as `mixamorigHips`.
#[must_use]
pub fn sanitize_node_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '.' | ':' | '/'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
