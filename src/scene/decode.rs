use std::path::Path;

use crate::{
    foundation::error::{MotionsetError, MotionsetResult},
    scene::model::Scene,
};

/// Capability that turns a scene file into a [`Scene`].
///
/// The on-disk scene format is owned by the decoding collaborator; the
/// dataset core treats decoding as opaque. A decoder must fully read and
/// close the file within `decode`, so abandoning iteration early never
/// leaves handles open. Any failure to produce a valid scene surfaces as
/// [`MotionsetError::CorruptScene`].
pub trait SceneDecoder {
    /// Decode the scene stored at `path`.
    fn decode(&self, path: &Path) -> MotionsetResult<Scene>;
}

#[derive(Clone, Copy, Debug, Default)]
/// Decoder for JSON-encoded scene files.
pub struct JsonSceneDecoder;

impl SceneDecoder for JsonSceneDecoder {
    fn decode(&self, path: &Path) -> MotionsetResult<Scene> {
        let bytes = std::fs::read(path).map_err(|e| {
            MotionsetError::corrupt_scene(format!("{}: {e}", path.display()))
        })?;
        let scene: Scene = serde_json::from_slice(&bytes).map_err(|e| {
            MotionsetError::corrupt_scene(format!("{}: {e}", path.display()))
        })?;
        scene.validate()?;
        Ok(scene)
    }
}
