use std::collections::BTreeSet;

use crate::{
    foundation::core::{Point, TrackId, Vec2},
    foundation::error::{MotionsetError, MotionsetResult},
    scene::tags::{SceneTags, TrajectoryTag},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One recorded time-window of traffic.
///
/// A scene is a pure data model: agent tracks over a fixed
/// historical+future window, static road-graph geometry, and the
/// prediction requests designated for this scene. Scenes are decoded
/// read-only (see [`crate::SceneDecoder`]) and live for one iteration
/// step of the dataset driver.
pub struct Scene {
    /// Scene identifier for diagnostics.
    pub id: String,
    /// History states per track, including the prediction-time state.
    pub num_history_steps: usize,
    /// Future states per track.
    pub num_future_steps: usize,
    /// Agent tracks recorded in this scene.
    pub tracks: Vec<Track>,
    /// Static road-graph geometry.
    #[serde(default)]
    pub road_graph: RoadGraph,
    /// Requests designated for prediction, in file order.
    pub prediction_requests: Vec<PredictionRequest>,
    /// Scene-level metadata tags, when embedded in the scene file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<SceneTags>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One agent's per-timestamp state sequence within a scene.
pub struct Track {
    /// Stable per-scene track id.
    pub id: TrackId,
    /// Agent class of this track.
    pub kind: AgentKind,
    /// States across the scene window, oldest first. Index
    /// `num_history_steps - 1` is prediction time; later indices are
    /// future states.
    pub states: Vec<TrackState>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Agent class of a track.
pub enum AgentKind {
    /// Vehicle track.
    Vehicle,
    /// Pedestrian track.
    Pedestrian,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Agent state at one timestamp.
pub struct TrackState {
    /// World-frame position.
    pub position: Point,
    /// World-frame heading in radians.
    pub yaw: f64,
    /// World-frame velocity.
    pub velocity: Vec2,
    /// Existence flag; a track may be unobserved at some timestamps.
    pub present: bool,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Static road-graph geometry, in world frame.
pub struct RoadGraph {
    /// Lane centerlines as point sequences.
    #[serde(default)]
    pub lanes: Vec<Vec<Point>>,
    /// Crosswalk outlines as closed point sequences.
    #[serde(default)]
    pub crosswalks: Vec<Vec<Point>>,
    /// Road surface polygons as closed point sequences.
    #[serde(default)]
    pub road_polygons: Vec<Vec<Point>>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A (track, future-trajectory-tags) pair designated for prediction.
pub struct PredictionRequest {
    /// Referenced track id.
    pub track_id: TrackId,
    /// Semantic labels describing the agent's future motion pattern.
    #[serde(default)]
    pub trajectory_tags: Vec<TrajectoryTag>,
}

impl PredictionRequest {
    /// Trajectory tags of this request as a deduplicated set.
    pub fn tag_set(&self) -> BTreeSet<TrajectoryTag> {
        self.trajectory_tags.iter().copied().collect()
    }
}

impl Scene {
    /// Index of the prediction-time state within each track.
    pub fn prediction_index(&self) -> usize {
        self.num_history_steps.saturating_sub(1)
    }

    /// Look up a track by id.
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// State of `track` at prediction time.
    pub fn prediction_state<'a>(&self, track: &'a Track) -> Option<&'a TrackState> {
        track.states.get(self.prediction_index())
    }

    /// State of `track` at `offset` timestamps into the past; offset 0 is
    /// prediction time.
    pub fn state_at_past_offset<'a>(
        &self,
        track: &'a Track,
        offset: usize,
    ) -> Option<&'a TrackState> {
        let idx = self.prediction_index().checked_sub(offset)?;
        track.states.get(idx)
    }

    /// Future states of `track` (everything after prediction time), in
    /// time order.
    pub fn future_states<'a>(&self, track: &'a Track) -> &'a [TrackState] {
        let start = self.num_history_steps.min(track.states.len());
        &track.states[start..]
    }

    /// Validate scene window invariants.
    pub fn validate(&self) -> MotionsetResult<()> {
        if self.num_history_steps == 0 {
            return Err(MotionsetError::corrupt_scene(format!(
                "scene '{}' has num_history_steps == 0",
                self.id
            )));
        }
        let window = self.num_history_steps + self.num_future_steps;
        for track in &self.tracks {
            if track.states.len() != window {
                return Err(MotionsetError::corrupt_scene(format!(
                    "scene '{}' track {} has {} states for a {}-step window",
                    self.id,
                    track.id.0,
                    track.states.len(),
                    window
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
