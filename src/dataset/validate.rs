//! Per-request eligibility checks and ground-truth extraction.

use crate::{
    foundation::core::{Point, TrackId},
    scene::model::{PredictionRequest, Scene},
};

/// Whether a prediction request can yield an example.
///
/// A request is valid iff the referenced track exists, the track is
/// present at prediction time, and it has at least one present future
/// state. Invalid requests are routine data sparsity, not errors; the
/// dataset driver skips them silently.
pub fn request_is_valid(scene: &Scene, request: &PredictionRequest) -> bool {
    let Some(track) = scene.track(request.track_id) else {
        return false;
    };
    let Some(state) = scene.prediction_state(track) else {
        return false;
    };
    if !state.present {
        return false;
    }
    scene.future_states(track).iter().any(|s| s.present)
}

/// Ground-truth future trajectory of a track: positions of its present
/// future states, in time order. Empty when the track is unknown or has
/// no present future state.
pub fn ground_truth_trajectory(scene: &Scene, track_id: TrackId) -> Vec<Point> {
    let Some(track) = scene.track(track_id) else {
        return Vec::new();
    };
    scene
        .future_states(track)
        .iter()
        .filter(|s| s.present)
        .map(|s| s.position)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/validate.rs"]
mod tests;
