use std::collections::BTreeMap;

use crate::{
    foundation::error::{MotionsetError, MotionsetResult},
    render::config::RendererConfig,
    scene::model::Scene,
    transform::frame::Transform2D,
};

/// Output key reserved for the ground-truth trajectory. Feature producers
/// must not emit it.
pub const GROUND_TRUTH_TRAJECTORY_KEY: &str = "ground_truth_trajectory";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Dense channels x rows x cols tensor of rendered features, row-major
/// within each channel.
pub struct FeatureMap {
    channels: usize,
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl FeatureMap {
    /// Zero-filled feature map of the given shape.
    pub fn zeros(channels: usize, rows: usize, cols: usize) -> Self {
        Self {
            channels,
            rows,
            cols,
            data: vec![0.0; channels * rows * cols],
        }
    }

    /// Feature map over existing data; fails when `data` does not match
    /// the shape.
    pub fn from_data(
        channels: usize,
        rows: usize,
        cols: usize,
        data: Vec<f32>,
    ) -> MotionsetResult<Self> {
        if data.len() != channels * rows * cols {
            return Err(MotionsetError::producer(format!(
                "feature map data has {} values for shape {}x{}x{}",
                data.len(),
                channels,
                rows,
                cols
            )));
        }
        Ok(Self {
            channels,
            rows,
            cols,
            data,
        })
    }

    /// Channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Rows per channel.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Columns per channel.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at (channel, row, col).
    pub fn get(&self, channel: usize, row: usize, col: usize) -> f32 {
        self.data[self.index(channel, row, col)]
    }

    /// Overwrite the value at (channel, row, col).
    pub fn set(&mut self, channel: usize, row: usize, col: usize, value: f32) {
        let i = self.index(channel, row, col);
        self.data[i] = value;
    }

    /// Flat tensor payload, channel-major then row-major.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    fn index(&self, channel: usize, row: usize, col: usize) -> usize {
        assert!(channel < self.channels && row < self.rows && col < self.cols);
        (channel * self.rows + row) * self.cols + col
    }
}

/// External rasterization capability.
///
/// The dataset core hands the producer one decoded scene and the transform
/// into the requested agent's frame; the producer returns named feature
/// tensors rendered per its [`RendererConfig`]. The config is validated at
/// dataset construction, so `produce_features` never sees an invalid one.
pub trait FeatureProducer {
    /// The declarative configuration this producer renders.
    fn config(&self) -> &RendererConfig;

    /// Render feature maps for `scene` in the agent frame given by
    /// `to_agent_frame`.
    fn produce_features(
        &self,
        scene: &Scene,
        to_agent_frame: &Transform2D,
    ) -> MotionsetResult<BTreeMap<String, FeatureMap>>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/producer.rs"]
mod tests;
