use crate::{
    foundation::core::MAX_HISTORY_OFFSET,
    foundation::error::{MotionsetError, MotionsetResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Declarative specification of the feature maps to render.
///
/// A configuration is pure data consumed by an external rasterizer (see
/// [`crate::FeatureProducer`]); this crate owns its validation and channel
/// accounting only. Channels of distinct renderer groups are concatenated
/// in configuration order (group, then timestamp, then renderer, then
/// layer); that ordering is a compatibility contract consumers may depend
/// on and is never reordered.
pub struct RendererConfig {
    /// Geometry of the rendered feature maps.
    pub feature_map_params: FeatureMapParams,
    /// Renderer groups, each with its own temporal sampling grid.
    ///
    /// Separate groups allow rendering feature maps with different history
    /// depths, e.g. static road-graph layers once at prediction time while
    /// agent layers cover several past timestamps.
    pub renderer_groups: Vec<RendererGroup>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Geometry of rendered feature maps.
pub struct FeatureMapParams {
    /// Rows per channel.
    pub rows: u32,
    /// Columns per channel.
    pub cols: u32,
    /// Meters covered by one pixel.
    pub resolution: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A temporal sampling grid paired with the semantic layers to rasterize.
pub struct RendererGroup {
    /// Which past timestamps this group renders.
    pub time_grid_params: TimeGridParams,
    /// Entity-class renderers, each with an ordered set of layers.
    pub renderers: Vec<Renderer>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Temporal sampling grid over past timestamps.
///
/// Offsets count timestamps into the past; 0 is prediction time. The
/// realized set is `{start, start+step, ...}` intersected with
/// `[start, stop]`.
pub struct TimeGridParams {
    /// First timestamp into the past to render.
    pub start: u32,
    /// Last timestamp to render, inclusive.
    pub stop: u32,
    /// Grid step; 1 renders every timestamp between start and stop.
    pub step: u32,
}

impl TimeGridParams {
    /// Validate grid invariants: `start <= stop <= MAX_HISTORY_OFFSET` and
    /// `step >= 1`.
    pub fn validate(&self) -> MotionsetResult<()> {
        if self.start > self.stop {
            return Err(MotionsetError::config(format!(
                "time grid start {} exceeds stop {}",
                self.start, self.stop
            )));
        }
        if self.stop > MAX_HISTORY_OFFSET {
            return Err(MotionsetError::config(format!(
                "time grid stop {} exceeds max history offset {}",
                self.stop, MAX_HISTORY_OFFSET
            )));
        }
        if self.step == 0 {
            return Err(MotionsetError::config("time grid step must be >= 1"));
        }
        Ok(())
    }

    /// The concrete past offsets this grid realizes, in increasing order.
    pub fn realized_timestamps(&self) -> Vec<u32> {
        let step = self.step.max(1) as usize;
        (self.start..=self.stop).step_by(step).collect()
    }

    /// Number of realized offsets.
    pub fn num_timestamps(&self) -> usize {
        self.realized_timestamps().len()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An entity-class renderer with its ordered layer set.
///
/// Layer permissions are encoded in the type: each entity class carries
/// its own layer enum, so a config naming e.g. a pedestrian `yaw` layer
/// fails at parse time instead of at rasterization time.
pub enum Renderer {
    /// Vehicle-track layers.
    #[serde(rename = "vehicles")]
    Vehicles(Vec<VehicleLayer>),
    /// Pedestrian-track layers.
    #[serde(rename = "pedestrians")]
    Pedestrians(Vec<PedestrianLayer>),
    /// Static road-graph layers.
    #[serde(rename = "road_graph")]
    RoadGraph(Vec<RoadGraphLayer>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Semantic layer rendered from vehicle tracks.
pub enum VehicleLayer {
    /// Occupancy mask, 1 channel.
    Occupancy,
    /// Velocity field, 2 channels (x, y).
    Velocity,
    /// Acceleration field, 2 channels (x, y).
    Acceleration,
    /// Heading field, 1 channel.
    Yaw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Semantic layer rendered from pedestrian tracks.
pub enum PedestrianLayer {
    /// Occupancy mask, 1 channel.
    Occupancy,
    /// Velocity field, 2 channels (x, y).
    Velocity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Semantic layer rendered from the road graph. Each is 1 channel.
pub enum RoadGraphLayer {
    /// Crosswalk occupancy mask.
    CrosswalkOccupancy,
    /// Crosswalk availability mask.
    CrosswalkAvailability,
    /// Lane availability mask.
    LaneAvailability,
    /// Lane direction field.
    LaneDirection,
    /// Lane occupancy mask.
    LaneOccupancy,
    /// Lane priority field.
    LanePriority,
    /// Lane speed limit field.
    LaneSpeedLimit,
    /// Road surface polygons mask.
    RoadPolygons,
}

impl VehicleLayer {
    /// Output channels this layer expands to.
    pub fn channels(self) -> u32 {
        match self {
            Self::Occupancy | Self::Yaw => 1,
            Self::Velocity | Self::Acceleration => 2,
        }
    }
}

impl PedestrianLayer {
    /// Output channels this layer expands to.
    pub fn channels(self) -> u32 {
        match self {
            Self::Occupancy => 1,
            Self::Velocity => 2,
        }
    }
}

impl RoadGraphLayer {
    /// Output channels this layer expands to.
    pub fn channels(self) -> u32 {
        1
    }
}

impl Renderer {
    /// Entity-class name of this renderer.
    pub fn entity_class(&self) -> &'static str {
        match self {
            Self::Vehicles(_) => "vehicles",
            Self::Pedestrians(_) => "pedestrians",
            Self::RoadGraph(_) => "road_graph",
        }
    }

    /// Channels across this renderer's layers, at one timestamp.
    pub fn layer_channels(&self) -> u32 {
        match self {
            Self::Vehicles(layers) => layers.iter().map(|l| l.channels()).sum(),
            Self::Pedestrians(layers) => layers.iter().map(|l| l.channels()).sum(),
            Self::RoadGraph(layers) => layers.iter().map(|l| l.channels()).sum(),
        }
    }

    /// Validate the layer list: non-empty, no duplicates.
    pub fn validate(&self) -> MotionsetResult<()> {
        fn check<L: Copy + PartialEq + std::fmt::Debug>(
            class: &str,
            layers: &[L],
        ) -> MotionsetResult<()> {
            if layers.is_empty() {
                return Err(MotionsetError::config(format!(
                    "{class} renderer has no layers"
                )));
            }
            for (i, layer) in layers.iter().enumerate() {
                if layers[..i].contains(layer) {
                    return Err(MotionsetError::config(format!(
                        "{class} renderer lists layer {layer:?} twice"
                    )));
                }
            }
            Ok(())
        }

        match self {
            Self::Vehicles(layers) => check(self.entity_class(), layers),
            Self::Pedestrians(layers) => check(self.entity_class(), layers),
            Self::RoadGraph(layers) => check(self.entity_class(), layers),
        }
    }
}

impl RendererGroup {
    /// Output channels of this group: realized timestamps times the
    /// per-timestamp layer channels, concatenated in renderer order.
    pub fn num_channels(&self) -> usize {
        let per_timestamp: u32 = self.renderers.iter().map(|r| r.layer_channels()).sum();
        self.time_grid_params.num_timestamps() * per_timestamp as usize
    }

    /// Validate the group's grid and renderers.
    pub fn validate(&self) -> MotionsetResult<()> {
        self.time_grid_params.validate()?;
        if self.renderers.is_empty() {
            return Err(MotionsetError::config("renderer group has no renderers"));
        }
        for renderer in &self.renderers {
            renderer.validate()?;
        }
        Ok(())
    }
}

impl FeatureMapParams {
    /// Validate map geometry: positive dimensions, finite positive
    /// resolution.
    pub fn validate(&self) -> MotionsetResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MotionsetError::config(
                "feature map rows/cols must be > 0",
            ));
        }
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(MotionsetError::config(
                "feature map resolution must be finite and > 0",
            ));
        }
        Ok(())
    }
}

impl RendererConfig {
    /// Validate the whole configuration. Structural and input-independent;
    /// a config that validates here never fails at iteration time.
    pub fn validate(&self) -> MotionsetResult<()> {
        self.feature_map_params.validate()?;
        if self.renderer_groups.is_empty() {
            return Err(MotionsetError::config("config has no renderer groups"));
        }
        for group in &self.renderer_groups {
            group.validate()?;
        }
        Ok(())
    }

    /// Total output channels across all groups, in concatenation order.
    pub fn total_channels(&self) -> usize {
        self.renderer_groups.iter().map(|g| g.num_channels()).sum()
    }

    /// Deepest past offset any group realizes. Informs how much history a
    /// request needs when callers choose to enforce it.
    pub fn max_history_offset(&self) -> Option<u32> {
        self.renderer_groups
            .iter()
            .flat_map(|g| g.time_grid_params.realized_timestamps())
            .max()
    }

    /// The reference configuration of the source dataset: vehicle and
    /// pedestrian layers plus all road-graph layers, all at prediction
    /// time, on a 400x400 grid at 0.25 m/px.
    pub fn shift_baseline() -> Self {
        let at_prediction_time = TimeGridParams {
            start: 0,
            stop: 0,
            step: 1,
        };
        Self {
            feature_map_params: FeatureMapParams {
                rows: 400,
                cols: 400,
                resolution: 0.25,
            },
            renderer_groups: vec![
                RendererGroup {
                    time_grid_params: at_prediction_time,
                    renderers: vec![
                        Renderer::Vehicles(vec![
                            VehicleLayer::Occupancy,
                            VehicleLayer::Velocity,
                            VehicleLayer::Acceleration,
                            VehicleLayer::Yaw,
                        ]),
                        Renderer::Pedestrians(vec![
                            PedestrianLayer::Occupancy,
                            PedestrianLayer::Velocity,
                        ]),
                    ],
                },
                RendererGroup {
                    time_grid_params: at_prediction_time,
                    renderers: vec![Renderer::RoadGraph(vec![
                        RoadGraphLayer::CrosswalkOccupancy,
                        RoadGraphLayer::CrosswalkAvailability,
                        RoadGraphLayer::LaneAvailability,
                        RoadGraphLayer::LaneDirection,
                        RoadGraphLayer::LaneOccupancy,
                        RoadGraphLayer::LanePriority,
                        RoadGraphLayer::LaneSpeedLimit,
                        RoadGraphLayer::RoadPolygons,
                    ])],
                },
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
