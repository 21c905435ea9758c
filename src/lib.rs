//! Motionset turns recorded driving scenes into agent-centric training
//! examples for motion prediction.
//!
//! Given a directory of scene files and a line-oriented scene tag file,
//! the dataset produces, per prediction request, a ground-truth future
//! trajectory in the requested agent's frame plus the feature maps an
//! external rasterizer renders for that frame.
//!
//! # Pipeline overview
//!
//! 1. **Index**: scene paths + tag file -> filtered path list (scene-level
//!    predicate, order preserved)
//! 2. **Shard**: filtered list -> disjoint per-worker slices, computed
//!    once and exactly partitioning the list
//! 3. **Iterate**: per scene, per request: validate -> agent frame
//!    ([`Transform2D`]) -> transform ground truth -> external
//!    [`FeatureProducer`] -> [`RenderedExample`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: filtering, sharding, and iteration
//!   order are pure functions of the inputs.
//! - **Streaming**: one decoded scene in memory at a time; abandoning an
//!   iterator early is safe.
//! - **Config errors fail construction**: a [`RendererConfig`] that
//!   validates never fails at iteration time.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dataset;
mod filter;
mod foundation;
mod render;
mod scene;
mod transform;

pub use dataset::dataset::{
    ExampleIter, MotionDataset, MotionDatasetBuilder, RenderedExample, scene_file_paths,
};
pub use dataset::parallel::collect_examples_parallel;
pub use dataset::shard::{WorkerInfo, shard_range};
pub use dataset::validate::{ground_truth_trajectory, request_is_valid};
pub use filter::index::filter_scene_paths;
pub use filter::predicate::{AcceptAll, SceneTagsFilter, TrajectoryTagsFilter};
pub use foundation::core::{
    Affine, MAX_HISTORY_OFFSET, NUM_FUTURE_STEPS, NUM_HISTORY_STEPS, Point, TrackId, Vec2,
};
pub use foundation::error::{MotionsetError, MotionsetResult};
pub use render::config::{
    FeatureMapParams, PedestrianLayer, Renderer, RendererConfig, RendererGroup, RoadGraphLayer,
    TimeGridParams, VehicleLayer,
};
pub use render::producer::{
    FeatureMap, FeatureProducer, GROUND_TRUTH_TRAJECTORY_KEY,
};
pub use scene::decode::{JsonSceneDecoder, SceneDecoder};
pub use scene::model::{
    AgentKind, PredictionRequest, RoadGraph, Scene, Track, TrackState,
};
pub use scene::tags::{
    DayTime, Precipitation, SceneTags, Season, SunPhase, TrackLocation, TrajectoryTag,
};
pub use transform::frame::Transform2D;
