use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::{
    dataset::shard::{WorkerInfo, shard_range},
    dataset::validate::{ground_truth_trajectory, request_is_valid},
    filter::index::filter_scene_paths,
    filter::predicate::{AcceptAll, SceneTagsFilter, TrajectoryTagsFilter},
    foundation::core::Point,
    foundation::error::{MotionsetError, MotionsetResult},
    render::producer::{FeatureMap, FeatureProducer, GROUND_TRUTH_TRAJECTORY_KEY},
    scene::decode::{JsonSceneDecoder, SceneDecoder},
    scene::model::Scene,
    transform::frame::Transform2D,
};

#[derive(Clone, Debug)]
/// One agent-centric training example.
pub struct RenderedExample {
    /// Ground-truth future trajectory of the requested agent; in the agent
    /// frame unless the dataset was built to keep world-frame ground
    /// truth.
    pub ground_truth_trajectory: Vec<Point>,
    /// Feature maps rendered by the external producer, keyed by name.
    pub feature_maps: BTreeMap<String, FeatureMap>,
}

/// List the scene files of a dataset directory, sorted by file name.
pub fn scene_file_paths(dataset_path: &Path) -> MotionsetResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dataset_path)
        .with_context(|| format!("listing dataset directory {}", dataset_path.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("listing dataset directory {}", dataset_path.display()))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Streaming source of agent-centric training examples.
///
/// A dataset owns the tag-filtered scene path list for its lifetime and
/// hands out restartable lazy iterators over it, whole or sharded per
/// worker. Scenes are decoded one at a time during iteration; each yielded
/// example is fully materialized and owned by the caller.
pub struct MotionDataset {
    scene_paths: Vec<PathBuf>,
    decoder: Arc<dyn SceneDecoder + Send + Sync>,
    producer: Arc<dyn FeatureProducer + Send + Sync>,
    trajectory_tags_filter: Arc<dyn TrajectoryTagsFilter + Send + Sync>,
    transform_ground_truth: bool,
}

/// Builder for [`MotionDataset`].
pub struct MotionDatasetBuilder {
    dataset_path: Option<PathBuf>,
    scene_tags_path: Option<PathBuf>,
    pre_filtered_scene_paths: Option<Vec<PathBuf>>,
    scene_tags_filter: Box<dyn SceneTagsFilter + Send + Sync>,
    trajectory_tags_filter: Arc<dyn TrajectoryTagsFilter + Send + Sync>,
    decoder: Arc<dyn SceneDecoder + Send + Sync>,
    producer: Arc<dyn FeatureProducer + Send + Sync>,
    transform_ground_truth: bool,
}

impl MotionDataset {
    /// Start building a dataset around a feature producer.
    pub fn builder(producer: Arc<dyn FeatureProducer + Send + Sync>) -> MotionDatasetBuilder {
        MotionDatasetBuilder {
            dataset_path: None,
            scene_tags_path: None,
            pre_filtered_scene_paths: None,
            scene_tags_filter: Box::new(AcceptAll),
            trajectory_tags_filter: Arc::new(AcceptAll),
            decoder: Arc::new(JsonSceneDecoder),
            producer,
            transform_ground_truth: true,
        }
    }

    /// Number of scenes after tag filtering.
    pub fn num_scenes(&self) -> usize {
        self.scene_paths.len()
    }

    /// The filtered scene path list, in iteration order.
    pub fn scene_paths(&self) -> &[PathBuf] {
        &self.scene_paths
    }

    /// Lazy examples over the full scene list.
    pub fn examples(&self) -> ExampleIter<'_> {
        self.worker_examples(WorkerInfo::single())
    }

    /// Lazy examples over one worker's shard.
    pub fn worker_examples(&self, worker: WorkerInfo) -> ExampleIter<'_> {
        let range = shard_range(self.scene_paths.len(), worker);
        ExampleIter {
            dataset: self,
            paths: &self.scene_paths[range],
            next_path: 0,
            current: None,
            failed: false,
        }
    }
}

impl std::fmt::Debug for MotionDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionDataset")
            .field("scene_paths", &self.scene_paths)
            .field("transform_ground_truth", &self.transform_ground_truth)
            .finish_non_exhaustive()
    }
}

impl MotionDatasetBuilder {
    /// Directory holding one scene file per scene.
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    /// Line-oriented tag file aligned with the dataset directory listing.
    pub fn scene_tags_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.scene_tags_path = Some(path.into());
        self
    }

    /// Scene-level inclusion predicate; default accepts all scenes.
    pub fn scene_tags_filter(
        mut self,
        filter: impl SceneTagsFilter + Send + Sync + 'static,
    ) -> Self {
        self.scene_tags_filter = Box::new(filter);
        self
    }

    /// Request-level inclusion predicate; default accepts all requests.
    pub fn trajectory_tags_filter(
        mut self,
        filter: impl TrajectoryTagsFilter + Send + Sync + 'static,
    ) -> Self {
        self.trajectory_tags_filter = Arc::new(filter);
        self
    }

    /// Bypass tag indexing with a pre-computed path list. Iteration is
    /// bit-identical to a tag-filtered dataset over the same effective
    /// list.
    pub fn pre_filtered_scene_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.pre_filtered_scene_paths = Some(paths);
        self
    }

    /// Scene decoder; defaults to [`JsonSceneDecoder`].
    pub fn decoder(mut self, decoder: impl SceneDecoder + Send + Sync + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    /// Keep ground-truth trajectories in world frame instead of
    /// transforming them into the agent frame.
    pub fn keep_world_frame_ground_truth(mut self) -> Self {
        self.transform_ground_truth = false;
        self
    }

    /// Build and validate the dataset.
    ///
    /// Validates the producer's renderer configuration (config errors are
    /// fatal here, never at iteration time) and resolves the scene path
    /// list, running the tag index unless a pre-filtered list was given.
    pub fn build(self) -> MotionsetResult<MotionDataset> {
        self.producer.config().validate()?;

        let scene_paths = match self.pre_filtered_scene_paths {
            Some(paths) => {
                tracing::info!(
                    num_scenes = paths.len(),
                    "building dataset from pre-filtered scene paths"
                );
                paths
            }
            None => {
                let dataset_path = self.dataset_path.ok_or_else(|| {
                    MotionsetError::config(
                        "dataset_path is required unless pre-filtered scene paths are given",
                    )
                })?;
                let tags_path = self.scene_tags_path.ok_or_else(|| {
                    MotionsetError::config(
                        "scene_tags_file is required unless pre-filtered scene paths are given",
                    )
                })?;
                let all_paths = scene_file_paths(&dataset_path)?;
                filter_scene_paths(&all_paths, &tags_path, self.scene_tags_filter.as_ref())?
            }
        };

        Ok(MotionDataset {
            scene_paths,
            decoder: self.decoder,
            producer: self.producer,
            trajectory_tags_filter: self.trajectory_tags_filter,
            transform_ground_truth: self.transform_ground_truth,
        })
    }
}

/// Restartable, forward-only example sequence over one shard.
///
/// Holds at most one decoded scene at a time. Yields `Err` once on the
/// first corrupt scene, failed predicate, or producer failure, then fuses;
/// abandoning it early is always safe.
pub struct ExampleIter<'a> {
    dataset: &'a MotionDataset,
    paths: &'a [PathBuf],
    next_path: usize,
    current: Option<(Scene, usize)>,
    failed: bool,
}

impl ExampleIter<'_> {
    fn next_in_current_scene(&mut self) -> Option<MotionsetResult<RenderedExample>> {
        let (scene, next_request) = self.current.as_mut()?;
        while *next_request < scene.prediction_requests.len() {
            let request = &scene.prediction_requests[*next_request];
            *next_request += 1;

            if !request_is_valid(scene, request) {
                continue;
            }
            match self.dataset.trajectory_tags_filter.accept(&request.tag_set()) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => return Some(Err(e)),
            }

            // Both lookups are covered by request_is_valid above.
            let Some(track) = scene.track(request.track_id) else {
                continue;
            };
            let Some(state) = scene.prediction_state(track) else {
                continue;
            };
            let to_agent_frame = Transform2D::agent_frame_for_state(state);

            let mut trajectory = ground_truth_trajectory(scene, request.track_id);
            if self.dataset.transform_ground_truth {
                trajectory = to_agent_frame.apply_points(&trajectory);
            }

            let feature_maps = match self
                .dataset
                .producer
                .produce_features(scene, &to_agent_frame)
            {
                Ok(maps) => maps,
                Err(e) => return Some(Err(e)),
            };
            if feature_maps.contains_key(GROUND_TRUTH_TRAJECTORY_KEY) {
                return Some(Err(MotionsetError::producer(format!(
                    "producer emitted reserved key '{GROUND_TRUTH_TRAJECTORY_KEY}'"
                ))));
            }

            return Some(Ok(RenderedExample {
                ground_truth_trajectory: trajectory,
                feature_maps,
            }));
        }
        None
    }
}

impl Iterator for ExampleIter<'_> {
    type Item = MotionsetResult<RenderedExample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if self.current.is_some() {
                match self.next_in_current_scene() {
                    Some(result) => {
                        if result.is_err() {
                            self.failed = true;
                        }
                        return Some(result);
                    }
                    None => self.current = None,
                }
            }

            if self.next_path >= self.paths.len() {
                return None;
            }
            let path = &self.paths[self.next_path];
            self.next_path += 1;
            match self.dataset.decoder.decode(path) {
                Ok(scene) => self.current = Some((scene, 0)),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/dataset.rs"]
mod tests;
