use super::*;

use crate::foundation::core::{TrackId, Vec2};
use crate::render::config::{
    FeatureMapParams, Renderer, RendererConfig, RendererGroup, TimeGridParams, VehicleLayer,
};
use crate::scene::model::{AgentKind, PredictionRequest, RoadGraph, Track, TrackState};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "motionset_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn small_config() -> RendererConfig {
    RendererConfig {
        feature_map_params: FeatureMapParams {
            rows: 2,
            cols: 2,
            resolution: 1.0,
        },
        renderer_groups: vec![RendererGroup {
            time_grid_params: TimeGridParams {
                start: 0,
                stop: 0,
                step: 1,
            },
            renderers: vec![Renderer::Vehicles(vec![VehicleLayer::Occupancy])],
        }],
    }
}

struct StubProducer {
    config: RendererConfig,
    reserved_key: bool,
}

impl StubProducer {
    fn new() -> Self {
        Self {
            config: small_config(),
            reserved_key: false,
        }
    }
}

impl FeatureProducer for StubProducer {
    fn config(&self) -> &RendererConfig {
        &self.config
    }

    fn produce_features(
        &self,
        _scene: &Scene,
        _to_agent_frame: &Transform2D,
    ) -> MotionsetResult<BTreeMap<String, FeatureMap>> {
        let key = if self.reserved_key {
            GROUND_TRUTH_TRAJECTORY_KEY.to_string()
        } else {
            "feature_maps".to_string()
        };
        Ok(BTreeMap::from([(key, FeatureMap::zeros(1, 2, 2))]))
    }
}

fn state(x: f64, y: f64, yaw: f64, present: bool) -> TrackState {
    TrackState {
        position: Point::new(x, y),
        yaw,
        velocity: Vec2::new(0.0, 0.0),
        present,
    }
}

/// One-history, two-future scene with one track driving along +y.
fn simple_scene(id: &str) -> Scene {
    Scene {
        id: id.to_string(),
        num_history_steps: 1,
        num_future_steps: 2,
        tracks: vec![Track {
            id: TrackId(0),
            kind: AgentKind::Vehicle,
            states: vec![
                state(10.0, 20.0, std::f64::consts::FRAC_PI_2, true),
                state(10.0, 21.0, std::f64::consts::FRAC_PI_2, true),
                state(10.0, 22.0, std::f64::consts::FRAC_PI_2, true),
            ],
        }],
        road_graph: RoadGraph::default(),
        prediction_requests: vec![PredictionRequest {
            track_id: TrackId(0),
            trajectory_tags: vec![crate::scene::tags::TrajectoryTag::MoveForward],
        }],
        tags: None,
    }
}

fn write_scene(dir: &Path, name: &str, scene: &Scene) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(scene).unwrap()).unwrap();
    path
}

#[test]
fn invalid_config_fails_at_construction() {
    let producer = StubProducer {
        config: RendererConfig {
            feature_map_params: FeatureMapParams {
                rows: 0,
                cols: 2,
                resolution: 1.0,
            },
            renderer_groups: small_config().renderer_groups,
        },
        reserved_key: false,
    };
    let err = MotionDataset::builder(Arc::new(producer))
        .pre_filtered_scene_paths(vec![])
        .build()
        .unwrap_err();
    assert!(matches!(err, MotionsetError::Config(_)));
}

#[test]
fn missing_paths_fail_at_construction() {
    let err = MotionDataset::builder(Arc::new(StubProducer::new()))
        .build()
        .unwrap_err();
    assert!(matches!(err, MotionsetError::Config(_)));
}

#[test]
fn pre_filtered_paths_drive_iteration() {
    let tmp = temp_dir("dataset_pre_filtered");
    std::fs::create_dir_all(&tmp).unwrap();
    let a = write_scene(&tmp, "a.json", &simple_scene("a"));
    let b = write_scene(&tmp, "b.json", &simple_scene("b"));

    let dataset = MotionDataset::builder(Arc::new(StubProducer::new()))
        .pre_filtered_scene_paths(vec![a, b])
        .build()
        .unwrap();
    assert_eq!(dataset.num_scenes(), 2);

    let examples: Vec<_> = dataset.examples().collect::<MotionsetResult<_>>().unwrap();
    assert_eq!(examples.len(), 2);
    assert!(examples[0].feature_maps.contains_key("feature_maps"));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn ground_truth_lands_in_agent_frame_by_default() {
    let tmp = temp_dir("dataset_agent_frame");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = write_scene(&tmp, "a.json", &simple_scene("a"));

    let dataset = MotionDataset::builder(Arc::new(StubProducer::new()))
        .pre_filtered_scene_paths(vec![path])
        .build()
        .unwrap();
    let example = dataset.examples().next().unwrap().unwrap();
    // The agent drives +y in world frame; ahead becomes +x in its frame.
    let gt = &example.ground_truth_trajectory;
    assert_eq!(gt.len(), 2);
    assert!((gt[0].x - 1.0).abs() < 1e-9 && gt[0].y.abs() < 1e-9);
    assert!((gt[1].x - 2.0).abs() < 1e-9 && gt[1].y.abs() < 1e-9);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn world_frame_ground_truth_can_be_kept() {
    let tmp = temp_dir("dataset_world_frame");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = write_scene(&tmp, "a.json", &simple_scene("a"));

    let dataset = MotionDataset::builder(Arc::new(StubProducer::new()))
        .pre_filtered_scene_paths(vec![path])
        .keep_world_frame_ground_truth()
        .build()
        .unwrap();
    let example = dataset.examples().next().unwrap().unwrap();
    assert_eq!(example.ground_truth_trajectory[0], Point::new(10.0, 21.0));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn reserved_producer_key_errors_and_fuses() {
    let tmp = temp_dir("dataset_reserved_key");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = write_scene(&tmp, "a.json", &simple_scene("a"));

    let producer = StubProducer {
        config: small_config(),
        reserved_key: true,
    };
    let dataset = MotionDataset::builder(Arc::new(producer))
        .pre_filtered_scene_paths(vec![path])
        .build()
        .unwrap();
    let mut iter = dataset.examples();
    let err = iter.next().unwrap().unwrap_err();
    assert!(matches!(err, MotionsetError::Producer(_)));
    assert!(iter.next().is_none());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn corrupt_scene_aborts_iteration() {
    let tmp = temp_dir("dataset_corrupt");
    std::fs::create_dir_all(&tmp).unwrap();
    let good = write_scene(&tmp, "a.json", &simple_scene("a"));
    let bad = tmp.join("b.json");
    std::fs::write(&bad, b"not a scene").unwrap();

    let dataset = MotionDataset::builder(Arc::new(StubProducer::new()))
        .pre_filtered_scene_paths(vec![bad, good])
        .build()
        .unwrap();
    let mut iter = dataset.examples();
    let err = iter.next().unwrap().unwrap_err();
    assert!(matches!(err, MotionsetError::CorruptScene(_)));
    assert!(iter.next().is_none());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn trajectory_filter_skips_and_failures_abort() {
    let tmp = temp_dir("dataset_trajectory_filter");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = write_scene(&tmp, "a.json", &simple_scene("a"));

    let dataset = MotionDataset::builder(Arc::new(StubProducer::new()))
        .pre_filtered_scene_paths(vec![path.clone()])
        .trajectory_tags_filter(
            |tags: &std::collections::BTreeSet<crate::scene::tags::TrajectoryTag>| {
                tags.contains(&crate::scene::tags::TrajectoryTag::Stopping)
            },
        )
        .build()
        .unwrap();
    assert_eq!(dataset.examples().count(), 0);

    struct Failing;
    impl TrajectoryTagsFilter for Failing {
        fn accept(
            &self,
            _tags: &std::collections::BTreeSet<crate::scene::tags::TrajectoryTag>,
        ) -> MotionsetResult<bool> {
            Err(MotionsetError::predicate("boom"))
        }
    }
    let dataset = MotionDataset::builder(Arc::new(StubProducer::new()))
        .pre_filtered_scene_paths(vec![path])
        .trajectory_tags_filter(Failing)
        .build()
        .unwrap();
    let mut iter = dataset.examples();
    assert!(matches!(
        iter.next().unwrap().unwrap_err(),
        MotionsetError::Predicate(_)
    ));
    assert!(iter.next().is_none());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn examples_are_restartable() {
    let tmp = temp_dir("dataset_restartable");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = write_scene(&tmp, "a.json", &simple_scene("a"));

    let dataset = MotionDataset::builder(Arc::new(StubProducer::new()))
        .pre_filtered_scene_paths(vec![path])
        .build()
        .unwrap();
    assert_eq!(dataset.examples().count(), 1);
    assert_eq!(dataset.examples().count(), 1);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn scene_file_paths_sorts_by_name() {
    let tmp = temp_dir("dataset_listing");
    std::fs::create_dir_all(tmp.join("sub")).unwrap();
    std::fs::write(tmp.join("b.json"), b"{}").unwrap();
    std::fs::write(tmp.join("a.json"), b"{}").unwrap();
    std::fs::write(tmp.join("c.json"), b"{}").unwrap();

    let paths = scene_file_paths(&tmp).unwrap();
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.json", "b.json", "c.json"]);

    std::fs::remove_dir_all(&tmp).ok();
}
