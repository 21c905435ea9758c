use super::*;

use std::path::PathBuf;

use crate::filter::predicate::AcceptAll;
use crate::scene::tags::TrackLocation;

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

fn tag_line(track: &str) -> String {
    format!(
        r#"{{"day_time": "kMorning", "season": "kSummer", "track": "{track}",
           "sun_phase": "kDaylight", "precipitation": "kNoPrecipitation"}}"#
    )
    .replace('\n', " ")
}

fn write_tags(dir: &PathBuf, lines: &[String]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join("tags.txt");
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn scene_paths(n: usize) -> Vec<PathBuf> {
    (0..n).map(|i| PathBuf::from(format!("scene_{i:03}.pb"))).collect()
}

#[test]
fn accept_all_returns_full_list_unchanged() {
    let tmp = temp_dir("index_accept_all");
    let lines: Vec<String> = (0..4).map(|_| tag_line("Moscow")).collect();
    let tags_path = write_tags(&tmp, &lines);
    let paths = scene_paths(4);

    let out = filter_scene_paths(&paths, &tags_path, &AcceptAll).unwrap();
    assert_eq!(out, paths);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn predicate_selects_matching_subsequence_in_order() {
    let tmp = temp_dir("index_subsequence");
    let lines = vec![
        tag_line("Moscow"),
        tag_line("Innopolis"),
        tag_line("Moscow"),
        tag_line("AnnArbor"),
        tag_line("Moscow"),
    ];
    let tags_path = write_tags(&tmp, &lines);
    let paths = scene_paths(5);

    let filter = |tags: &SceneTags| tags.track == TrackLocation::Moscow;
    let out = filter_scene_paths(&paths, &tags_path, &filter).unwrap();
    assert_eq!(out, vec![paths[0].clone(), paths[2].clone(), paths[4].clone()]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn malformed_line_fails_whole_operation_with_line_number() {
    let tmp = temp_dir("index_malformed");
    let lines = vec![tag_line("Moscow"), "{not json".to_string(), tag_line("Moscow")];
    let tags_path = write_tags(&tmp, &lines);
    let paths = scene_paths(3);

    let err = filter_scene_paths(&paths, &tags_path, &AcceptAll).unwrap_err();
    assert!(matches!(err, MotionsetError::MalformedTagRecord(_)));
    assert!(err.to_string().contains("line 2"));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn record_count_mismatch_is_a_hard_error() {
    let tmp = temp_dir("index_mismatch");
    let lines = vec![tag_line("Moscow"), tag_line("Moscow")];
    let tags_path = write_tags(&tmp, &lines);
    let paths = scene_paths(3);

    let err = filter_scene_paths(&paths, &tags_path, &AcceptAll).unwrap_err();
    assert!(err.to_string().contains("2 records for 3 scene paths"));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn predicate_failure_propagates() {
    struct Failing;
    impl SceneTagsFilter for Failing {
        fn accept(&self, _tags: &SceneTags) -> MotionsetResult<bool> {
            Err(MotionsetError::predicate("unusable tags"))
        }
    }

    let tmp = temp_dir("index_predicate_failure");
    let tags_path = write_tags(&tmp, &[tag_line("Moscow")]);
    let paths = scene_paths(1);

    let err = filter_scene_paths(&paths, &tags_path, &Failing).unwrap_err();
    assert!(matches!(err, MotionsetError::Predicate(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_tag_file_surfaces_io_error() {
    let paths = scene_paths(1);
    let missing = temp_dir("index_missing").join("tags.txt");
    assert!(filter_scene_paths(&paths, &missing, &AcceptAll).is_err());
}
