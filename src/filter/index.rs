use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    filter::predicate::SceneTagsFilter,
    foundation::error::{MotionsetError, MotionsetResult},
    scene::tags::SceneTags,
};

/// Filter an ordered scene path list through a line-oriented tag file.
///
/// Line `i` of the tag file holds the JSON tag record for `paths[i]`. The
/// returned subsequence keeps the paths whose record satisfies `filter`,
/// in their original relative order. Any record that fails to parse, and
/// any record-count/path-count mismatch, fails the whole operation with
/// [`MotionsetError::MalformedTagRecord`]; no partial list is produced.
#[tracing::instrument(skip_all, fields(tags_file = %scene_tags_path.display()))]
pub fn filter_scene_paths(
    paths: &[PathBuf],
    scene_tags_path: &Path,
    filter: &dyn SceneTagsFilter,
) -> MotionsetResult<Vec<PathBuf>> {
    let file = std::fs::File::open(scene_tags_path)
        .with_context(|| format!("opening scene tags file {}", scene_tags_path.display()))?;
    let reader = std::io::BufReader::new(file);

    let mut accepted_indices = Vec::new();
    let mut total = 0usize;
    for (i, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("reading scene tags file {}", scene_tags_path.display()))?;
        total += 1;
        let tags: SceneTags = serde_json::from_str(line.trim()).map_err(|e| {
            MotionsetError::malformed_tag_record(format!("line {}: {e}", i + 1))
        })?;
        if filter.accept(&tags)? {
            accepted_indices.push(i);
        }
    }

    if total != paths.len() {
        return Err(MotionsetError::malformed_tag_record(format!(
            "tag file has {} records for {} scene paths",
            total,
            paths.len()
        )));
    }

    tracing::info!(
        accepted = accepted_indices.len(),
        total,
        "{}/{} scenes fit the filter criteria",
        accepted_indices.len(),
        total
    );

    Ok(accepted_indices.iter().map(|&i| paths[i].clone()).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/filter/index.rs"]
mod tests;
