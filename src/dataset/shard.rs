use std::ops::Range;

use crate::foundation::error::{MotionsetError, MotionsetResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Identity of one parallel data-loading worker.
pub struct WorkerInfo {
    /// Zero-based worker index.
    pub worker_id: usize,
    /// Total worker count.
    pub num_workers: usize,
}

impl WorkerInfo {
    /// Validated worker identity; `worker_id` must be below `num_workers`.
    pub fn new(worker_id: usize, num_workers: usize) -> MotionsetResult<Self> {
        if num_workers == 0 {
            return Err(MotionsetError::config("num_workers must be >= 1"));
        }
        if worker_id >= num_workers {
            return Err(MotionsetError::config(format!(
                "worker_id {worker_id} must be < num_workers {num_workers}"
            )));
        }
        Ok(Self {
            worker_id,
            num_workers,
        })
    }

    /// The single worker of a non-parallel context; owns the full list.
    pub fn single() -> Self {
        Self {
            worker_id: 0,
            num_workers: 1,
        }
    }
}

/// Index range of the scenes assigned to `worker` out of `num_scenes`.
///
/// With `chunk = num_scenes / num_workers`, worker `w` receives
/// `[w*chunk, (w+1)*chunk)` and the last worker absorbs the remainder, so
/// the shards partition the scene list exactly: no overlap, no gap. When
/// there are more workers than scenes (`chunk == 0`), worker `w` receives
/// scene `w` if it exists and an empty shard otherwise.
pub fn shard_range(num_scenes: usize, worker: WorkerInfo) -> Range<usize> {
    let chunk = num_scenes / worker.num_workers;
    if chunk == 0 {
        return worker.worker_id.min(num_scenes)..(worker.worker_id + 1).min(num_scenes);
    }
    let start = worker.worker_id * chunk;
    let end = if worker.worker_id == worker.num_workers - 1 {
        num_scenes
    } else {
        start + chunk
    };
    start..end
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/shard.rs"]
mod tests;
