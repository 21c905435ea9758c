use rayon::prelude::*;

use crate::{
    dataset::dataset::{MotionDataset, RenderedExample},
    dataset::shard::WorkerInfo,
    foundation::error::{MotionsetError, MotionsetResult},
};

/// Run every worker shard of `dataset` on a dedicated thread pool and
/// concatenate the results in worker order.
///
/// Output is identical to draining [`MotionDataset::examples`] over the
/// same path list: shards partition the scene list exactly and each worker
/// preserves scene-file order, then within-scene request order. The first
/// error from any worker is returned. `threads` of `None` uses rayon
/// defaults.
pub fn collect_examples_parallel(
    dataset: &MotionDataset,
    num_workers: usize,
    threads: Option<usize>,
) -> MotionsetResult<Vec<RenderedExample>> {
    if num_workers == 0 {
        return Err(MotionsetError::config("num_workers must be >= 1"));
    }
    let pool = build_thread_pool(threads)?;

    let per_worker: Vec<MotionsetResult<Vec<RenderedExample>>> = pool.install(|| {
        (0..num_workers)
            .into_par_iter()
            .map(|worker_id| {
                let worker = WorkerInfo::new(worker_id, num_workers)?;
                dataset.worker_examples(worker).collect()
            })
            .collect()
    });

    let mut examples = Vec::new();
    for worker_examples in per_worker {
        examples.extend(worker_examples?);
    }
    Ok(examples)
}

fn build_thread_pool(threads: Option<usize>) -> MotionsetResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MotionsetError::config(
            "parallel collection 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MotionsetError::Other(anyhow::anyhow!("failed to build thread pool: {e}")))
}
