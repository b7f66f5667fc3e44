// SPDX-License-Identifier: Apache-2.0

use crate::{
    DownloadJob, NoopInstrumentation, ObjectStore, StoreError, StoreErrorCode, StoreInstrumentation,
};
use std::collections::VecDeque;
use std::fs;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

/// Upper bound on concurrent transfers across one batch.
pub const MAX_PARALLEL_DOWNLOADS: usize = 8;

/// Pool size for a batch: never more workers than jobs, hardware threads,
/// or [`MAX_PARALLEL_DOWNLOADS`].
#[must_use]
pub fn worker_count(job_count: usize) -> usize {
    let cores = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    cores.min(job_count).min(MAX_PARALLEL_DOWNLOADS)
}

/// Download every job through a bounded worker pool.
///
/// An empty job list returns immediately without touching the factory or
/// the filesystem. Each worker constructs its own client from `make_client`
/// before taking work; clients are never shared across workers. The call
/// blocks until every job has been attempted. One job's failure does not
/// cancel its siblings: the pool drains fully, then the first failure in
/// job order is returned.
pub fn download_all<C, F>(jobs: &[DownloadJob], make_client: F) -> Result<(), StoreError>
where
    C: ObjectStore,
    F: Fn() -> C + Sync,
{
    download_all_instrumented(jobs, make_client, &NoopInstrumentation)
}

pub fn download_all_instrumented<C, F>(
    jobs: &[DownloadJob],
    make_client: F,
    instrumentation: &dyn StoreInstrumentation,
) -> Result<(), StoreError>
where
    C: ObjectStore,
    F: Fn() -> C + Sync,
{
    if jobs.is_empty() {
        return Ok(());
    }

    let queue: Mutex<VecDeque<(usize, &DownloadJob)>> =
        Mutex::new(jobs.iter().enumerate().collect());
    let failures: Mutex<Vec<(usize, StoreError)>> = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for _ in 0..worker_count(jobs.len()) {
            scope.spawn(|| {
                let client = make_client();
                loop {
                    let next = match queue.lock() {
                        Ok(mut pending) => pending.pop_front(),
                        // Poisoned queue: a sibling panicked; stop pulling work.
                        Err(_) => None,
                    };
                    let Some((index, job)) = next else {
                        break;
                    };
                    if let Err(err) = run_job(job, &client, instrumentation) {
                        if let Ok(mut sink) = failures.lock() {
                            sink.push((index, err));
                        }
                    }
                }
            });
        }
    });

    let mut failures = failures
        .into_inner()
        .map_err(|_| StoreError::new(StoreErrorCode::Internal, "download worker panicked"))?;
    failures.sort_by_key(|(index, _)| *index);
    match failures.into_iter().next() {
        Some((_, err)) => Err(err),
        None => Ok(()),
    }
}

fn run_job<C: ObjectStore>(
    job: &DownloadJob,
    client: &C,
    instrumentation: &dyn StoreInstrumentation,
) -> Result<(), StoreError> {
    let started = Instant::now();
    if let Some(parent) = job.local_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Io,
                format!("failed to create {}: {e}", parent.display()),
            )
        })?;
    }
    let bytes = client.fetch_object(&job.bucket, &job.key).map_err(|err| {
        instrumentation.observe_error(&job.bucket, err.code);
        StoreError::new(
            err.code,
            format!("failed to download {}/{}: {}", job.bucket, job.key, err.message),
        )
    })?;
    fs::write(&job.local_path, &bytes).map_err(|e| {
        StoreError::new(
            StoreErrorCode::Io,
            format!("failed to write {}: {e}", job.local_path.display()),
        )
    })?;
    instrumentation.observe_download(&job.bucket, bytes.len(), started.elapsed());
    Ok(())
}
