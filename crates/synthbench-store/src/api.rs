// SPDX-License-Identifier: Apache-2.0

use crate::cache::resolve_cache;
use crate::{
    download_all_instrumented, read_edge_and_random, CacheLocation, DownloadJob, HttpObjectStore,
    NoopInstrumentation, ReadOptions, StoreError, StoreInstrumentation, DATASET_BUCKET,
    DEFAULT_ENDPOINT,
};
use std::path::Path;
use std::sync::Arc;
use synthbench_model::{
    catalog_group, dataset_edge_key, dataset_local_files, dataset_random_key, CaseTable,
    DatasetName,
};

pub const OUTPUT_COLUMN: &str = "output";
pub const STDOUT_COLUMN: &str = "stdout";

const RAW_OUTPUT_COLUMN: &str = "output1";
const RAW_STDOUT_COLUMN: &str = "output2";

/// Entry point composing cache resolution, the fetch pool, and the merge.
pub struct DatasetStore {
    endpoint: String,
    bucket: String,
    instrumentation: Arc<dyn StoreInstrumentation>,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            bucket: DATASET_BUCKET.to_string(),
            instrumentation: Arc::new(NoopInstrumentation),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    #[must_use]
    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn StoreInstrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    /// The two transfers each requested dataset contributes to a batch.
    #[must_use]
    pub fn download_jobs(&self, local_dir: &Path, datasets: &[DatasetName]) -> Vec<DownloadJob> {
        let mut jobs = Vec::with_capacity(datasets.len() * 2);
        for dataset in datasets {
            let group = catalog_group(dataset);
            let files = dataset_local_files(local_dir, dataset);
            jobs.push(DownloadJob::new(
                self.bucket.clone(),
                dataset_edge_key(group, dataset),
                files.edge,
            ));
            jobs.push(DownloadJob::new(
                self.bucket.clone(),
                dataset_random_key(group, dataset),
                files.random,
            ));
        }
        jobs
    }

    /// Download the edge and random files of every dataset under
    /// `local_dir/<name>/`.
    ///
    /// All requested datasets share ONE batch, so the fetch pool bounds
    /// concurrent transfers across the whole call, not per dataset. A
    /// failed batch leaves already-written files in place.
    pub fn download_datasets(
        &self,
        local_dir: &Path,
        datasets: &[DatasetName],
    ) -> Result<(), StoreError> {
        let jobs = self.download_jobs(local_dir, datasets);
        download_all_instrumented(
            &jobs,
            || HttpObjectStore::new(self.endpoint.clone()),
            self.instrumentation.as_ref(),
        )
    }

    /// Read one dataset into a merged table with the public schema
    /// `input1..inputN, output, [stdout,] edge_case`.
    ///
    /// Behavior is identical with or without a user cache dir; an ephemeral
    /// directory is removed before this returns, on success and failure.
    pub fn read_dataset(
        &self,
        dataset: &DatasetName,
        options: &ReadOptions,
    ) -> Result<CaseTable, StoreError> {
        let location: CacheLocation = resolve_cache(dataset, options, |dir| {
            self.download_datasets(dir, std::slice::from_ref(dataset))
        })?;
        let table = read_edge_and_random(location.path(), dataset)?;
        Ok(table
            .rename_column(RAW_OUTPUT_COLUMN, OUTPUT_COLUMN)
            .rename_column(RAW_STDOUT_COLUMN, STDOUT_COLUMN))
    }
}

/// [`DatasetStore::download_datasets`] against the default remote endpoint.
pub fn download_datasets(local_dir: &Path, datasets: &[DatasetName]) -> Result<(), StoreError> {
    DatasetStore::new().download_datasets(local_dir, datasets)
}

/// [`DatasetStore::read_dataset`] against the default remote endpoint.
pub fn read_dataset(dataset: &DatasetName, options: &ReadOptions) -> Result<CaseTable, StoreError> {
    DatasetStore::new().read_dataset(dataset, options)
}
