#![forbid(unsafe_code)]
//! Cache-aware fetch-and-merge pipeline for synthbench datasets.
//!
//! The pipeline downloads a dataset's edge-case and random-case files from
//! remote object storage (or finds them in a local cache), tags each row
//! with its provenance, and merges both into one consistently-typed table.

mod api;
mod cache;
mod client;
mod error;
mod fetch;
mod instrument;
mod job;
mod loader;

pub use api::{
    download_datasets, read_dataset, DatasetStore, OUTPUT_COLUMN, STDOUT_COLUMN,
};
pub use cache::{CacheLocation, ReadOptions, ENV_SYNTHBENCH_CACHE_DIR};
pub use client::{HttpObjectStore, ObjectStore, DATASET_BUCKET, DEFAULT_ENDPOINT};
pub use error::{StoreError, StoreErrorCode};
pub use fetch::{download_all, download_all_instrumented, worker_count, MAX_PARALLEL_DOWNLOADS};
pub use instrument::{
    NoopInstrumentation, StoreInstrumentation, StoreMetrics, StoreMetricsCollector,
};
pub use job::DownloadJob;
pub use loader::{read_edge_and_random, EDGE_CASE_COLUMN};

pub const CRATE_NAME: &str = "synthbench-store";
