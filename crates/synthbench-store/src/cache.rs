// SPDX-License-Identifier: Apache-2.0

use crate::{StoreError, StoreErrorCode};
use std::path::{Path, PathBuf};
use synthbench_model::{dataset_local_files, DatasetName};
use tempfile::TempDir;

/// Environment override the CLI consults for a default `--cache-dir`.
/// The library itself never reads it: an absent cache dir always means an
/// ephemeral directory.
pub const ENV_SYNTHBENCH_CACHE_DIR: &str = "SYNTHBENCH_CACHE_DIR";

/// The directory a dataset read resolves to.
///
/// The ephemeral variant owns its `TempDir`: dropping the location removes
/// the directory on every exit path, including failed downloads and reads.
#[derive(Debug)]
pub enum CacheLocation {
    Directory(PathBuf),
    Ephemeral(TempDir),
}

impl CacheLocation {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(dir) => dir,
            Self::Ephemeral(temp) => temp.path(),
        }
    }

    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Ephemeral(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub cache_dir: Option<PathBuf>,
    pub force_download: bool,
}

impl ReadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    #[must_use]
    pub fn with_force_download(mut self, force_download: bool) -> Self {
        self.force_download = force_download;
        self
    }
}

/// Decide where a dataset read happens and make the directory ready.
///
/// With a user cache dir: download only when forced or when either expected
/// file is absent. Presence is the whole check; file contents are never
/// inspected. Without one: allocate an ephemeral directory and always
/// download into it.
pub(crate) fn resolve_cache<D>(
    dataset: &DatasetName,
    options: &ReadOptions,
    download: D,
) -> Result<CacheLocation, StoreError>
where
    D: FnOnce(&Path) -> Result<(), StoreError>,
{
    match &options.cache_dir {
        Some(dir) => {
            let files = dataset_local_files(dir, dataset);
            if options.force_download || !files.edge.exists() || !files.random.exists() {
                download(dir)?;
            }
            Ok(CacheLocation::Directory(dir.clone()))
        }
        None => {
            let temp = TempDir::new().map_err(|e| {
                StoreError::new(
                    StoreErrorCode::Io,
                    format!("failed to allocate ephemeral cache dir: {e}"),
                )
            })?;
            download(temp.path())?;
            Ok(CacheLocation::Ephemeral(temp))
        }
    }
}
