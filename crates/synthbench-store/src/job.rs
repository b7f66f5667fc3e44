use std::path::PathBuf;

/// One transfer: a remote object and the local path it lands at.
///
/// Plain value with field-equality identity. Jobs with distinct destination
/// paths never race on the filesystem and are safe to run concurrently in
/// any order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadJob {
    pub bucket: String,
    pub key: String,
    pub local_path: PathBuf,
}

impl DownloadJob {
    #[must_use]
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        local_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            local_path: local_path.into(),
        }
    }
}
