// SPDX-License-Identifier: Apache-2.0

use crate::{StoreError, StoreErrorCode};
use reqwest::blocking::Client;

pub const DEFAULT_ENDPOINT: &str = "https://s3.amazonaws.com";
pub const DATASET_BUCKET: &str = "psb2-datasets";

/// Capability to fetch one named blob from remote object storage.
///
/// Implementations are per-worker: a fetch pool constructs one client per
/// worker from a factory instead of sharing a single instance across
/// concurrent workers.
pub trait ObjectStore {
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// Path-style HTTP object store: objects live at `<endpoint>/<bucket>/<key>`.
///
/// Exactly one attempt per object; a missing key maps to `not_found`, any
/// other non-success status to `network_error`.
pub struct HttpObjectStore {
    endpoint: String,
    client: Client,
}

impl HttpObjectStore {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            bucket,
            key.trim_start_matches('/')
        )
    }
}

impl ObjectStore for HttpObjectStore {
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let resp = self
            .client
            .get(self.object_url(bucket, key))
            .send()
            .map_err(|e| StoreError::new(StoreErrorCode::Network, e.to_string()))?;
        if resp.status().as_u16() == 404 {
            return Err(StoreError::new(StoreErrorCode::NotFound, "object not found"));
        }
        if !resp.status().is_success() {
            return Err(StoreError::new(
                StoreErrorCode::Network,
                format!("object fetch failed: {}", resp.status()),
            ));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| StoreError::new(StoreErrorCode::Network, e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
