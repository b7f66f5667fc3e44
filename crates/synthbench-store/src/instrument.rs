use crate::StoreErrorCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub trait StoreInstrumentation: Send + Sync + 'static {
    fn observe_download(&self, _bucket: &str, _bytes: usize, _latency: Duration) {}
    fn observe_error(&self, _bucket: &str, _code: StoreErrorCode) {}
}

#[derive(Default)]
pub struct NoopInstrumentation;

impl StoreInstrumentation for NoopInstrumentation {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    pub bytes_downloaded: u64,
    pub request_count: u64,
    pub error_count: u64,
    pub latency_ms_total: u64,
}

/// Atomic counter sink safe to share across fetch workers.
#[derive(Debug, Default)]
pub struct StoreMetricsCollector {
    bytes_downloaded: AtomicU64,
    request_count: AtomicU64,
    error_count: AtomicU64,
    latency_ms_total: AtomicU64,
}

impl StoreMetricsCollector {
    #[must_use]
    pub fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
            request_count: self.request_count.load(Ordering::Relaxed),
            error_count: self.error_count.load(Ordering::Relaxed),
            latency_ms_total: self.latency_ms_total.load(Ordering::Relaxed),
        }
    }
}

impl StoreInstrumentation for StoreMetricsCollector {
    fn observe_download(&self, _bucket: &str, bytes: usize, latency: Duration) {
        self.bytes_downloaded
            .fetch_add(bytes as u64, Ordering::Relaxed);
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.latency_ms_total
            .fetch_add(latency.as_millis() as u64, Ordering::Relaxed);
    }

    fn observe_error(&self, _bucket: &str, _code: StoreErrorCode) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }
}
