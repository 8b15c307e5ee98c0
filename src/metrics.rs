use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters collected while exporting the crawler database
#[derive(Clone)]
pub struct ExportMetrics {
    total_read: Arc<AtomicU64>,
    total_exported: Arc<AtomicU64>,
    invalid_ip: Arc<AtomicU64>,
    missing_asn: Arc<AtomicU64>,
    missing_location: Arc<AtomicU64>,
    start_time: Arc<Instant>,
}

impl ExportMetrics {
    pub fn new() -> Self {
        ExportMetrics {
            total_read: Arc::new(AtomicU64::new(0)),
            total_exported: Arc::new(AtomicU64::new(0)),
            invalid_ip: Arc::new(AtomicU64::new(0)),
            missing_asn: Arc::new(AtomicU64::new(0)),
            missing_location: Arc::new(AtomicU64::new(0)),
            start_time: Arc::new(Instant::now()),
        }
    }

    pub fn increment_read(&self) {
        self.total_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_exported(&self) {
        self.total_exported.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_invalid_ip(&self) {
        self.invalid_ip.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_missing_asn(&self) {
        self.missing_asn.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_missing_location(&self) {
        self.missing_location.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_read(&self) -> u64 {
        self.total_read.load(Ordering::Relaxed)
    }

    pub fn get_exported(&self) -> u64 {
        self.total_exported.load(Ordering::Relaxed)
    }

    pub fn get_invalid_ip(&self) -> u64 {
        self.invalid_ip.load(Ordering::Relaxed)
    }

    pub fn get_missing_asn(&self) -> u64 {
        self.missing_asn.load(Ordering::Relaxed)
    }

    pub fn get_missing_location(&self) -> u64 {
        self.missing_location.load(Ordering::Relaxed)
    }

    pub fn get_skipped(&self) -> u64 {
        self.get_invalid_ip() + self.get_missing_asn()
    }

    /// Share of read nodes that made it into the dataset, in percent
    pub fn get_export_rate(&self) -> f64 {
        let read = self.get_read();
        if read > 0 {
            self.get_exported() as f64 / read as f64 * 100.0
        } else {
            100.0
        }
    }

    pub fn print_summary(&self) {
        tracing::info!("=== Export Summary ===");
        tracing::info!("  Nodes read: {}", self.get_read());
        tracing::info!("  Nodes exported: {}", self.get_exported());
        tracing::info!("  Invalid IPs: {}", self.get_invalid_ip());
        tracing::info!("  Missing ASN: {}", self.get_missing_asn());
        tracing::info!("  Missing location: {}", self.get_missing_location());
        tracing::info!("  Skipped: {}", self.get_skipped());
        tracing::info!("  Export rate: {:.2}%", self.get_export_rate());
        tracing::info!("  Elapsed time: {:.2}s", self.start_time.elapsed().as_secs_f64());
    }
}

impl Default for ExportMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_counters() {
        let metrics = ExportMetrics::new();

        metrics.increment_read();
        metrics.increment_read();
        assert_eq!(metrics.get_read(), 2);

        metrics.increment_exported();
        assert_eq!(metrics.get_exported(), 1);

        metrics.increment_invalid_ip();
        metrics.increment_missing_asn();
        assert_eq!(metrics.get_skipped(), 2);

        metrics.increment_missing_location();
        assert_eq!(metrics.get_missing_location(), 1);
    }

    #[test]
    fn test_export_rate() {
        let metrics = ExportMetrics::new();
        assert_eq!(metrics.get_export_rate(), 100.0);

        for _ in 0..4 {
            metrics.increment_read();
        }
        metrics.increment_exported();
        assert_eq!(metrics.get_export_rate(), 25.0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = ExportMetrics::new();
        let clone = metrics.clone();
        clone.increment_read();
        assert_eq!(metrics.get_read(), 1);
    }
}
