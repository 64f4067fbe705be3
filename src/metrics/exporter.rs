use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::GroupCacheMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes in the Prometheus text exposition format so it can be scraped by
/// Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {name} {kind}");
        let _ = writeln!(writer, "{name} {value}");
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<GroupCacheMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &GroupCacheMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("miss_absent_total", snapshot.miss_absent),
            ("miss_group_mismatch_total", snapshot.miss_group_mismatch),
            ("miss_not_yet_valid_total", snapshot.miss_not_yet_valid),
            ("miss_expired_total", snapshot.miss_expired),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_new_total", snapshot.insert_new),
            ("insert_updates_total", snapshot.insert_updates),
            ("recycled_entries_total", snapshot.recycled_entries),
            ("peek_calls_total", snapshot.peek_calls),
            ("peek_found_total", snapshot.peek_found),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", suffix, value);
        }
        self.write_metric("gauge", "cache_len", snapshot.cache_len as u64);
        self.write_metric("gauge", "capacity", snapshot.capacity as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("ctx_cache", Vec::new());
        let snapshot = GroupCacheMetricsSnapshot {
            get_calls: 9,
            miss_group_mismatch: 2,
            cache_len: 4,
            capacity: 100,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(
            text.contains("# TYPE ctx_cache_get_calls_total counter\nctx_cache_get_calls_total 9\n")
        );
        assert!(text.contains("ctx_cache_miss_group_mismatch_total 2\n"));
        assert!(
            text.contains("# TYPE ctx_cache_capacity gauge\nctx_cache_capacity 100\n")
        );
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&GroupCacheMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\ncache_len 0\n"));
    }
}
