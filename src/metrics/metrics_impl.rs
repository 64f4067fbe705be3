use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::GroupCacheMetricsSnapshot;
use crate::metrics::traits::{
    GroupCacheMetricsReadRecorder, GroupCacheMetricsRecorder, MetricsReset, MissReason,
};

#[derive(Debug, Default)]
pub struct GroupCacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub miss_absent: u64,
    pub miss_group_mismatch: u64,
    pub miss_not_yet_valid: u64,
    pub miss_expired: u64,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub recycled_entries: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
}

impl GroupCacheMetrics {
    /// Copies the counters, adding the gauges the cache supplies.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> GroupCacheMetricsSnapshot {
        GroupCacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            miss_absent: self.miss_absent,
            miss_group_mismatch: self.miss_group_mismatch,
            miss_not_yet_valid: self.miss_not_yet_valid,
            miss_expired: self.miss_expired,
            insert_calls: self.insert_calls,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            recycled_entries: self.recycled_entries,
            peek_calls: self.peek_calls.get(),
            peek_found: self.peek_found.get(),
            cache_len,
            capacity,
        }
    }
}

impl GroupCacheMetricsRecorder for GroupCacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self, reason: MissReason) {
        self.get_calls += 1;
        self.get_misses += 1;
        match reason {
            MissReason::Absent => self.miss_absent += 1,
            MissReason::GroupMismatch => self.miss_group_mismatch += 1,
            MissReason::NotYetValid => self.miss_not_yet_valid += 1,
            MissReason::Expired => self.miss_expired += 1,
        }
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_recycled_entry(&mut self) {
        self.recycled_entries += 1;
    }
}

impl GroupCacheMetricsReadRecorder for GroupCacheMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}

impl MetricsReset for GroupCacheMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}
