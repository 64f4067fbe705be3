/// Point-in-time copy of a cache's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GroupCacheMetricsSnapshot {
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

    pub peek_calls: u64,
    pub peek_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl GroupCacheMetricsSnapshot {
    /// Fraction of `get`/`get_time_aware` calls that hit, or `0.0` with no calls.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_zero_calls() {
        assert_eq!(GroupCacheMetricsSnapshot::default().hit_ratio(), 0.0);
    }

    #[test]
    fn hit_ratio_divides_hits_by_calls() {
        let snapshot = GroupCacheMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.hit_ratio(), 0.75);
    }
}
