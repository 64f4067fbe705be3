use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// Used for read paths that do not take `&mut self` (e.g. `peek`).
///
/// The cell is `Send` but not `Sync`, so a cache holding one cannot be shared
/// across threads by reference. Shared use goes through `ConcurrentGroupCache`,
/// whose mutex only needs the cache to be `Send`.
///
/// ```compile_fail
/// use groupcache::BoundedGroupCache;
///
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<BoundedGroupCache<u8, u8>>();
/// ```
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_cell_counts_and_resets() {
        let cell = MetricsCell::new();
        cell.incr();
        cell.incr();
        assert_eq!(cell.get(), 2);
        cell.reset();
        assert_eq!(cell.get(), 0);
    }

    #[test]
    fn metrics_cell_moves_between_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<MetricsCell>();

        let cell = MetricsCell::new();
        cell.incr();
        let cell = std::thread::spawn(move || {
            cell.incr();
            cell
        })
        .join()
        .unwrap();
        assert_eq!(cell.get(), 2);
    }
}
