//! Metrics registry
//!
//! - Counters only, monotonic
//! - Reset only when the registry is created
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for tag group persistence
///
/// Relaxed ordering is enough: counters are independent and read for
/// reporting only.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Records inserted
    inserts: AtomicU64,
    /// Records updated
    updates: AtomicU64,
    /// Saves that found nothing to write
    unchanged_saves: AtomicU64,
    /// Saves that failed
    save_failures: AtomicU64,
    /// Tag groups rebuilt
    loads: AtomicU64,
    /// Loads that found no complete record
    load_misses: AtomicU64,
    /// Loads that failed on the store
    load_failures: AtomicU64,
    /// Tag entries skipped as incomplete
    skipped_tags: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_inserts(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updates(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_unchanged_saves(&self) {
        self.unchanged_saves.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_save_failures(&self) {
        self.save_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_loads(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_load_misses(&self) {
        self.load_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_load_failures(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_skipped_tags(&self, count: u64) {
        self.skipped_tags.fetch_add(count, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            unchanged_saves: self.unchanged_saves.load(Ordering::Relaxed),
            save_failures: self.save_failures.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            load_misses: self.load_misses.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            skipped_tags: self.skipped_tags.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub inserts: u64,
    pub updates: u64,
    pub unchanged_saves: u64,
    pub save_failures: u64,
    pub loads: u64,
    pub load_misses: u64,
    pub load_failures: u64,
    pub skipped_tags: u64,
}
