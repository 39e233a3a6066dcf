use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Central statistics hub, shared by every collection in a database.
#[derive(Debug, Default)]
pub struct Statistics {
    // Store metrics
    pub document_count: AtomicU64,
    pub index_count: AtomicU64,

    // Operation counters
    pub total_appends: AtomicU64,
    pub total_finds: AtomicU64,
    pub total_id_lookups: AtomicU64,
    pub total_updates: AtomicU64,
    pub total_drops: AtomicU64,

    // Query planning
    pub index_lookups: AtomicU64,
    pub linear_scans: AtomicU64,
    pub index_rebuilds: AtomicU64,

    // Query cache
    pub cache_hits: AtomicU64,
    pub cache_misses: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_append(&self) {
        self.total_appends.fetch_add(1, Ordering::Relaxed);
        self.document_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_find(&self) {
        self.total_finds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_id_lookup(&self) {
        self.total_id_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_update(&self, count: u64) {
        self.total_updates.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_drop(&self, count: u64) {
        self.total_drops.fetch_add(count, Ordering::Relaxed);
        self.document_count.fetch_sub(count, Ordering::Relaxed);
    }

    pub fn record_loaded_documents(&self, count: u64) {
        self.document_count.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_index_lookup(&self) {
        self.index_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_linear_scan(&self) {
        self.linear_scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_index_rebuild(&self) {
        self.index_rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics
    pub fn snapshot(&self) -> StatsSnapshot {
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let cache_misses = self.cache_misses.load(Ordering::Relaxed);
        let cache_hit_rate = if cache_hits + cache_misses > 0 {
            cache_hits as f64 / (cache_hits + cache_misses) as f64 * 100.0
        } else {
            0.0
        };

        StatsSnapshot {
            document_count: self.document_count.load(Ordering::Relaxed),
            index_count: self.index_count.load(Ordering::Relaxed),
            total_appends: self.total_appends.load(Ordering::Relaxed),
            total_finds: self.total_finds.load(Ordering::Relaxed),
            total_id_lookups: self.total_id_lookups.load(Ordering::Relaxed),
            total_updates: self.total_updates.load(Ordering::Relaxed),
            total_drops: self.total_drops.load(Ordering::Relaxed),
            index_lookups: self.index_lookups.load(Ordering::Relaxed),
            linear_scans: self.linear_scans.load(Ordering::Relaxed),
            index_rebuilds: self.index_rebuilds.load(Ordering::Relaxed),
            cache_hits,
            cache_misses,
            cache_hit_rate,
        }
    }
}

/// Point-in-time view of [`Statistics`].
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub document_count: u64,
    pub index_count: u64,
    pub total_appends: u64,
    pub total_finds: u64,
    pub total_id_lookups: u64,
    pub total_updates: u64,
    pub total_drops: u64,
    pub index_lookups: u64,
    pub linear_scans: u64,
    pub index_rebuilds: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: f64,
}
