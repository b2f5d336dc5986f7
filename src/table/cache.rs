//! Memoized filter + sort results.
//!
//! Entries hold the sorted patient ids for one (snapshot id, criteria,
//! column, direction) tuple. Meeting a different snapshot, whether from
//! another store or after a replace, drops every older entry. A hit
//! resolves ids back through the store's patient index, so cached and
//! uncached selections are identical.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::models::{ColumnKey, Gender, Patient, PatientCriteria, SortDirection};
use crate::store::RecordStore;

/// Default number of distinct queries kept.
pub const DEFAULT_CAPACITY: usize = 64;

// ═══════════════════════════════════════════════════════════
// QueryKey
// ═══════════════════════════════════════════════════════════

/// Hashable form of a selection. Float thresholds are compared by bit
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    snapshot_id: u64,
    max_distance: Option<u64>,
    min_revisit_rate: Option<u64>,
    max_revisit_rate: Option<u64>,
    gender: Option<Gender>,
    doctor_id: Option<u32>,
    column: ColumnKey,
    direction: SortDirection,
}

impl QueryKey {
    fn new(
        snapshot_id: u64,
        criteria: &PatientCriteria,
        column: ColumnKey,
        direction: SortDirection,
    ) -> Self {
        Self {
            snapshot_id,
            max_distance: criteria.max_distance.map(f64::to_bits),
            min_revisit_rate: criteria.min_revisit_rate.map(f64::to_bits),
            max_revisit_rate: criteria.max_revisit_rate.map(f64::to_bits),
            gender: criteria.gender,
            doctor_id: criteria.doctor_id,
            column,
            direction,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// QueryCache
// ═══════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<QueryKey, (u64, Vec<u32>)>,
    capacity: usize,
    snapshot_id: u64,
    /// Monotonic use counter for least-recently-used eviction.
    tick: u64,
    hits: u64,
    misses: u64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            snapshot_id: 0,
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Filtered and sorted patients for the query. Errors are returned
    /// without being cached.
    pub fn select<'s>(
        &mut self,
        store: &'s RecordStore,
        criteria: &PatientCriteria,
        column: ColumnKey,
        direction: SortDirection,
    ) -> Result<Vec<&'s Patient>, EngineError> {
        if store.snapshot_id() != self.snapshot_id {
            tracing::debug!(
                from = self.snapshot_id,
                to = store.snapshot_id(),
                generation = store.generation(),
                dropped = self.entries.len(),
                "Query cache invalidated by snapshot change"
            );
            self.entries.clear();
            self.snapshot_id = store.snapshot_id();
        }

        self.tick += 1;
        let key = QueryKey::new(store.snapshot_id(), criteria, column, direction);

        if let Some((last_used, ids)) = self.entries.get_mut(&key) {
            *last_used = self.tick;
            self.hits += 1;
            return ids.iter().map(|&id| store.patient(id)).collect();
        }

        self.misses += 1;
        let selected = super::select(store, criteria, column, direction)?;

        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        let ids = selected.iter().map(|p| p.id).collect();
        self.entries.insert(key, (self.tick, ids));
        Ok(selected)
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, (last_used, _))| *last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
