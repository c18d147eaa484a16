//! Object store backing the hub's credential collection.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Append-only collection of raw hub objects.
pub trait HubStore: Send + Sync {
    /// Store an object. Returns `false` if an identical object was already present.
    fn add(&self, object: Vec<u8>) -> bool;

    /// Every stored object, oldest first.
    fn get_all(&self) -> Vec<Vec<u8>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`HubStore`] kept in memory, deduplicated by content.
#[derive(Default)]
pub struct InMemoryHubStore {
    /// Object bytes to insertion sequence number.
    objects: DashMap<Vec<u8>, u64>,
    next_seq: AtomicU64,
}

impl InMemoryHubStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HubStore for InMemoryHubStore {
    fn add(&self, object: Vec<u8>) -> bool {
        match self.objects.entry(object) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(self.next_seq.fetch_add(1, Ordering::Relaxed));
                true
            }
        }
    }

    fn get_all(&self) -> Vec<Vec<u8>> {
        let mut objects: Vec<(u64, Vec<u8>)> = self
            .objects
            .iter()
            .map(|entry| (*entry.value(), entry.key().clone()))
            .collect();
        objects.sort_unstable_by_key(|(seq, _)| *seq);
        objects.into_iter().map(|(_, object)| object).collect()
    }

    fn len(&self) -> usize {
        self.objects.len()
    }
}
