use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use papaya::HashMap as PapayaHashMap;
use patientql_storage::{Patient, Post};
use tokio::sync::Mutex;

/// In-memory storage backend using papaya lock-free HashMaps.
///
/// This storage implementation provides:
/// - Lock-free concurrent reads via papaya::HashMap
/// - Serialized writes, so constraint checks and the write they guard
///   happen as one step
/// - Serial ids per table, starting at 1, like a `SERIAL` column
/// - The `posts.patient_id` foreign key of the relational schema
#[derive(Debug)]
pub struct InMemoryStorage {
    pub(crate) patients: Arc<PapayaHashMap<i32, Patient>>,
    pub(crate) posts: Arc<PapayaHashMap<i32, Post>>,
    patient_seq: AtomicI32,
    post_seq: AtomicI32,
    /// Held by every mutation.
    pub(crate) writes: Mutex<()>,
}

impl InMemoryStorage {
    /// Creates a new, empty in-memory storage.
    pub fn new() -> Self {
        Self {
            patients: Arc::new(PapayaHashMap::new()),
            posts: Arc::new(PapayaHashMap::new()),
            patient_seq: AtomicI32::new(1),
            post_seq: AtomicI32::new(1),
            writes: Mutex::new(()),
        }
    }

    pub(crate) fn next_patient_id(&self) -> i32 {
        self.patient_seq.fetch_add(1, Ordering::SeqCst)
    }

    pub(crate) fn next_post_id(&self) -> i32 {
        self.post_seq.fetch_add(1, Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(crate) fn patient_count(&self) -> usize {
        self.patients.pin().len()
    }

    #[cfg(test)]
    pub(crate) fn post_count(&self) -> usize {
        self.posts.pin().len()
    }

    /// Returns `true` if any post references the given patient.
    pub(crate) fn has_posts_for(&self, patient_id: i32) -> bool {
        self.posts
            .pin()
            .iter()
            .any(|(_, post)| post.patient_id == patient_id)
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects map values sorted by id, the order a relational scan of a
/// serial-keyed table yields.
pub(crate) fn sorted_by_id<T: Clone>(map: &PapayaHashMap<i32, T>) -> Vec<T> {
    let guard = map.pin();
    let mut rows: Vec<(i32, T)> = guard.iter().map(|(id, row)| (*id, row.clone())).collect();
    rows.sort_unstable_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_sequences_start_at_one() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.next_patient_id(), 1);
        assert_eq!(storage.next_patient_id(), 2);
        assert_eq!(storage.next_post_id(), 1);
    }

    #[test]
    fn test_sorted_by_id() {
        let map = PapayaHashMap::new();
        {
            let guard = map.pin();
            guard.insert(3, "c");
            guard.insert(1, "a");
            guard.insert(2, "b");
        }
        assert_eq!(sorted_by_id(&map), vec!["a", "b", "c"]);
    }
}
