//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The patent
//! collection is the sole source of truth; every mutation goes through
//! the helpers below so id assignment stays in one place.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::dedup::{self, ImportReport};
use crate::models::{Patent, PatentDraft};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct AppState {
    /// All patents, newest first
    pub patents: Vec<Patent>,
    /// Next id to hand out; never reused within a session
    pub next_id: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self { patents: Vec::new(), next_id: 1 }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Add a single patent to the front of the store, assigning its id
pub fn store_insert_patent(store: &AppStore, draft: PatentDraft) -> u32 {
    let id = store.next_id().get_untracked();
    store.next_id().set(id + 1);
    store.patents().write().insert(0, draft.into_patent(id));
    id
}

/// Full-record replace by id (edit flow)
pub fn store_replace_patent(store: &AppStore, updated: Patent) {
    store.patents().write().iter_mut()
        .find(|p| p.id == updated.id)
        .map(|p| *p = updated);
}

/// Remove a patent from the store by id
pub fn store_remove_patent(store: &AppStore, id: u32) {
    store.patents().write().retain(|p| p.id != id);
}

/// Look up a patent by id (non-reactive snapshot)
pub fn store_get_patent(store: &AppStore, id: u32) -> Option<Patent> {
    store.patents().read_untracked().iter().find(|p| p.id == id).cloned()
}

/// Merge an imported batch through the deduplicator.
///
/// Accepted records are prepended as a block (newest first); a fully
/// rejected batch leaves the store untouched.
pub fn store_merge_imports(store: &AppStore, batch: Vec<PatentDraft>) -> ImportReport {
    let outcome = dedup::partition_imports(&store.patents().read_untracked(), batch);
    let report = outcome.report();
    if !outcome.accepted.is_empty() {
        let mut next_id = store.next_id().get_untracked();
        let patents_field = store.patents();
        let mut patents = patents_field.write();
        for draft in outcome.accepted.into_iter().rev() {
            patents.insert(0, draft.into_patent(next_id));
            next_id += 1;
        }
        drop(patents);
        store.next_id().set(next_id);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatentDraft;

    fn draft(name: &str, app_number: &str) -> PatentDraft {
        PatentDraft {
            name: name.to_string(),
            app_number: app_number.to_string(),
            ..Default::default()
        }
    }

    // Arena-backed stores need a reactive owner even outside a running app
    fn test_store() -> (Owner, AppStore) {
        let owner = Owner::new();
        owner.set();
        (owner, AppStore::new(AppState::new()))
    }

    #[test]
    fn insert_assigns_unique_ids_newest_first() {
        let (_owner, store) = test_store();
        let a = store_insert_patent(&store, draft("A", "112001"));
        let b = store_insert_patent(&store, draft("B", "112002"));
        assert_ne!(a, b);
        let patents = store.patents().read_untracked();
        assert_eq!(patents.len(), 2);
        assert_eq!(patents[0].name, "B");
        assert_eq!(patents[1].name, "A");
    }

    #[test]
    fn replace_swaps_full_record_by_id() {
        let (_owner, store) = test_store();
        let id = store_insert_patent(&store, draft("A", "112001"));
        let mut updated = store_get_patent(&store, id).unwrap();
        updated.country = "CN".to_string();
        store_replace_patent(&store, updated);
        assert_eq!(store_get_patent(&store, id).unwrap().country, "CN");
    }

    #[test]
    fn remove_deletes_only_the_target() {
        let (_owner, store) = test_store();
        let a = store_insert_patent(&store, draft("A", "112001"));
        let b = store_insert_patent(&store, draft("B", "112002"));
        store_remove_patent(&store, a);
        let patents = store.patents().read_untracked();
        assert_eq!(patents.len(), 1);
        assert_eq!(patents[0].id, b);
    }

    #[test]
    fn fully_rejected_batch_leaves_store_unchanged() {
        let (_owner, store) = test_store();
        store_insert_patent(&store, draft("A", "112001"));
        let report = store_merge_imports(&store, vec![draft("B", "112001")]);
        assert_eq!(report.accepted, 0);
        assert_eq!(report.rejected, 1);
        assert_eq!(store.patents().read_untracked().len(), 1);
        assert_eq!(store.patents().read_untracked()[0].name, "A");
    }

    #[test]
    fn merged_batch_is_prepended_in_batch_order() {
        let (_owner, store) = test_store();
        store_insert_patent(&store, draft("old", "112000"));
        let report = store_merge_imports(
            &store,
            vec![draft("B", "112001"), draft("C", "112002")],
        );
        assert_eq!(report.accepted, 2);
        let patents = store.patents().read_untracked();
        assert_eq!(patents[0].name, "B");
        assert_eq!(patents[1].name, "C");
        assert_eq!(patents[2].name, "old");
        // ids stay unique across the merge
        assert_ne!(patents[0].id, patents[1].id);
    }
}
