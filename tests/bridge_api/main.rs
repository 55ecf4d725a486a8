//! Bridge API integration tests
//!
//! Drives every command end to end through the public `Bridge` surface
//! against an in-memory store with real transaction semantics.

mod memory_store;
mod transactions;

use std::sync::Arc;

use dbbridge::Bridge;
use memory_store::MemoryStore;

/// A fresh store plus a bridge over it on the current runtime.
pub fn setup() -> (Arc<MemoryStore>, Bridge) {
    let store = Arc::new(MemoryStore::new());
    let bridge = Bridge::new(store.clone()).unwrap();
    (store, bridge)
}
