pub mod salary;
pub mod user;

use mem_db::Store;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to the single in-memory store. All controllers go
/// through this lock, which also guards the insert/id-assignment and
/// delete sequences against concurrent writers.
pub type SharedStore = Arc<RwLock<Store>>;

/// Create a fresh shared store with no tables; controllers register
/// their own tables at construction.
pub fn shared_store() -> SharedStore {
    Arc::new(RwLock::new(Store::new()))
}
