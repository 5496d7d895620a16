pub mod memory;
pub mod traits;

pub use memory::MemoryTree;
pub use traits::{NodeSnapshot, StoreEvent, StoreListener, TreeStore};
