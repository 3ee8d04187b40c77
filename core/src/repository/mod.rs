pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use file::FileTaskStore;
pub use memory::MemoryTaskStore;
pub use traits::{NewTask, TaskStore};
