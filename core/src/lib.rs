pub mod analytics;
pub mod benefits;
pub mod confirm;
pub mod event;
pub mod legacy;
pub mod memo;
pub mod storage;
pub mod store;
pub mod tools;
pub mod types;

pub use benefits::BenefitBook;
pub use memo::MemoBook;
pub use storage::{Backend, DiskBackend, MemoryBackend};
pub use store::{Record, Snapshot, Store};
