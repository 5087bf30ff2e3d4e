// Service exports
pub mod cache;
pub mod catalog;
pub mod registry;
pub mod storage;
pub mod submission;

pub use cache::{CacheKey, GrantCache};
pub use catalog::{CandidateSource, CatalogError, StaticCatalog};
pub use registry::{RegistryClient, RegistryError};
pub use storage::{FileStore, LocalStore, MemoryStore, StorageError, StorageKey};
pub use submission::{SubmissionError, SubmissionGateway};
