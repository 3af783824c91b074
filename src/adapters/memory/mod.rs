//! In-memory storage adapters for tests and local development.

mod store;

pub use store::InMemoryStore;
