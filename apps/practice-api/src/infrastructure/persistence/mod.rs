//! Persistence Adapters
//!
//! Storage implementations of the domain repository traits.

pub mod in_memory;

pub use in_memory::{InMemoryPracticeStore, StoreCounts};
