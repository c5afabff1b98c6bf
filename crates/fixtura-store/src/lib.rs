//! Storage for customer fixtures and the batch populate loop.

pub mod errors;
pub mod memory;
pub mod populate;
pub mod postgres;
pub mod store;

pub use errors::StoreError;
pub use memory::MemoryStore;
pub use populate::{BatchFailure, PopulateOptions, PopulateReport, PopulateStatus, populate};
pub use postgres::PostgresStore;
pub use store::{FixtureStore, StoreCounts};
