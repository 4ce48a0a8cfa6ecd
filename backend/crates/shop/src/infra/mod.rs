//! Infrastructure Layer
//!
//! Ledger store implementations.

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "memory"))]
pub use memory::InMemoryLedgerRepository;
pub use postgres::PgLedgerRepository;
