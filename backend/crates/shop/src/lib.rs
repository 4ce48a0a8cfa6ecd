//! Shop (Merch Ledger) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, entities, inventory codec, ledger repository trait
//! - `application/` - Account service use cases, authorization gate, config
//! - `infra/` - Ledger store implementations (PostgreSQL, in-memory)
//! - `presentation/` - HTTP handlers, DTOs, identity middleware, router
//!
//! ## Features
//! - Sign-in with implicit account creation and a 1000-coin starting grant
//! - Coin transfers between accounts by user name
//! - Merchandise purchases from a fixed catalog
//! - Balance, inventory and transfer history per account
//!
//! ## Ledger Model
//! - Balances never go negative; rejected operations change nothing
//! - Every mutation is one transaction; concurrent operations serialize
//! - Identity tokens are stateless HS256 JWTs carrying the account id

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ShopConfig;
pub use error::{ShopError, ShopResult};
pub use infra::postgres::PgLedgerRepository;
pub use presentation::router::{shop_router, shop_router_generic};

#[cfg(any(test, feature = "memory"))]
pub use infra::memory::InMemoryLedgerRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
