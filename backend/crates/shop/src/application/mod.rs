//! Application Layer
//!
//! Use cases (the account service), the authorization gate and configuration.

pub mod authenticate;
pub mod authorize;
pub mod buy_item;
pub mod config;
pub mod deadline;
pub mod get_info;
pub mod send_coin;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use authorize::{AuthorizationGate, Identity};
pub use buy_item::BuyItemUseCase;
pub use config::ShopConfig;
pub use get_info::{AccountInfo, GetInfoUseCase};
pub use send_coin::{SendCoinInput, SendCoinUseCase};
