//! Value Object Module

pub mod coin_amount;
pub mod inventory;
pub mod user_name;
pub mod user_password;
