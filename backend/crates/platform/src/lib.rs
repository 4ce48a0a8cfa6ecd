//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Identity token issuing and verification (HS256 JWT)
//! - Cookie and bearer credential extraction
//! - Client identification
//! - Rate limiting infrastructure

pub mod client;
pub mod cookie;
pub mod password;
pub mod rate_limit;
pub mod token;
