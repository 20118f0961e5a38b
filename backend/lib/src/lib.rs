//! Vibent Backend Library
//!
//! Wallet-based authentication and organization onboarding for the
//! Vibent platform. Wallets prove ownership of their address by
//! signing a short-lived nonce challenge; successful verification
//! opens a cookie-backed session.

pub mod api;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod log;
pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::create_app;
pub use config::Config;
pub use error::{Error, Result};
