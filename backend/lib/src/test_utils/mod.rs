//! Shared helpers for the crate's test suite

pub mod auth;
