//! Core library components.
//!
//! Secret reconciliation logic, the local credential store, and the vault
//! API contract. Nothing here prints or prompts.

pub mod api;
pub mod auth;
pub mod codec;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod domain;
pub mod env;
pub mod git;
pub mod matcher;
pub mod merge;
pub mod reconcile;
pub mod session;
pub mod store;
