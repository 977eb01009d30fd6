//! Common utilities shared by the gateway crates.
//!
//! This crate provides:
//! - Unified error handling with HTTP response conversion
//! - Upstream client configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
