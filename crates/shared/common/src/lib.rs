//! Common utilities shared across services.
//!
//! This crate provides:
//! - Unified error handling for HTTP
//! - JSON responses with an explicit UTF-8 content type
//! - Configuration structures

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use response::{JsonUtf8, APPLICATION_JSON_UTF8};
