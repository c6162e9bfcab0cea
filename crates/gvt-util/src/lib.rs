//! Shared utilities for gvt.
//!
//! This crate provides common utilities used across the gvt workspace:
//! - Logging setup with tracing
//! - Path normalization for tracked file names

pub mod log;
pub mod path;

pub use log::{LogConfig, LogLevel};
