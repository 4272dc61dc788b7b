//! Structured logging facility for GoalMap
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use goalmap_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! The session layer owns operation boundaries (start/end/end_error). Core and
//! store code only emits `tracing::debug!` / `tracing::warn!` details.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
