//! # Configuration Module
//!
//! Centralizes the wire-format constants and progress-reporting knobs. The
//! byte layout of a record is a contract with the host engine, so the widths
//! and format strings that define it live in one place instead of being
//! scattered through the codec.
//!
//! - [`constants`]: wire widths, text formats, and progress throttling values

pub mod constants;
pub use constants::*;
