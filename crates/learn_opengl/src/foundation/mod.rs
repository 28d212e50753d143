//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and GL-convention matrix helpers
//! - Frame timing
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod time;
