//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - 2D math types and affine helpers
//! - Time management and fixed-step accumulation
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod time;
