//! Utility Module
//!
//! - [`Timer`]: measured frame deltas for the per-frame tick

pub mod time;

pub use time::Timer;
