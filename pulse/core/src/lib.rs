#![no_std]
#![forbid(unsafe_code)]

//! # Pulse Core
//!
//! Core types and pure cycle logic for the pulse waveform generator: the cycle
//! configuration, the duty threshold, the shared requested-threshold cell, and
//! the per-cycle transition function. Everything in this crate runs without
//! hardware, which is what makes the timing discipline unit-testable.

use core::fmt;

pub mod config;
pub mod cycle;
pub mod duty;

pub use config::*;
pub use cycle::*;
pub use duty::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fatal configuration errors, detected before the waveform is allowed to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The cycle boundaries are not strictly ordered
    /// (`low <= high < safe_update < period` is required)
    BoundaryOrdering,
    /// The low bound is zero; a zero compare value never matches a counter
    /// that clears to zero, so the output would never toggle
    ZeroLowBound,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoundaryOrdering => {
                write!(f, "cycle boundaries are not strictly ordered")
            }
            ConfigError::ZeroLowBound => write!(f, "low duty bound must be nonzero"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::BoundaryOrdering => defmt::write!(fmt, "BoundaryOrdering"),
            ConfigError::ZeroLowBound => defmt::write!(fmt, "ZeroLowBound"),
        }
    }
}
