//! Cycle configuration: the fixed compare boundaries of one waveform period

use crate::{ConfigError, ConfigResult, DutyThreshold};
use core::fmt;

/// Fixed boundaries of one waveform cycle, in counter ticks.
///
/// The counter runs from 0 to `period` and auto-clears. The output rises at
/// the period match, falls at the active duty compare, and the pending duty
/// request is applied at `safe_update` — a point chosen after the highest
/// admissible duty value but before the counter wraps, so the swap can never
/// shorten or stretch the pulse in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    /// Lowest admissible duty threshold (minimum intensity)
    pub low_bound: u32,
    /// Highest admissible duty threshold (maximum intensity)
    pub high_bound: u32,
    /// Counter value at which the pending request is applied
    pub safe_update: u32,
    /// Counter value at which the output rises and the counter clears
    pub period: u32,
    /// Timer prescaler applied at initialization
    pub prescaler: u8,
}

impl CycleConfig {
    /// Standard intensity range (duty 10..=126 over a 200-tick period)
    pub const STANDARD: CycleConfig = CycleConfig {
        low_bound: 10,
        high_bound: 126,
        safe_update: 180,
        period: 200,
        prescaler: 4,
    };

    /// Wide intensity range (duty 32..=250 over a 256-tick period)
    pub const WIDE: CycleConfig = CycleConfig {
        low_bound: 32,
        high_bound: 250,
        safe_update: 253,
        period: 256,
        prescaler: 4,
    };

    /// Create a configuration; boundaries are checked by [`validate`](Self::validate)
    /// before a controller will accept it
    pub const fn new(
        low_bound: u32,
        high_bound: u32,
        safe_update: u32,
        period: u32,
        prescaler: u8,
    ) -> Self {
        Self {
            low_bound,
            high_bound,
            safe_update,
            period,
            prescaler,
        }
    }

    /// Check the boundary ordering invariant:
    /// `0 < low_bound <= high_bound < safe_update < period`.
    ///
    /// A configuration that fails this check must never drive hardware; the
    /// safe-update point would no longer fall inside the low phase and the
    /// glitch-free guarantee would be void.
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.low_bound == 0 {
            return Err(ConfigError::ZeroLowBound);
        }
        if self.low_bound > self.high_bound
            || self.high_bound >= self.safe_update
            || self.safe_update >= self.period
        {
            return Err(ConfigError::BoundaryOrdering);
        }
        Ok(())
    }

    /// Resolve a raw requested value to the threshold actually loaded into
    /// hardware.
    ///
    /// In-range requests pass through; anything else falls back to the low
    /// bound. Falling back to minimum (rather than clamping to the nearest
    /// bound) keeps an out-of-range request from ever pinning the output at
    /// maximum intensity.
    pub const fn resolve(&self, requested: u32) -> DutyThreshold {
        if requested >= self.low_bound && requested <= self.high_bound {
            DutyThreshold::new(requested)
        } else {
            DutyThreshold::new(self.low_bound)
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for CycleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duty {}..={} / safe {} / period {}",
            self.low_bound, self.high_bound, self.safe_update, self.period
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CycleConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "duty {}..={} / safe {} / period {}",
            self.low_bound,
            self.high_bound,
            self.safe_update,
            self.period
        );
    }
}
