//! Duty threshold and the shared requested-threshold cell

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Request value conventionally used to turn the output down to minimum.
///
/// It lies below every admissible low bound, so the resolve policy maps it to
/// the configured minimum intensity.
pub const DUTY_OFF: u32 = 1;

/// A duty threshold that has passed the resolve policy; always within the
/// configured `[low_bound, high_bound]` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DutyThreshold(u32);

impl DutyThreshold {
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Raw counter value loaded into the duty compare register
    pub const fn ticks(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DutyThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ticks", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DutyThreshold {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}ticks", self.0);
    }
}

/// The one shared cell that crosses the context boundary.
///
/// Written from any context by the duty-cycle service, read exactly once per
/// cycle by the compare-match handler. A single-word atomic makes the
/// hand-off indivisible — no torn read is possible, and no lock is needed
/// because the write is a plain overwrite and the read happens at one
/// well-defined point per cycle.
pub struct RequestedThreshold(AtomicU32);

impl RequestedThreshold {
    /// Create the cell, normally seeded with the configured low bound
    pub const fn new(initial: u32) -> Self {
        Self(AtomicU32::new(initial))
    }

    /// Overwrite the pending request; never blocks
    pub fn store(&self, value: u32) {
        self.0.store(value, Ordering::Release);
    }

    /// Read the pending request
    pub fn load(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }
}

impl fmt::Debug for RequestedThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RequestedThreshold")
            .field(&self.load())
            .finish()
    }
}
