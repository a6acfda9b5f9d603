//! Per-cycle state machine for the toggle waveform
//!
//! The hardware drives the pin on its own; the processor only hears about the
//! safe-update compare match. Modeling the whole cycle as a pure transition
//! function keeps the handler's one decision — which threshold to load —
//! testable without any hardware behind it.

use crate::{CycleConfig, DutyThreshold};

/// Output phase within one waveform cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// Output high, counter below the duty threshold
    High,
    /// Output low, counter between the duty threshold and the period
    Low,
}

/// Compare-match events of one cycle, in counter order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// Duty compare matched; the output falls
    DutyMatch,
    /// Safe-update compare matched; the pending request may be applied
    SafeUpdateMatch,
    /// Period compare matched; the output rises and the counter clears
    PeriodMatch,
}

/// Advance the cycle by one compare event.
///
/// Returns the next phase and, for a safe-update match, the threshold to load
/// into the duty compare register. No other event may load a threshold; that
/// is the entire glitch-free discipline.
pub fn step(
    phase: CyclePhase,
    event: CycleEvent,
    requested: u32,
    config: &CycleConfig,
) -> (CyclePhase, Option<DutyThreshold>) {
    match (phase, event) {
        (CyclePhase::High, CycleEvent::DutyMatch) => (CyclePhase::Low, None),
        (CyclePhase::Low, CycleEvent::PeriodMatch) => (CyclePhase::High, None),
        // Applying never changes the phase; the safe point lies strictly
        // inside the low phase for any validated configuration.
        (phase, CycleEvent::SafeUpdateMatch) => (phase, Some(config.resolve(requested))),
        // Spurious match for the current phase; ignore it.
        (phase, _) => (phase, None),
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CyclePhase {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CyclePhase::High => defmt::write!(fmt, "High"),
            CyclePhase::Low => defmt::write!(fmt, "Low"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CycleEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CycleEvent::DutyMatch => defmt::write!(fmt, "DutyMatch"),
            CycleEvent::SafeUpdateMatch => defmt::write!(fmt, "SafeUpdateMatch"),
            CycleEvent::PeriodMatch => defmt::write!(fmt, "PeriodMatch"),
        }
    }
}
