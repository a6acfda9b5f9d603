//! Duty-cycle service

use pulse_core::RequestedThreshold;

/// Safe entry point for requesting a new duty cycle from any context.
///
/// The request is stored verbatim; range checking is deferred to the
/// controller's compare-match handler, which applies it at the next safe
/// instant. That split — accept anywhere, apply only at the safe point — is
/// what rules out torn pulses without any blocking primitive.
#[derive(Clone, Copy)]
pub struct DutyCycle<'a> {
    requested: &'a RequestedThreshold,
}

impl<'a> DutyCycle<'a> {
    /// Create a handle over the shared request cell
    pub const fn new(requested: &'a RequestedThreshold) -> Self {
        Self { requested }
    }

    /// Request a new duty cycle.
    ///
    /// Never blocks and always succeeds; out-of-range values take effect as
    /// minimum intensity. The change is visible on the output within one
    /// cycle period. When several requests land within the same cycle, the
    /// last one before the safe instant wins.
    pub fn set(&self, value: u32) {
        self.requested.store(value);
    }
}
