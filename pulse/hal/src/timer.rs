//! Free-running compare timer abstraction

use crate::error::HalResult;

/// Compare channel of a free-running timer.
///
/// The driver needs three: one for the falling edge of the waveform, one for
/// the period (auto-clear), and one for the safe-update interrupt. A fourth is
/// common on real timers and costs the simulator nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareChannel {
    Ch0,
    Ch1,
    Ch2,
    Ch3,
}

impl CompareChannel {
    /// Register index of this channel
    pub const fn index(self) -> usize {
        match self {
            CompareChannel::Ch0 => 0,
            CompareChannel::Ch1 => 1,
            CompareChannel::Ch2 => 2,
            CompareChannel::Ch3 => 3,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CompareChannel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CC[{}]", self.index());
    }
}

/// Free-running counter with independent compare channels
pub trait CompareTimer: Send {
    /// Set the counter prescaler; must be called before [`start`](Self::start)
    fn set_prescaler(&mut self, prescaler: u8) -> HalResult<()>;

    /// Load a compare value
    fn set_compare(&mut self, channel: CompareChannel, value: u32) -> HalResult<()>;

    /// Read back a compare value
    fn compare(&self, channel: CompareChannel) -> u32;

    /// Clear the counter automatically when this channel matches
    fn enable_auto_clear(&mut self, channel: CompareChannel) -> HalResult<()>;

    /// Fire an interrupt when this channel matches
    fn enable_compare_interrupt(&mut self, channel: CompareChannel) -> HalResult<()>;

    /// Check whether a compare event is pending
    fn compare_event_pending(&self, channel: CompareChannel) -> bool;

    /// Clear a pending compare event
    fn clear_compare_event(&mut self, channel: CompareChannel) -> HalResult<()>;

    /// Start the counter; it never stops once started
    fn start(&mut self) -> HalResult<()>;
}
