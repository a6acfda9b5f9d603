//! Edge-toggle output abstraction
//!
//! Models hardware that flips an output pin in response to a bound timer
//! event without processor intervention (GPIOTE-task plus event-routing
//! style peripherals).

use crate::error::HalResult;
use crate::timer::CompareChannel;

/// Identifier of a physical output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLine(pub u32);

/// Output pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

impl Level {
    pub const fn toggled(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Level::Low => defmt::write!(fmt, "Low"),
            Level::High => defmt::write!(fmt, "High"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutputLine {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "line {}", self.0);
    }
}

/// Hardware toggle output bindable to compare events
pub trait ToggleOutput: Send {
    /// Drive `line` as an output at `initial` level and attach the toggle
    /// task to it. One toggle task per output line.
    fn configure_toggle(&mut self, line: OutputLine, initial: Level) -> HalResult<()>;

    /// Route a compare event to the toggle task, so a match flips the line
    /// without processor intervention
    fn route_compare(&mut self, channel: CompareChannel) -> HalResult<()>;
}
