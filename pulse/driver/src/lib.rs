#![no_std]
#![forbid(unsafe_code)]

//! # Pulse Driver
//!
//! The two halves of the waveform generator:
//!
//! - [`WaveformTimer`] owns the hardware and applies duty changes only at the
//!   safe instant of each cycle, from its compare-match handler.
//! - [`DutyCycle`] is the entry point every other context uses to request a
//!   new duty value; it never blocks and never touches the hardware.
//!
//! Both halves are constructed around the same [`RequestedThreshold`] cell,
//! which is the only state that crosses the context boundary.

use core::fmt;

pub mod controller;
pub mod service;
pub mod sim;

pub use controller::WaveformTimer;
pub use service::DutyCycle;

pub use pulse_core::{
    step, ConfigError, CycleConfig, CycleEvent, CyclePhase, DutyThreshold, RequestedThreshold,
    DUTY_OFF,
};
pub use pulse_hal::{CompareChannel, CompareTimer, HalError, Level, OutputLine, ToggleOutput};

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cycle configuration failed validation; the waveform was not started
    Config(ConfigError),
    /// A hardware capability call failed
    Hal(HalError),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<HalError> for Error {
    fn from(err: HalError) -> Self {
        Error::Hal(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "configuration error: {}", err),
            Error::Hal(err) => write!(f, "hardware error: {}", err),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Config(err) => defmt::write!(fmt, "Config({})", err),
            Error::Hal(err) => defmt::write!(fmt, "Hal({})", err),
        }
    }
}

/// Result type for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// One-call bring-up: validate the configuration, configure and start the
/// waveform on `line`, and hand back the controller together with a service
/// handle ready to pass to other contexts.
pub fn initialize<H>(
    hw: H,
    config: CycleConfig,
    requested: &RequestedThreshold,
    line: OutputLine,
) -> Result<(WaveformTimer<'_, H>, DutyCycle<'_>)>
where
    H: CompareTimer + ToggleOutput,
{
    let mut timer = WaveformTimer::new(hw, config, requested)?;
    timer.initialize(line)?;
    Ok((timer, DutyCycle::new(requested)))
}
