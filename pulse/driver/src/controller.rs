//! Waveform timer controller
//!
//! Owns the compare timer and toggle output. After `initialize` the hardware
//! produces the waveform on its own: the duty compare and the period compare
//! are both routed to the toggle task, and the period compare auto-clears the
//! counter. The processor is involved exactly once per cycle, at the
//! safe-update compare match, where the pending duty request is applied.

use crate::Result;
use pulse_core::{step, CycleConfig, CycleEvent, CyclePhase, RequestedThreshold};
use pulse_hal::{CompareChannel, CompareTimer, Level, OutputLine, ToggleOutput};

/// Channel roles on the underlying timer
const DUTY_CH: CompareChannel = CompareChannel::Ch0;
const PERIOD_CH: CompareChannel = CompareChannel::Ch1;
const SAFE_UPDATE_CH: CompareChannel = CompareChannel::Ch2;

/// Drives the continuous toggle waveform and applies duty-cycle changes only
/// at the safe instant of each cycle.
///
/// After [`initialize`](Self::initialize), [`on_compare_match`](Self::on_compare_match)
/// is the only code path that writes the duty compare register.
pub struct WaveformTimer<'a, H> {
    hw: H,
    config: CycleConfig,
    requested: &'a RequestedThreshold,
}

impl<'a, H> WaveformTimer<'a, H>
where
    H: CompareTimer + ToggleOutput,
{
    /// Take ownership of the hardware. Fails if the cycle boundaries are not
    /// strictly ordered; a misordered configuration must never start.
    pub fn new(hw: H, config: CycleConfig, requested: &'a RequestedThreshold) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            hw,
            config,
            requested,
        })
    }

    /// Configure the output line and the timer, then start the counter.
    ///
    /// The waveform begins immediately at minimum duty: the output starts
    /// high and falls at the low bound. Must be called exactly once. The
    /// whole sequence runs with interrupts masked so the safe-update handler
    /// cannot observe a half-configured timer.
    pub fn initialize(&mut self, line: OutputLine) -> Result<()> {
        // Requests made before bring-up are discarded; the waveform always
        // starts at minimum intensity.
        self.requested.store(self.config.low_bound);

        critical_section::with(|_| {
            self.hw.configure_toggle(line, Level::High)?;
            self.hw.route_compare(DUTY_CH)?;
            self.hw.route_compare(PERIOD_CH)?;

            self.hw.set_prescaler(self.config.prescaler)?;
            self.hw.set_compare(DUTY_CH, self.config.low_bound)?;
            self.hw.set_compare(PERIOD_CH, self.config.period)?;
            self.hw.set_compare(SAFE_UPDATE_CH, self.config.safe_update)?;

            self.hw.enable_auto_clear(PERIOD_CH)?;
            self.hw.enable_compare_interrupt(SAFE_UPDATE_CH)?;

            self.hw.start()?;
            Ok(())
        })
    }

    /// Compare-match interrupt handler.
    ///
    /// Clears the safe-update event, reads the pending request once, and
    /// loads the resolved threshold into the duty compare register. Runs to
    /// completion without blocking. Invocations with no pending safe-update
    /// event are ignored.
    pub fn on_compare_match(&mut self) -> Result<()> {
        if !self.hw.compare_event_pending(SAFE_UPDATE_CH) {
            return Ok(());
        }
        self.hw.clear_compare_event(SAFE_UPDATE_CH)?;

        let (_, load) = step(
            CyclePhase::Low,
            CycleEvent::SafeUpdateMatch,
            self.requested.load(),
            &self.config,
        );
        if let Some(threshold) = load {
            self.hw.set_compare(DUTY_CH, threshold.ticks())?;
        }
        Ok(())
    }

    /// The active cycle configuration
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Borrow the underlying hardware
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    /// Mutably borrow the underlying hardware
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    /// Release the underlying hardware
    pub fn release(self) -> H {
        self.hw
    }
}
