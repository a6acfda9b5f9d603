//! Simulated compare timer and toggle output
//!
//! A register-level model of the hardware capability set: free-running
//! counter, four compare channels, auto-clear shortcut, per-channel interrupt
//! enables, and a toggle task routable to compare events. Tests step it one
//! tick at a time and read back what the waveform did from its bounded logs.

use heapless::Vec;
use pulse_hal::{
    CompareChannel, CompareTimer, HalError, HalResult, Level, OutputLine, ToggleOutput,
};

const CHANNELS: usize = 4;

const ALL_CHANNELS: [CompareChannel; CHANNELS] = [
    CompareChannel::Ch0,
    CompareChannel::Ch1,
    CompareChannel::Ch2,
    CompareChannel::Ch3,
];

/// One output toggle, with the absolute tick it happened at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleRecord {
    /// Absolute tick count since start
    pub at: u64,
    /// Level after the toggle
    pub level: Level,
}

/// One compare-register write observed while the counter was running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareWrite {
    pub channel: CompareChannel,
    /// Counter value at the instant of the write
    pub counter: u32,
    pub value: u32,
}

/// Simulated timer plus toggle output
pub struct SimTimer {
    counter: u32,
    elapsed: u64,
    running: bool,
    prescaler: u8,
    compare: [u32; CHANNELS],
    auto_clear: [bool; CHANNELS],
    irq_enabled: [bool; CHANNELS],
    pending: [bool; CHANNELS],
    routed: [bool; CHANNELS],
    line: Option<OutputLine>,
    level: Level,
    /// Every output toggle since start
    pub toggles: Vec<ToggleRecord, 64>,
    /// Every compare write issued while running
    pub writes: Vec<CompareWrite, 32>,
}

impl SimTimer {
    pub fn new() -> Self {
        Self {
            counter: 0,
            elapsed: 0,
            running: false,
            prescaler: 0,
            compare: [0; CHANNELS],
            auto_clear: [false; CHANNELS],
            irq_enabled: [false; CHANNELS],
            pending: [false; CHANNELS],
            routed: [false; CHANNELS],
            line: None,
            level: Level::Low,
            toggles: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Advance the counter by one tick, firing compare events.
    ///
    /// Returns true when an interrupt-enabled channel matched; the caller is
    /// expected to invoke the controller's handler, exactly as the interrupt
    /// controller would.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.counter = self.counter.wrapping_add(1);
        self.elapsed += 1;

        let mut irq = false;
        for channel in ALL_CHANNELS {
            let idx = channel.index();
            if self.counter != self.compare[idx] {
                continue;
            }
            if self.routed[idx] {
                self.level = self.level.toggled();
                self.toggles
                    .push(ToggleRecord {
                        at: self.elapsed,
                        level: self.level,
                    })
                    .ok();
            }
            if self.irq_enabled[idx] {
                self.pending[idx] = true;
                irq = true;
            }
            if self.auto_clear[idx] {
                self.counter = 0;
            }
        }
        irq
    }

    /// Current counter value
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Absolute tick count since start
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Current output level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Configured prescaler
    pub fn prescaler(&self) -> u8 {
        self.prescaler
    }
}

impl Default for SimTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareTimer for SimTimer {
    fn set_prescaler(&mut self, prescaler: u8) -> HalResult<()> {
        if self.running {
            return Err(HalError::NotSupported);
        }
        self.prescaler = prescaler;
        Ok(())
    }

    fn set_compare(&mut self, channel: CompareChannel, value: u32) -> HalResult<()> {
        if self.running {
            self.writes
                .push(CompareWrite {
                    channel,
                    counter: self.counter,
                    value,
                })
                .ok();
        }
        self.compare[channel.index()] = value;
        Ok(())
    }

    fn compare(&self, channel: CompareChannel) -> u32 {
        self.compare[channel.index()]
    }

    fn enable_auto_clear(&mut self, channel: CompareChannel) -> HalResult<()> {
        self.auto_clear[channel.index()] = true;
        Ok(())
    }

    fn enable_compare_interrupt(&mut self, channel: CompareChannel) -> HalResult<()> {
        self.irq_enabled[channel.index()] = true;
        Ok(())
    }

    fn compare_event_pending(&self, channel: CompareChannel) -> bool {
        self.pending[channel.index()]
    }

    fn clear_compare_event(&mut self, channel: CompareChannel) -> HalResult<()> {
        self.pending[channel.index()] = false;
        Ok(())
    }

    fn start(&mut self) -> HalResult<()> {
        self.running = true;
        Ok(())
    }
}

impl ToggleOutput for SimTimer {
    fn configure_toggle(&mut self, line: OutputLine, initial: Level) -> HalResult<()> {
        // One toggle task per output line
        if self.line.is_some() {
            return Err(HalError::InvalidParameter);
        }
        self.line = Some(line);
        self.level = initial;
        Ok(())
    }

    fn route_compare(&mut self, channel: CompareChannel) -> HalResult<()> {
        if self.line.is_none() {
            return Err(HalError::InvalidParameter);
        }
        self.routed[channel.index()] = true;
        Ok(())
    }
}
