#![no_std]
#![forbid(unsafe_code)]

//! Hardware capability traits for the pulse waveform generator
//!
//! The driver needs exactly three capabilities from a platform: a free-running
//! counter with independent compare channels and an auto-clear-on-match
//! shortcut, an edge-toggle output that can be routed to compare events, and
//! an interrupt enable/clear mechanism for one compare channel. Any platform
//! exposing this set can host the driver unchanged; the in-tree simulator
//! implements it for host testing.

pub mod error;
pub mod timer;
pub mod toggle;

pub use error::{HalError, HalResult};
pub use timer::{CompareChannel, CompareTimer};
pub use toggle::{Level, OutputLine, ToggleOutput};
