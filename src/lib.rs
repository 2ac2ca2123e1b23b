//! Measurement, calibration and protection core for a multi-channel
//! programmable power supply.
//!
//! This crate owns the per-channel state of the supply: commanded and
//! measured values, calibration correction, the over-voltage/over-current/
//! over-power protection engines and the output/sense enable protocol. The
//! enclosing firmware provides the board drivers (monitor ADC, setpoint DAC,
//! IO expander, backplane) and the two remote-control register banks through
//! the traits in [`platform`] and [`status`].
//!
//! The core is single-threaded and event-driven: hardware-completion events
//! are fed into [`psu::PowerSupply::service_conversion`], and a periodic
//! [`psu::PowerSupply::tick`] advances the one time-driven transition (the
//! delayed discharge-protection release). All timestamps are microseconds on
//! a monotonic clock supplied by the caller.

#![cfg_attr(not(test), no_std)]

pub mod calibration;
pub mod channel;
pub mod error;
pub mod linear_transformation;
pub mod params;
pub mod platform;
pub mod protection;
pub mod psu;
pub mod status;

#[cfg(test)]
mod mock;

pub use error::Error;

/// Monotonic microsecond timestamp used for all debounce and delay tracking.
pub type Instant = fugit::TimerInstantU64<1_000_000>;

/// Microsecond duration companion to [`Instant`].
pub type Duration = fugit::TimerDurationU64<1_000_000>;
