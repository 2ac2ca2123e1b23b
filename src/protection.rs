//! Channel protection engines.
//!
//! Each channel runs three independent trip state machines: over-voltage,
//! over-current and over-power. All three share one shape: a condition that
//! holds continuously for the configured delay latches a trip, which forces
//! the output off until explicitly cleared. A condition that releases before
//! the delay expires rewinds the engine completely.

use enum_iterator::Sequence;

use crate::params::ChannelParameters;
use crate::{Duration, Instant};

/// Fixed compensation for the measurement latency of the voltage and current
/// monitor paths, subtracted from their configured trip delays. The power
/// delay is exempt.
pub const DELAY_CORRECTION: Duration = Duration::millis(2);

/// The three protection kinds of a channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Sequence, serde::Serialize)]
pub enum ProtectionKind {
    OverVoltage,
    OverCurrent,
    OverPower,
}

/// State of one protection engine.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ProtectionState {
    /// No trip condition observed.
    #[default]
    Idle,

    /// The trip condition is being observed but has not yet held for the
    /// configured delay.
    Alarmed { since: Instant },

    /// Latched. Only an explicit clear or a channel reset leaves this state.
    Tripped,
}

/// One protection engine instance.
#[derive(Debug, Default, Copy, Clone)]
pub struct Protection {
    state: ProtectionState,
}

impl Protection {
    pub fn state(&self) -> ProtectionState {
        self.state
    }

    pub fn is_tripped(&self) -> bool {
        matches!(self.state, ProtectionState::Tripped)
    }

    pub fn is_alarmed(&self) -> bool {
        matches!(self.state, ProtectionState::Alarmed { .. })
    }

    /// Drop a latched trip or an in-progress alarm.
    pub fn clear(&mut self) {
        self.state = ProtectionState::Idle;
    }

    /// Advance the engine with a fresh observation of its trip condition.
    ///
    /// # Args
    /// * `armed` - The protection is enabled and the channel output is live.
    /// * `condition` - The kind-specific trip condition currently holds.
    /// * `delay` - Configured trip delay in seconds.
    /// * `correction` - Measurement-latency compensation for this kind.
    /// * `now` - Current monotonic timestamp.
    ///
    /// # Returns
    /// True exactly when this observation latched the trip; the caller then
    /// performs the trip side effects (output force-off, status, alert).
    pub(crate) fn step(
        &mut self,
        armed: bool,
        condition: bool,
        delay: f32,
        correction: Duration,
        now: Instant,
    ) -> bool {
        if !(armed && condition) {
            // A latched trip stays latched; a pending alarm rewinds.
            if self.is_alarmed() {
                self.state = ProtectionState::Idle;
            }
            return false;
        }

        match self.state {
            ProtectionState::Tripped => false,

            ProtectionState::Idle => {
                if delay > 0.0 {
                    self.state = ProtectionState::Alarmed { since: now };
                    false
                } else {
                    self.state = ProtectionState::Tripped;
                    true
                }
            }

            ProtectionState::Alarmed { since } => {
                let elapsed = now
                    .checked_duration_since(since)
                    .unwrap_or(Duration::from_ticks(0));
                // Rearranged from `elapsed >= delay - correction` so the
                // unsigned arithmetic cannot underflow.
                if elapsed + correction >= Duration::micros((delay * 1_000_000.0) as u64) {
                    self.state = ProtectionState::Tripped;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Operator-adjustable protection configuration of one channel.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProtectionConf {
    pub u_state: bool,
    pub i_state: bool,
    pub p_state: bool,

    /// Trip delays in seconds.
    pub u_delay: f32,
    pub i_delay: f32,
    pub p_delay: f32,

    /// Over-power trip level in watts.
    pub p_level: f32,
}

impl ProtectionConf {
    /// Configuration holding the channel's factory defaults.
    pub fn from_defaults(params: &ChannelParameters) -> Self {
        Self {
            u_state: params.ovp.enabled,
            i_state: params.ocp.enabled,
            p_state: params.opp.enabled,
            u_delay: params.ovp.default_delay,
            i_delay: params.ocp.default_delay,
            p_delay: params.opp.default_delay,
            p_level: params.opp.default_level,
        }
    }

    pub fn is_enabled(&self, kind: ProtectionKind) -> bool {
        match kind {
            ProtectionKind::OverVoltage => self.u_state,
            ProtectionKind::OverCurrent => self.i_state,
            ProtectionKind::OverPower => self.p_state,
        }
    }

    /// The configured trip delay of a kind, in seconds.
    pub fn delay(&self, kind: ProtectionKind) -> f32 {
        match kind {
            ProtectionKind::OverVoltage => self.u_delay,
            ProtectionKind::OverCurrent => self.i_delay,
            ProtectionKind::OverPower => self.p_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(us: u64) -> Instant {
        Instant::from_ticks(us)
    }

    #[test]
    fn zero_delay_trips_immediately() {
        let mut p = Protection::default();
        assert!(p.step(true, true, 0.0, DELAY_CORRECTION, at(0)));
        assert!(p.is_tripped());
    }

    #[test]
    fn disarmed_engine_never_trips() {
        let mut p = Protection::default();
        assert!(!p.step(false, true, 0.0, DELAY_CORRECTION, at(0)));
        assert_eq!(p.state(), ProtectionState::Idle);
    }

    #[test]
    fn delayed_trip_waits_full_delay() {
        let mut p = Protection::default();
        // 100 ms delay; the first observation only starts the alarm.
        assert!(!p.step(true, true, 0.1, DELAY_CORRECTION, at(0)));
        assert!(p.is_alarmed());

        // Well before the corrected deadline: still alarmed.
        assert!(!p.step(true, true, 0.1, DELAY_CORRECTION, at(50_000)));
        assert!(p.is_alarmed());

        // At delay - correction: trips.
        assert!(p.step(true, true, 0.1, DELAY_CORRECTION, at(98_000)));
        assert!(p.is_tripped());
    }

    #[test]
    fn power_delay_is_uncorrected() {
        let mut p = Protection::default();
        assert!(!p.step(true, true, 0.1, Duration::from_ticks(0), at(0)));
        assert!(!p.step(true, true, 0.1, Duration::from_ticks(0), at(99_000)));
        assert!(p.step(true, true, 0.1, Duration::from_ticks(0), at(100_000)));
    }

    #[test]
    fn condition_dropout_rewinds_debounce() {
        let mut p = Protection::default();
        assert!(!p.step(true, true, 0.1, DELAY_CORRECTION, at(0)));
        assert!(p.is_alarmed());

        // Condition releases before the deadline: back to idle.
        assert!(!p.step(true, false, 0.1, DELAY_CORRECTION, at(60_000)));
        assert_eq!(p.state(), ProtectionState::Idle);

        // A fresh continuous hold is required from scratch.
        assert!(!p.step(true, true, 0.1, DELAY_CORRECTION, at(70_000)));
        assert!(!p.step(true, true, 0.1, DELAY_CORRECTION, at(150_000)));
        assert!(p.step(true, true, 0.1, DELAY_CORRECTION, at(168_000)));
    }

    #[test]
    fn trip_is_latched_until_cleared() {
        let mut p = Protection::default();
        assert!(p.step(true, true, 0.0, DELAY_CORRECTION, at(0)));

        // Neither a released condition nor a re-held one moves the state.
        assert!(!p.step(true, false, 0.0, DELAY_CORRECTION, at(1)));
        assert!(p.is_tripped());
        assert!(!p.step(true, true, 0.0, DELAY_CORRECTION, at(2)));
        assert!(p.is_tripped());

        p.clear();
        assert_eq!(p.state(), ProtectionState::Idle);
    }

    #[test]
    fn defaults_follow_factory_parameters() {
        let params = ChannelParameters::default();
        let conf = ProtectionConf::from_defaults(&params);
        assert!(conf.u_state && conf.i_state && conf.p_state);
        assert_eq!(conf.p_level, params.opp.default_level);
        assert_eq!(conf.delay(ProtectionKind::OverCurrent), params.ocp.default_delay);
    }
}
