//! Remote-control status propagation.
//!
//! Mode, enable and protection-trip state is summarized as bits in two
//! SCPI-style registers per channel: a questionable-status group and an
//! operation-status group. The supply exposes two physically distinct
//! remote-control transports, each with its own register bank; both must
//! report identical state, so every update is mirrored.

use crate::protection::ProtectionKind;

/// Voltage output is unregulated (channel is current-limited).
pub const QUES_VOLT: u16 = 1 << 0;

/// Current output is unregulated (channel is voltage-regulated).
pub const QUES_CURR: u16 = 1 << 1;

/// Over-voltage protection has tripped.
pub const QUES_OVP: u16 = 1 << 2;

/// Over-current protection has tripped.
pub const QUES_OCP: u16 = 1 << 3;

/// Over-power protection has tripped.
pub const QUES_OPP: u16 = 1 << 4;

/// Channel is regulating in constant-voltage mode.
pub const OPER_CV: u16 = 1 << 0;

/// Channel is regulating in constant-current mode.
pub const OPER_CC: u16 = 1 << 1;

/// Channel output is disabled.
pub const OPER_OUTPUT_OFF: u16 = 1 << 2;

/// Discharge-protection signal is released.
pub const OPER_DP_OFF: u16 = 1 << 3;

/// Remote sensing is active.
pub const OPER_SENSE_ON: u16 = 1 << 4;

/// The questionable-status mask latched when a protection kind trips.
pub fn questionable_mask(kind: ProtectionKind) -> u16 {
    match kind {
        ProtectionKind::OverVoltage => QUES_OVP,
        ProtectionKind::OverCurrent => QUES_OCP,
        ProtectionKind::OverPower => QUES_OPP,
    }
}

/// One remote-control register bank.
pub trait StatusBank {
    /// Set or clear bits in the channel's questionable-status group.
    fn set_questionable_bit(&mut self, channel: usize, mask: u16, on: bool);

    /// Set or clear bits in the channel's operation-status group.
    fn set_operation_bit(&mut self, channel: usize, mask: u16, on: bool);
}

/// Duplicates register updates to the two remote-control banks.
///
/// The primary bank is always updated. The secondary transport runs its own
/// self-test at startup; until that passes, updates to it are skipped.
pub struct StatusMirror<B> {
    primary: B,
    secondary: B,
    secondary_alive: bool,
}

impl<B: StatusBank> StatusMirror<B> {
    pub fn new(primary: B, secondary: B) -> Self {
        Self {
            primary,
            secondary,
            secondary_alive: false,
        }
    }

    /// Record the outcome of the secondary transport's self-test.
    pub fn set_secondary_alive(&mut self, alive: bool) {
        self.secondary_alive = alive;
    }

    /// Push a questionable-status change to both banks.
    pub fn set_questionable(&mut self, channel: usize, mask: u16, on: bool) {
        self.primary.set_questionable_bit(channel, mask, on);
        if self.secondary_alive {
            self.secondary.set_questionable_bit(channel, mask, on);
        }
    }

    /// Push an operation-status change to both banks.
    pub fn set_operation(&mut self, channel: usize, mask: u16, on: bool) {
        self.primary.set_operation_bit(channel, mask, on);
        if self.secondary_alive {
            self.secondary.set_operation_bit(channel, mask, on);
        }
    }

    pub fn primary(&self) -> &B {
        &self.primary
    }

    pub fn secondary(&self) -> &B {
        &self.secondary
    }
}
