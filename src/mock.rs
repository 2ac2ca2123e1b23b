//! Test doubles for the hardware seams, used by the unit tests.

use heapless::Vec;

use crate::platform::{ConversionTarget, DioSnapshot, OutputBit, PsuPlatform};
use crate::status::StatusBank;

/// Records every collaborator call and lets tests script the hardware's
/// behavior.
pub struct MockPlatform {
    /// Outcome of driver bring-up.
    pub init_ok: bool,
    /// Outcome of driver self-tests.
    pub test_ok: bool,
    /// State of the power-good line reported by `read_dio`.
    pub power_good: bool,
    /// State of the external temperature protection.
    pub temperature_tripped: bool,

    save_enabled: bool,
    /// Completed (non-suppressed) profile saves.
    pub saves: usize,
    pub beeps: usize,

    pub conversions: Vec<(usize, ConversionTarget), 64>,
    pub voltage_codes: Vec<(usize, i16), 32>,
    pub current_codes: Vec<(usize, i16), 32>,
    pub bit_changes: Vec<(usize, OutputBit, bool), 64>,
    pub output_switches: Vec<(usize, bool), 32>,
    pub sense_switches: Vec<(usize, bool), 32>,
    pub mode_indications: Vec<(usize, bool, bool), 64>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            init_ok: true,
            test_ok: true,
            power_good: true,
            temperature_tripped: false,
            save_enabled: true,
            saves: 0,
            beeps: 0,
            conversions: Vec::new(),
            voltage_codes: Vec::new(),
            current_codes: Vec::new(),
            bit_changes: Vec::new(),
            output_switches: Vec::new(),
            sense_switches: Vec::new(),
            mode_indications: Vec::new(),
        }
    }
}

impl MockPlatform {
    /// The conversion most recently requested on a channel.
    pub fn last_conversion(&self, channel: usize) -> Option<ConversionTarget> {
        self.conversions
            .iter()
            .rev()
            .find(|(ch, _)| *ch == channel)
            .map(|(_, target)| *target)
    }

    /// The most recent change of one expander bit.
    pub fn last_bit(&self, channel: usize, bit: OutputBit) -> Option<bool> {
        self.bit_changes
            .iter()
            .rev()
            .find(|(ch, b, _)| *ch == channel && *b == bit)
            .map(|(_, _, value)| *value)
    }

    pub fn bit_change_count(&self, channel: usize, bit: OutputBit) -> usize {
        self.bit_changes
            .iter()
            .filter(|(ch, b, _)| *ch == channel && *b == bit)
            .count()
    }
}

impl PsuPlatform for MockPlatform {
    fn init_channel(&mut self, _channel: usize) -> bool {
        self.init_ok
    }

    fn test_channel(&mut self, _channel: usize) -> bool {
        self.test_ok
    }

    fn read_dio(&mut self, _channel: usize) -> DioSnapshot {
        DioSnapshot::from_bits(self.power_good, false, false)
    }

    fn start_conversion(&mut self, channel: usize, target: ConversionTarget) {
        self.conversions.push((channel, target)).ok();
    }

    fn set_voltage_code(&mut self, channel: usize, code: i16) {
        self.voltage_codes.push((channel, code)).ok();
    }

    fn set_current_code(&mut self, channel: usize, code: i16) {
        self.current_codes.push((channel, code)).ok();
    }

    fn change_bit(&mut self, channel: usize, bit: OutputBit, value: bool) {
        self.bit_changes.push((channel, bit, value)).ok();
    }

    fn switch_output(&mut self, channel: usize, enabled: bool) {
        self.output_switches.push((channel, enabled)).ok();
    }

    fn switch_sense(&mut self, channel: usize, enabled: bool) {
        self.sense_switches.push((channel, enabled)).ok();
    }

    fn indicate_mode(&mut self, channel: usize, cv: bool, cc: bool) {
        self.mode_indications.push((channel, cv, cc)).ok();
    }

    fn save(&mut self) {
        if self.save_enabled {
            self.saves += 1;
        }
    }

    fn enable_save(&mut self, enabled: bool) -> bool {
        core::mem::replace(&mut self.save_enabled, enabled)
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }

    fn is_temperature_tripped(&self, _channel: usize) -> bool {
        self.temperature_tripped
    }
}

/// Register bank retaining every bit update in order.
#[derive(Default)]
pub struct MockBank {
    pub questionable: Vec<(usize, u16, bool), 128>,
    pub operation: Vec<(usize, u16, bool), 128>,
}

impl MockBank {
    /// The last state written for a questionable mask, if any.
    pub fn questionable_state(&self, channel: usize, mask: u16) -> Option<bool> {
        self.questionable
            .iter()
            .rev()
            .find(|(ch, m, _)| *ch == channel && *m == mask)
            .map(|(_, _, on)| *on)
    }

    /// The last state written for an operation mask, if any.
    pub fn operation_state(&self, channel: usize, mask: u16) -> Option<bool> {
        self.operation
            .iter()
            .rev()
            .find(|(ch, m, _)| *ch == channel && *m == mask)
            .map(|(_, _, on)| *on)
    }
}

impl StatusBank for MockBank {
    fn set_questionable_bit(&mut self, channel: usize, mask: u16, on: bool) {
        self.questionable.push((channel, mask, on)).ok();
    }

    fn set_operation_bit(&mut self, channel: usize, mask: u16, on: bool) {
        self.operation.push((channel, mask, on)).ok();
    }
}

/// Delay that only records how long it was asked to block.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
