//! Hardware seam definitions for the supply core.
//!
//! The core never touches board registers directly; every board effect goes
//! through [`PsuPlatform`], implemented by the enclosing firmware over its
//! IO expander, monitor ADC, setpoint DAC and backplane drivers. One
//! platform object mediates all channels, addressed per call.

use bit_field::BitField;
use enum_iterator::Sequence;

/// Lowest code produced by the monitor converter.
pub const ADC_MIN: i16 = 0;

/// Highest code produced by the monitor converter.
pub const ADC_MAX: i16 = 32767;

/// Worst-case duration of a single conversion, used to bound synchronous reads.
pub const ADC_TIMEOUT_MS: u32 = 10;

/// One conversion target of the per-channel monitor converter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Sequence, serde::Serialize)]
pub enum ConversionTarget {
    /// Output voltage monitor.
    VoltageMonitor,

    /// Output current monitor.
    CurrentMonitor,

    /// Readback of the voltage setpoint DAC.
    VoltageSetpoint,

    /// Readback of the current setpoint DAC.
    CurrentSetpoint,
}

/// A named output bit on the channel's IO expander.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputBit {
    /// Drives the channel power stage on/off.
    OutputEnable,

    /// Keeps the down-programmer engaged while asserted. Active the whole
    /// time the output is enabled and released only after the post-disable
    /// bleed-down delay.
    DischargeProtection,
}

const DIO_BIT_POWER_GOOD: usize = 0;
const DIO_BIT_CV_ACTIVE: usize = 1;
const DIO_BIT_CC_ACTIVE: usize = 2;

/// Digital status bits captured by the IO expander alongside each conversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DioSnapshot(pub u8);

impl DioSnapshot {
    /// Compose a snapshot from individual status lines.
    pub fn from_bits(power_good: bool, cv_active: bool, cc_active: bool) -> Self {
        let mut word = 0u8;
        word.set_bit(DIO_BIT_POWER_GOOD, power_good);
        word.set_bit(DIO_BIT_CV_ACTIVE, cv_active);
        word.set_bit(DIO_BIT_CC_ACTIVE, cc_active);
        DioSnapshot(word)
    }

    /// The channel power rail is within regulation.
    pub fn power_good(&self) -> bool {
        self.0.get_bit(DIO_BIT_POWER_GOOD)
    }

    /// The regulation loop is in constant-voltage mode.
    pub fn cv_active(&self) -> bool {
        self.0.get_bit(DIO_BIT_CV_ACTIVE)
    }

    /// The regulation loop is in constant-current mode.
    pub fn cc_active(&self) -> bool {
        self.0.get_bit(DIO_BIT_CC_ACTIVE)
    }
}

/// Outcome of a channel's hardware self-test.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
pub enum TestResult {
    /// Self-test has not been run since power-up.
    Unknown,

    /// All channel drivers passed.
    Ok,

    /// At least one channel driver failed.
    Failed,
}

/// Board services consumed by the supply core.
///
/// Per-channel operations take the channel index; the implementation routes
/// them to the matching hardware (typically via a bus multiplexer). All
/// operations are best-effort from the core's point of view: driver-level
/// failures surface through `test_channel`, not through per-call results.
pub trait PsuPlatform {
    /// Bring up the channel's drivers. Returns false if any failed.
    fn init_channel(&mut self, channel: usize) -> bool;

    /// Run the channel's driver self-tests. Returns false if any failed.
    fn test_channel(&mut self, channel: usize) -> bool;

    /// Read the current digital status lines of the channel.
    fn read_dio(&mut self, channel: usize) -> DioSnapshot;

    /// Begin a single conversion; the result arrives asynchronously through
    /// [`crate::psu::PowerSupply::service_conversion`].
    fn start_conversion(&mut self, channel: usize, target: ConversionTarget);

    /// Load the voltage setpoint DAC with an already-clamped code.
    fn set_voltage_code(&mut self, channel: usize, code: i16);

    /// Load the current setpoint DAC with an already-clamped code.
    fn set_current_code(&mut self, channel: usize, code: i16);

    /// Set one named IO expander output bit.
    fn change_bit(&mut self, channel: usize, bit: OutputBit, value: bool);

    /// Notify the backplane load switch of an output transition.
    fn switch_output(&mut self, channel: usize, enabled: bool);

    /// Notify the backplane sense relay of a remote-sensing transition.
    fn switch_sense(&mut self, channel: usize, enabled: bool);

    /// Drive the front-panel CV/CC mode indicators.
    fn indicate_mode(&mut self, channel: usize, cv: bool, cc: bool);

    /// Persist the supply profile. Fire-and-forget.
    fn save(&mut self);

    /// Enable or suppress profile saving, returning the previous setting.
    fn enable_save(&mut self, enabled: bool) -> bool;

    /// Emit the protection-trip alert tone.
    fn beep(&mut self);

    /// Whether the external temperature protection has tripped this channel.
    fn is_temperature_tripped(&self, channel: usize) -> bool;
}
