//! Per-channel state and measurement mapping.

use crate::calibration::CalibrationConf;
use crate::linear_transformation::LinearTransformation;
use crate::params::{ChannelParameters, Quantity};
use crate::platform::{ConversionTarget, TestResult, ADC_MAX, ADC_MIN};
use crate::protection::{Protection, ProtectionConf, ProtectionKind};
use crate::Instant;

/// Monitor/setpoint deviation below which a regulation mode is considered
/// well-tracked by the protection guard terms: 10 mV / 10 mA.
const MODE_GUARD_DEVIATION: f32 = 0.01;

/// Commanded and measured state of one regulated quantity.
#[derive(Debug, Default, Copy, Clone, serde::Serialize)]
pub struct Value {
    /// Commanded setpoint.
    pub set: f32,

    /// Last calibrated monitor reading.
    pub mon: f32,

    /// Last calibrated setpoint-DAC readback.
    pub mon_dac: f32,

    /// Adjustment granularity used by the front panel.
    pub step: f32,
}

impl Value {
    fn init(&mut self, default_step: f32) {
        *self = Value {
            set: 0.0,
            mon: 0.0,
            mon_dac: 0.0,
            step: default_step,
        };
    }
}

/// Channel state flags.
///
/// `cv_mode` and `cc_mode` are both forced false whenever the output is
/// disabled; the mode setters uphold this.
#[derive(Debug, Default, Copy, Clone, serde::Serialize)]
pub struct Flags {
    pub output_enabled: bool,
    pub sense_enabled: bool,
    pub cv_mode: bool,
    pub cc_mode: bool,
    pub power_ok: bool,
    pub cal_enabled: bool,
}

/// Serializable snapshot of a channel for the remote-control layers.
#[derive(Debug, Copy, Clone, serde::Serialize)]
pub struct ChannelStatus {
    pub u_set: f32,
    pub u_mon: f32,
    pub u_mon_dac: f32,
    pub i_set: f32,
    pub i_mon: f32,
    pub i_mon_dac: f32,
    pub power: f32,
    pub flags: Flags,
    pub ovp_tripped: bool,
    pub ocp_tripped: bool,
    pub opp_tripped: bool,
}

/// One physical output channel.
///
/// Owns all mutable channel state; hardware effects are orchestrated by
/// [`crate::psu::PowerSupply`], which holds the channel collection.
pub struct Channel {
    index: usize,
    params: ChannelParameters,

    pub u: Value,
    pub i: Value,

    pub(crate) ovp: Protection,
    pub(crate) ocp: Protection,
    pub(crate) opp: Protection,

    pub prot_conf: ProtectionConf,
    pub cal_conf: CalibrationConf,

    pub(crate) flags: Flags,
    pub(crate) test_result: TestResult,

    /// The conversion most recently started on the monitor converter.
    pub(crate) acquisition: ConversionTarget,

    /// Armed when the output is disabled; the discharge-protection signal is
    /// released once the bleed-down period has elapsed.
    pub(crate) delayed_dp_off: Option<Instant>,
}

impl Channel {
    pub fn new(index: usize, params: ChannelParameters) -> Self {
        let mut channel = Self {
            index,
            params,
            u: Value::default(),
            i: Value::default(),
            ovp: Protection::default(),
            ocp: Protection::default(),
            opp: Protection::default(),
            prot_conf: ProtectionConf::from_defaults(&params),
            cal_conf: CalibrationConf::cleared(&params),
            flags: Flags::default(),
            test_result: TestResult::Unknown,
            acquisition: ConversionTarget::VoltageMonitor,
            delayed_dp_off: None,
        };
        channel.u.init(params.u.default_step);
        channel.i.init(params.i.default_step);
        channel
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn params(&self) -> &ChannelParameters {
        &self.params
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Restore all mutable state to factory defaults.
    ///
    /// Hardware-facing parts of a reset (status registers, sense relay) are
    /// handled by the supply; this clears the state proper.
    pub(crate) fn reset_state(&mut self) {
        self.flags.output_enabled = false;
        self.flags.sense_enabled = false;
        self.flags.cv_mode = false;
        self.flags.cc_mode = false;
        self.flags.power_ok = false;

        self.flags.cal_enabled = self.cal_conf.exists();

        self.ovp.clear();
        self.ocp.clear();
        self.opp.clear();
        self.prot_conf = ProtectionConf::from_defaults(&self.params);

        self.u.init(self.params.u.default_step);
        self.i.init(self.params.i.default_step);

        self.delayed_dp_off = None;
        self.acquisition = ConversionTarget::VoltageMonitor;
    }

    pub fn value(&self, quantity: Quantity) -> &Value {
        match quantity {
            Quantity::Voltage => &self.u,
            Quantity::Current => &self.i,
        }
    }

    pub(crate) fn value_mut(&mut self, quantity: Quantity) -> &mut Value {
        match quantity {
            Quantity::Voltage => &mut self.u,
            Quantity::Current => &mut self.i,
        }
    }

    pub fn protection(&self, kind: ProtectionKind) -> &Protection {
        match kind {
            ProtectionKind::OverVoltage => &self.ovp,
            ProtectionKind::OverCurrent => &self.ocp,
            ProtectionKind::OverPower => &self.opp,
        }
    }

    pub(crate) fn protection_mut(&mut self, kind: ProtectionKind) -> &mut Protection {
        match kind {
            ProtectionKind::OverVoltage => &mut self.ovp,
            ProtectionKind::OverCurrent => &mut self.ocp,
            ProtectionKind::OverPower => &mut self.opp,
        }
    }

    /// The factory mapping between converter codes and engineering units.
    fn factory_transform(&self, quantity: Quantity) -> LinearTransformation {
        let params = match quantity {
            Quantity::Voltage => &self.params.u,
            Quantity::Current => &self.params.i,
        };
        LinearTransformation::from_points(ADC_MIN as f32, params.min, ADC_MAX as f32, params.max)
    }

    /// Map a raw converter code into factory-scale engineering units.
    pub fn code_to_value(&self, quantity: Quantity, code: i16) -> f32 {
        self.factory_transform(quantity).map(code as f32)
    }

    /// Map an engineering-unit level into an actuator code, clamped to the
    /// converter's signed full-scale range.
    pub fn value_to_code(&self, quantity: Quantity, value: f32) -> i16 {
        let code = libm::roundf(self.factory_transform(quantity).invert(value));
        code.clamp(-(ADC_MAX as f32) - 1.0, ADC_MAX as f32) as i16
    }

    /// Apply the read-direction calibration correction to a factory-mapped
    /// reading. Falls back to the uncorrected reading while calibration is
    /// not enabled.
    pub(crate) fn reading_to_calibrated(&self, quantity: Quantity, reading: f32) -> f32 {
        if !self.flags.cal_enabled {
            return reading;
        }

        let table = self.cal_conf.table(quantity);
        LinearTransformation::from_points(
            table.min.adc,
            table.min.val,
            table.max.adc,
            table.max.val,
        )
        .map(reading)
    }

    /// Apply the write-direction calibration correction to a commanded
    /// setpoint before the factory actuator remap.
    pub(crate) fn setpoint_to_actuator(&self, quantity: Quantity, value: f32) -> f32 {
        if !self.flags.cal_enabled {
            return value;
        }

        let table = self.cal_conf.table(quantity);
        LinearTransformation::from_points(
            table.min.val,
            table.min.dac,
            table.max.val,
            table.max.dac,
        )
        .map(value)
    }

    /// Evaluate the kind-specific trip condition against the latest state.
    ///
    /// The OVP/OCP guard terms tolerate the complementary mode as long as
    /// its quantity still tracks the setpoint, which suppresses false trips
    /// from startup transients in normal regulation.
    pub(crate) fn protection_condition(&self, kind: ProtectionKind) -> bool {
        match kind {
            ProtectionKind::OverVoltage => {
                self.flags.cv_mode
                    && (!self.flags.cc_mode
                        || libm::fabsf(self.i.mon - self.i.set) >= MODE_GUARD_DEVIATION)
            }
            ProtectionKind::OverCurrent => {
                self.flags.cc_mode
                    && (!self.flags.cv_mode
                        || libm::fabsf(self.u.mon - self.u.set) >= MODE_GUARD_DEVIATION)
            }
            ProtectionKind::OverPower => self.u.mon * self.i.mon > self.prot_conf.p_level,
        }
    }

    pub fn is_test_ok(&self) -> bool {
        self.test_result == TestResult::Ok
    }

    pub fn is_test_failed(&self) -> bool {
        self.test_result == TestResult::Failed
    }

    pub fn is_calibration_exists(&self) -> bool {
        self.cal_conf.exists()
    }

    /// Snapshot the channel for status reporting.
    pub fn status(&self) -> ChannelStatus {
        ChannelStatus {
            u_set: self.u.set,
            u_mon: self.u.mon,
            u_mon_dac: self.u.mon_dac,
            i_set: self.i.set,
            i_mon: self.i.mon,
            i_mon_dac: self.i.mon_dac,
            power: self.u.mon * self.i.mon,
            flags: self.flags,
            ovp_tripped: self.ovp.is_tripped(),
            ocp_tripped: self.ocp.is_tripped(),
            opp_tripped: self.opp.is_tripped(),
        }
    }
}
