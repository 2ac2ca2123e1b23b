//! The power-supply controller.
//!
//! [`PowerSupply`] owns the channel collection, the board platform and the
//! status mirror, and implements the control protocol on top of them: the
//! measurement acquisition cycle, the protection engine invocation, the
//! output/sense enable sequencing with its delayed discharge-protection
//! release, and the channel lifecycle (init/test/reset/update/power-down).
//!
//! Execution is single-threaded and event-driven. Hardware-completion
//! events enter through [`PowerSupply::service_conversion`]; the periodic
//! [`PowerSupply::tick`] drives the only time-based transition. Callers
//! supply the current monotonic timestamp.

use embedded_hal::delay::DelayNs;
use enum_iterator::all;
use log::{debug, error, info, warn};

use crate::calibration::{CalibrationLevel, CalibrationSession};
use crate::channel::{Channel, ChannelStatus};
use crate::error::Error;
use crate::params::{ChannelParameters, Quantity};
use crate::platform::{
    ConversionTarget, DioSnapshot, OutputBit, PsuPlatform, TestResult, ADC_TIMEOUT_MS,
};
use crate::protection::{ProtectionKind, DELAY_CORRECTION};
use crate::status::{self, StatusBank, StatusMirror};
use crate::{Duration, Instant};

/// Bleed-down period between disabling an output and releasing its
/// discharge-protection signal.
pub const DP_OFF_DELAY: Duration = Duration::secs(10);

/// The supply controller: `N` channels, the board platform and the two
/// remote-control status banks.
pub struct PowerSupply<P, B, const N: usize> {
    channels: [Channel; N],
    platform: P,
    status: StatusMirror<B>,
    powered_up: bool,
    calibration: Option<CalibrationSession>,
}

impl<P: PsuPlatform, B: StatusBank, const N: usize> PowerSupply<P, B, N> {
    /// Construct the supply from static channel configuration.
    pub fn new(platform: P, status: StatusMirror<B>, params: [ChannelParameters; N]) -> Self {
        Self {
            channels: core::array::from_fn(|index| Channel::new(index, params[index])),
            platform,
            status,
            powered_up: false,
            calibration: None,
        }
    }

    pub fn channel(&self, index: usize) -> &Channel {
        &self.channels[index]
    }

    pub fn channel_count(&self) -> usize {
        N
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn status_mirror(&self) -> &StatusMirror<B> {
        &self.status
    }

    /// Record the outcome of the secondary remote interface's self-test.
    pub fn set_secondary_status_alive(&mut self, alive: bool) {
        self.status.set_secondary_alive(alive);
    }

    pub fn is_powered_up(&self) -> bool {
        self.powered_up
    }

    /// The channel is fully operational: supply powered up, power rail
    /// confirmed good and self-test passed.
    pub fn is_ok(&self, index: usize) -> bool {
        self.powered_up && self.channels[index].flags.power_ok && self.channels[index].is_test_ok()
    }

    pub fn is_output_enabled(&self, index: usize) -> bool {
        self.powered_up && self.channels[index].flags.output_enabled
    }

    pub fn is_remote_sensing_enabled(&self, index: usize) -> bool {
        self.channels[index].flags.sense_enabled
    }

    /// Any protection latched, including the external temperature guard.
    pub fn is_tripped(&self, index: usize) -> bool {
        let ch = &self.channels[index];
        ch.ovp.is_tripped()
            || ch.ocp.is_tripped()
            || ch.opp.is_tripped()
            || self.platform.is_temperature_tripped(index)
    }

    pub fn channel_status(&self, index: usize) -> ChannelStatus {
        self.channels[index].status()
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Bring the supply up: initialize, reset and self-test every channel.
    ///
    /// Returns true when every channel came up operational.
    pub fn boot(&mut self, now: Instant) -> bool {
        self.powered_up = true;

        let ok = self.with_save_suppressed(|psu| {
            let mut ok = true;
            for index in 0..N {
                ok &= psu.init(index);
                psu.reset(index, now);
                ok &= psu.test(index, now);
            }
            ok
        });
        self.platform.save();

        ok
    }

    /// Bring up the channel's hardware drivers.
    pub fn init(&mut self, index: usize) -> bool {
        self.with_save_suppressed(|psu| {
            let ok = psu.platform.init_channel(index);

            let dio = psu.platform.read_dio(index);
            psu.channels[index].flags.power_ok = dio.power_good();

            if ok {
                info!("channel {}: drivers initialized", index);
            }
            ok
        })
    }

    /// Run the channel's self-test.
    ///
    /// Output and sensing are forced off first; on success the factory
    /// default setpoints are applied. The outcome gates all further enable
    /// requests.
    pub fn test(&mut self, index: usize, now: Instant) -> bool {
        self.with_save_suppressed(|psu| {
            psu.set_output_enabled(index, false, now);
            psu.set_remote_sensing_enabled(index, false);

            let passed = psu.platform.test_channel(index);
            psu.channels[index].test_result = if passed {
                TestResult::Ok
            } else {
                TestResult::Failed
            };

            let dio = psu.platform.read_dio(index);
            psu.channels[index].flags.power_ok = dio.power_good();

            if psu.is_ok(index) {
                let params = *psu.channels[index].params();
                psu.set_voltage(index, params.u.default).ok();
                psu.set_current(index, params.i.default).ok();
            } else {
                warn!("channel {}: self-test failed", index);
            }
        });
        self.platform.save();

        self.is_ok(index)
    }

    /// Restore the channel's mutable state to factory defaults.
    pub fn reset(&mut self, index: usize, now: Instant) {
        self.with_save_suppressed(|psu| {
            if psu.channels[index].flags.output_enabled {
                psu.do_output_enable(index, false, now);
            }
            if psu.channels[index].flags.sense_enabled {
                psu.do_remote_sensing_enable(index, false);
            }

            psu.channels[index].reset_state();
            psu.clear_protection(index);
        });
        self.platform.save();
    }

    /// Reapply the channel's stored state after a profile load.
    pub fn update(&mut self, index: usize, now: Instant) {
        self.with_save_suppressed(|psu| {
            let (u_set, i_set) = (psu.channels[index].u.set, psu.channels[index].i.set);
            psu.set_voltage(index, u_set).ok();
            psu.set_current(index, i_set).ok();

            let flags = psu.channels[index].flags;
            psu.do_output_enable(index, flags.output_enabled, now);
            psu.do_remote_sensing_enable(index, flags.sense_enabled);
        });
    }

    /// Force every channel off and leave the powered-up state.
    pub fn power_down(&mut self, now: Instant) {
        self.with_save_suppressed(|psu| {
            for index in 0..N {
                psu.set_output_enabled(index, false, now);
                psu.set_remote_sensing_enabled(index, false);
            }
        });
        self.powered_up = false;
    }

    // ---------------------------------------------------------------------
    // Output / sense control protocol
    // ---------------------------------------------------------------------

    /// Enable or disable the channel output.
    ///
    /// A no-op when the output is already in the requested state. Enable
    /// requests on a non-operational channel are refused silently; callers
    /// observe the outcome through [`PowerSupply::is_output_enabled`].
    pub fn set_output_enabled(&mut self, index: usize, enable: bool, now: Instant) {
        if enable == self.channels[index].flags.output_enabled {
            return;
        }

        self.do_output_enable(index, enable, now);

        if self.channels[index].flags.output_enabled == enable {
            self.platform.save();
        }
    }

    /// Enable or disable remote voltage sensing.
    pub fn set_remote_sensing_enabled(&mut self, index: usize, enable: bool) {
        if enable == self.channels[index].flags.sense_enabled {
            return;
        }

        self.do_remote_sensing_enable(index, enable);

        if self.channels[index].flags.sense_enabled == enable {
            self.platform.save();
        }
    }

    fn do_output_enable(&mut self, index: usize, enable: bool, now: Instant) {
        if enable && !self.is_ok(index) {
            return;
        }

        self.channels[index].flags.output_enabled = enable;

        self.platform.change_bit(index, OutputBit::OutputEnable, enable);
        self.platform.switch_output(index, enable);

        if enable {
            // Restart the acquisition cycle at the voltage monitor.
            self.start_conversion(index, ConversionTarget::VoltageMonitor);
        } else {
            self.set_cv_mode(index, false, now);
            self.set_cc_mode(index, false, now);

            if self.calibration.as_ref().map(CalibrationSession::channel) == Some(index) {
                self.stop_calibration();
            }
        }

        if enable {
            self.channels[index].delayed_dp_off = None;
            self.do_dp_enable(index, true);
        } else {
            // Released only after the bleed-down period, from `tick`.
            self.channels[index].delayed_dp_off = Some(now);
        }

        self.status
            .set_operation(index, status::OPER_OUTPUT_OFF, !enable);
    }

    fn do_remote_sensing_enable(&mut self, index: usize, enable: bool) {
        if enable && !self.is_ok(index) {
            return;
        }

        self.channels[index].flags.sense_enabled = enable;
        self.platform.switch_sense(index, enable);
        self.status.set_operation(index, status::OPER_SENSE_ON, enable);
    }

    fn do_dp_enable(&mut self, index: usize, enable: bool) {
        // The discharge-protection bit is active low at the expander.
        self.platform
            .change_bit(index, OutputBit::DischargeProtection, !enable);
        self.status.set_operation(index, status::OPER_DP_OFF, !enable);
    }

    /// Advance the delayed-disable timers. The only time-driven transition
    /// in the core.
    pub fn tick(&mut self, now: Instant) {
        for index in 0..N {
            if let Some(armed_at) = self.channels[index].delayed_dp_off {
                let elapsed = now
                    .checked_duration_since(armed_at)
                    .map_or(false, |d| d >= DP_OFF_DELAY);
                if elapsed {
                    self.channels[index].delayed_dp_off = None;
                    self.do_dp_enable(index, false);
                }
            }
        }
    }

    // ---------------------------------------------------------------------
    // Setpoints
    // ---------------------------------------------------------------------

    /// Command a new voltage setpoint.
    pub fn set_voltage(&mut self, index: usize, value: f32) -> Result<(), Error> {
        self.apply_setpoint(index, Quantity::Voltage, value)
    }

    /// Command a new current setpoint.
    pub fn set_current(&mut self, index: usize, value: f32) -> Result<(), Error> {
        self.apply_setpoint(index, Quantity::Current, value)
    }

    fn apply_setpoint(&mut self, index: usize, quantity: Quantity, value: f32) -> Result<(), Error> {
        let code = {
            let ch = &mut self.channels[index];
            let params = match quantity {
                Quantity::Voltage => &ch.params().u,
                Quantity::Current => &ch.params().i,
            };
            if !(params.min..=params.max).contains(&value) {
                return Err(Error::Bounds);
            }

            ch.value_mut(quantity).set = value;
            // The readback mirror is stale until the next setpoint read.
            ch.value_mut(quantity).mon_dac = 0.0;

            let corrected = ch.setpoint_to_actuator(quantity, value);
            ch.value_to_code(quantity, corrected)
        };

        match quantity {
            Quantity::Voltage => self.platform.set_voltage_code(index, code),
            Quantity::Current => self.platform.set_current_code(index, code),
        }
        self.platform.save();

        Ok(())
    }

    /// Configure the front-panel adjustment step of one quantity.
    pub fn set_step(&mut self, index: usize, quantity: Quantity, step: f32) -> Result<(), Error> {
        let params = *self.channels[index].params();
        let q = match quantity {
            Quantity::Voltage => params.u,
            Quantity::Current => params.i,
        };
        if !(q.min_step..=q.max_step).contains(&step) {
            return Err(Error::Bounds);
        }

        self.channels[index].value_mut(quantity).step = step;
        self.platform.save();

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Measurement acquisition cycle
    // ---------------------------------------------------------------------

    /// Service one hardware-completion event: digital status lines plus the
    /// finished conversion's code.
    ///
    /// Advances the acquisition cycle, re-derives the CV/CC mode flags and
    /// re-checks the affected protections. A power-rail fault forces the
    /// supply-wide power-down path and is reported to the caller.
    pub fn service_conversion(
        &mut self,
        index: usize,
        dio: DioSnapshot,
        code: i16,
        now: Instant,
    ) -> Result<(), Error> {
        if !self.powered_up {
            return Ok(());
        }

        if !dio.power_good() {
            error!("channel {}: power rail fault", index);
            self.channels[index].flags.power_ok = false;
            self.power_down(now);
            return Err(Error::ChannelFault);
        }

        let next = self.on_conversion_complete(index, code, now);

        // Modes are re-derived before the next conversion is requested.
        self.set_cv_mode(index, dio.cv_active(), now);
        self.set_cc_mode(index, dio.cc_active(), now);

        if let Some(target) = next {
            self.start_conversion(index, target);
        }

        Ok(())
    }

    fn on_conversion_complete(
        &mut self,
        index: usize,
        code: i16,
        now: Instant,
    ) -> Option<ConversionTarget> {
        match self.channels[index].acquisition {
            ConversionTarget::VoltageMonitor => {
                self.add_monitor_reading(index, Quantity::Voltage, code, now);
                Some(ConversionTarget::CurrentMonitor)
            }

            ConversionTarget::CurrentMonitor => {
                self.add_monitor_reading(index, Quantity::Current, code, now);
                if self.is_output_enabled(index) {
                    Some(ConversionTarget::VoltageMonitor)
                } else {
                    // Monitors are meaningless with the output off; read the
                    // setpoint DACs back instead.
                    self.channels[index].u.mon = 0.0;
                    self.channels[index].i.mon = 0.0;
                    Some(ConversionTarget::VoltageSetpoint)
                }
            }

            ConversionTarget::VoltageSetpoint => {
                self.add_readback_reading(index, Quantity::Voltage, code);
                Some(ConversionTarget::CurrentSetpoint)
            }

            ConversionTarget::CurrentSetpoint => {
                self.add_readback_reading(index, Quantity::Current, code);
                // With the output off the cycle idles until it is re-armed
                // by an enable or a synchronous read.
                self.is_output_enabled(index)
                    .then_some(ConversionTarget::VoltageMonitor)
            }
        }
    }

    fn add_monitor_reading(&mut self, index: usize, quantity: Quantity, code: i16, now: Instant) {
        let ch = &mut self.channels[index];
        let reading = ch.code_to_value(quantity, code);
        let calibrated = ch.reading_to_calibrated(quantity, reading);
        ch.value_mut(quantity).mon = calibrated;

        // Power depends on both monitors; re-check on every update.
        self.protection_check(index, ProtectionKind::OverPower, now);
    }

    fn add_readback_reading(&mut self, index: usize, quantity: Quantity, code: i16) {
        let ch = &mut self.channels[index];
        let reading = ch.code_to_value(quantity, code);
        let calibrated = ch.reading_to_calibrated(quantity, reading);
        ch.value_mut(quantity).mon_dac = calibrated;
    }

    fn start_conversion(&mut self, index: usize, target: ConversionTarget) {
        self.channels[index].acquisition = target;
        self.platform.start_conversion(index, target);
    }

    /// Synchronously refresh the setpoint readbacks.
    ///
    /// Blocks for a bounded period; completion events delivered meanwhile
    /// walk the cycle through both setpoint conversions.
    pub fn read_setpoints_blocking(&mut self, index: usize, delay: &mut impl DelayNs) {
        self.start_conversion(index, ConversionTarget::VoltageSetpoint);
        delay.delay_ms(ADC_TIMEOUT_MS * 2);
    }

    /// Synchronously refresh every reading of the channel.
    pub fn read_all_blocking(&mut self, index: usize, delay: &mut impl DelayNs) {
        if self.is_output_enabled(index) {
            self.start_conversion(index, ConversionTarget::VoltageSetpoint);
            delay.delay_ms(ADC_TIMEOUT_MS * 3);
        } else {
            self.start_conversion(index, ConversionTarget::VoltageMonitor);
            delay.delay_ms(ADC_TIMEOUT_MS * 4);
        }
    }

    // ---------------------------------------------------------------------
    // Mode derivation
    // ---------------------------------------------------------------------

    fn set_cv_mode(&mut self, index: usize, mode: bool, now: Instant) {
        let mode = mode && self.is_output_enabled(index);

        if mode != self.channels[index].flags.cv_mode {
            self.channels[index].flags.cv_mode = mode;

            let flags = self.channels[index].flags;
            self.platform.indicate_mode(index, flags.cv_mode, flags.cc_mode);
            self.status.set_operation(index, status::OPER_CV, mode);
            // While voltage-regulated, the current output is unregulated.
            self.status.set_questionable(index, status::QUES_CURR, mode);
        }

        self.protection_check(index, ProtectionKind::OverVoltage, now);
    }

    fn set_cc_mode(&mut self, index: usize, mode: bool, now: Instant) {
        let mode = mode && self.is_output_enabled(index);

        if mode != self.channels[index].flags.cc_mode {
            self.channels[index].flags.cc_mode = mode;

            let flags = self.channels[index].flags;
            self.platform.indicate_mode(index, flags.cv_mode, flags.cc_mode);
            self.status.set_operation(index, status::OPER_CC, mode);
            self.status.set_questionable(index, status::QUES_VOLT, mode);
        }

        self.protection_check(index, ProtectionKind::OverCurrent, now);
    }

    // ---------------------------------------------------------------------
    // Protection
    // ---------------------------------------------------------------------

    fn protection_check(&mut self, index: usize, kind: ProtectionKind, now: Instant) {
        let (armed, condition, delay) = {
            let ch = &self.channels[index];
            (
                ch.prot_conf.is_enabled(kind) && self.is_output_enabled(index),
                ch.protection_condition(kind),
                ch.prot_conf.delay(kind),
            )
        };
        let correction = match kind {
            ProtectionKind::OverPower => Duration::from_ticks(0),
            _ => DELAY_CORRECTION,
        };

        let tripped = self.channels[index]
            .protection_mut(kind)
            .step(armed, condition, delay, correction, now);

        if tripped {
            let ch = &self.channels[index];
            match kind {
                ProtectionKind::OverVoltage => debug!(
                    "channel {}: OVP trip: cv={} cc={}, i deviation {} mA",
                    index,
                    ch.flags.cv_mode,
                    ch.flags.cc_mode,
                    (libm::fabsf(ch.i.mon - ch.i.set) * 1000.0) as i32
                ),
                ProtectionKind::OverCurrent => debug!(
                    "channel {}: OCP trip: cc={} cv={}, u deviation {} mV",
                    index,
                    ch.flags.cc_mode,
                    ch.flags.cv_mode,
                    (libm::fabsf(ch.u.mon - ch.u.set) * 1000.0) as i32
                ),
                ProtectionKind::OverPower => debug!(
                    "channel {}: OPP trip: {} W above {} W",
                    index,
                    ch.u.mon * ch.i.mon,
                    ch.prot_conf.p_level
                ),
            }

            self.protection_enter(index, kind, now);
        }
    }

    /// Trip side effects: force the output off, latch the status bit on
    /// both register banks and raise the audible alert.
    fn protection_enter(&mut self, index: usize, kind: ProtectionKind, now: Instant) {
        self.set_output_enabled(index, false, now);
        self.status
            .set_questionable(index, status::questionable_mask(kind), true);
        self.platform.beep();
    }

    /// Clear all three latched protections of the channel.
    pub fn clear_protection(&mut self, index: usize) {
        for kind in all::<ProtectionKind>() {
            self.channels[index].protection_mut(kind).clear();
            self.status
                .set_questionable(index, status::questionable_mask(kind), false);
        }
    }

    /// Enable or disable one protection kind.
    pub fn set_protection_enabled(&mut self, index: usize, kind: ProtectionKind, on: bool) {
        let conf = &mut self.channels[index].prot_conf;
        match kind {
            ProtectionKind::OverVoltage => conf.u_state = on,
            ProtectionKind::OverCurrent => conf.i_state = on,
            ProtectionKind::OverPower => conf.p_state = on,
        }
        self.platform.save();
    }

    /// Configure a protection trip delay, in seconds.
    pub fn set_protection_delay(
        &mut self,
        index: usize,
        kind: ProtectionKind,
        delay: f32,
    ) -> Result<(), Error> {
        let params = *self.channels[index].params();
        let (min, max) = match kind {
            ProtectionKind::OverVoltage => (params.ovp.min_delay, params.ovp.max_delay),
            ProtectionKind::OverCurrent => (params.ocp.min_delay, params.ocp.max_delay),
            ProtectionKind::OverPower => (params.opp.min_delay, params.opp.max_delay),
        };
        if !(min..=max).contains(&delay) {
            return Err(Error::Bounds);
        }

        let conf = &mut self.channels[index].prot_conf;
        match kind {
            ProtectionKind::OverVoltage => conf.u_delay = delay,
            ProtectionKind::OverCurrent => conf.i_delay = delay,
            ProtectionKind::OverPower => conf.p_delay = delay,
        }
        self.platform.save();

        Ok(())
    }

    /// Configure the over-power trip level, in watts.
    pub fn set_power_protection_level(&mut self, index: usize, level: f32) -> Result<(), Error> {
        let params = *self.channels[index].params();
        if !(params.opp.min_level..=params.opp.max_level).contains(&level) {
            return Err(Error::Bounds);
        }

        self.channels[index].prot_conf.p_level = level;
        self.platform.save();

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Calibration session
    // ---------------------------------------------------------------------

    /// Begin a guided calibration of one channel.
    ///
    /// Readings revert to the factory mapping for the whole session so the
    /// recorded converter values are uncorrected.
    pub fn start_calibration(&mut self, index: usize) -> Result<(), Error> {
        if !self.is_ok(index) || self.calibration.is_some() {
            return Err(Error::InvalidState);
        }

        self.channels[index].flags.cal_enabled = false;
        self.calibration = Some(CalibrationSession::new(index));
        info!("channel {}: calibration started", index);

        Ok(())
    }

    /// Abandon the session, restoring the previous correction state.
    pub fn stop_calibration(&mut self) {
        if let Some(session) = self.calibration.take() {
            let index = session.channel();
            self.channels[index].flags.cal_enabled = self.channels[index].cal_conf.exists();
            info!("channel {}: calibration stopped", index);
        }
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibration.is_some()
    }

    /// Drive the session channel's output to a calibration reference level.
    pub fn set_calibration_level(
        &mut self,
        quantity: Quantity,
        level: CalibrationLevel,
    ) -> Result<(), Error> {
        let index = self
            .calibration
            .as_ref()
            .map(CalibrationSession::channel)
            .ok_or(Error::InvalidState)?;

        let params = *self.channels[index].params();
        let q = match quantity {
            Quantity::Voltage => &params.u,
            Quantity::Current => &params.i,
        };
        let reference = match level {
            CalibrationLevel::Min => q.cal_min,
            CalibrationLevel::Mid => q.cal_mid,
            CalibrationLevel::Max => q.cal_max,
        };

        match quantity {
            Quantity::Voltage => self.set_voltage(index, reference),
            Quantity::Current => self.set_current(index, reference),
        }
    }

    /// Record the operator-verified value for the currently driven level.
    pub fn record_calibration_point(
        &mut self,
        quantity: Quantity,
        level: CalibrationLevel,
        measured: f32,
    ) -> Result<(), Error> {
        let session = self.calibration.as_mut().ok_or(Error::InvalidState)?;
        let ch = &self.channels[session.channel()];

        let adc = ch.value(quantity).mon;
        let params = match quantity {
            Quantity::Voltage => ch.params().u,
            Quantity::Current => ch.params().i,
        };

        session.record(quantity, level, measured, adc, &params)
    }

    pub fn set_calibration_remark(&mut self, text: &str) -> Result<(), Error> {
        self.calibration
            .as_mut()
            .ok_or(Error::InvalidState)?
            .set_remark(text)
    }

    /// Commit the session into the channel's calibration configuration.
    ///
    /// Fails with the session untouched when data is missing or invalid.
    pub fn save_calibration(&mut self, date: &str) -> Result<(), Error> {
        let session = self.calibration.as_ref().ok_or(Error::InvalidState)?;
        let index = session.channel();
        session.write_into(&mut self.channels[index].cal_conf, date)?;

        self.channels[index].flags.cal_enabled = true;
        self.calibration = None;
        self.platform.save();
        info!("channel {}: calibration saved", index);

        Ok(())
    }

    // ---------------------------------------------------------------------

    /// Run a compound operation with profile saving suppressed, restoring
    /// the collaborator's previous setting on every exit path.
    fn with_save_suppressed<R>(&mut self, operation: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.platform.enable_save(false);
        let result = operation(self);
        self.platform.enable_save(previous);
        result
    }
}
