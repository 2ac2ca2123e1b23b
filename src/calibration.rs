//! Channel calibration data and the guided calibration session.
//!
//! Calibration records, for voltage and current each, three correspondences
//! between a commanded actuator level, a verified engineering-unit value and
//! the raw converter reading observed at that level. The runtime correction
//! (`channel` module) uses only the two outer points; the middle point is
//! kept for record and display.

use heapless::String;

use crate::error::Error;
use crate::params::{ChannelParameters, Quantity, QuantityParameters};

/// Remark stored before any calibration has been performed.
pub const DEFAULT_REMARK: &str = "Not calibrated";

/// Accepted deviation of an entered calibration value from its reference
/// level, as a fraction of the quantity's full span.
const CAL_POINT_TOLERANCE: f32 = 0.2;

/// The three reference levels driven during guided calibration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, enum_iterator::Sequence)]
pub enum CalibrationLevel {
    Min,
    Mid,
    Max,
}

/// One recorded calibration correspondence.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationPoint {
    /// Commanded actuator level, engineering units.
    pub dac: f32,

    /// Externally verified value, engineering units.
    pub val: f32,

    /// Raw converter reading observed at this level, engineering units of
    /// the factory mapping.
    pub adc: f32,
}

impl CalibrationPoint {
    fn flat(value: f32) -> Self {
        Self {
            dac: value,
            val: value,
            adc: value,
        }
    }
}

/// The three-point table of one quantity.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationTable {
    pub min: CalibrationPoint,
    pub mid: CalibrationPoint,
    pub max: CalibrationPoint,
}

impl CalibrationTable {
    /// An identity table at the quantity's factory reference levels.
    fn from_reference(params: &QuantityParameters) -> Self {
        Self {
            min: CalibrationPoint::flat(params.cal_min),
            mid: CalibrationPoint::flat((params.cal_min + params.cal_max) / 2.0),
            max: CalibrationPoint::flat(params.cal_max),
        }
    }
}

/// Persistent calibration state of one channel.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationConf {
    pub u: CalibrationTable,
    pub i: CalibrationTable,

    pub u_exists: bool,
    pub i_exists: bool,

    pub date: String<16>,
    pub remark: String<32>,
}

impl CalibrationConf {
    /// A cleared configuration at the channel's factory references.
    pub fn cleared(params: &ChannelParameters) -> Self {
        let mut remark = String::new();
        remark.push_str(DEFAULT_REMARK).ok();

        Self {
            u: CalibrationTable::from_reference(&params.u),
            i: CalibrationTable::from_reference(&params.i),
            u_exists: false,
            i_exists: false,
            date: String::new(),
            remark,
        }
    }

    /// Valid calibration data exists for both quantities.
    pub fn exists(&self) -> bool {
        self.u_exists && self.i_exists
    }

    pub fn table(&self, quantity: Quantity) -> &CalibrationTable {
        match quantity {
            Quantity::Voltage => &self.u,
            Quantity::Current => &self.i,
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
struct SessionPoint {
    set: bool,
    dac: f32,
    val: f32,
    adc: f32,
}

#[derive(Debug, Default, Copy, Clone)]
struct SessionValue {
    points: [SessionPoint; 3],
}

impl SessionValue {
    fn point_mut(&mut self, level: CalibrationLevel) -> &mut SessionPoint {
        &mut self.points[level as usize]
    }

    fn point(&self, level: CalibrationLevel) -> &SessionPoint {
        &self.points[level as usize]
    }

    fn complete(&self) -> bool {
        self.points.iter().all(|p| p.set)
    }

    fn monotonic(&self) -> bool {
        let (min, max) = (self.point(CalibrationLevel::Min), self.point(CalibrationLevel::Max));
        min.val < max.val && min.adc < max.adc && min.dac < max.dac
    }

    fn as_table(&self) -> CalibrationTable {
        let to_point = |p: &SessionPoint| CalibrationPoint {
            dac: p.dac,
            val: p.val,
            adc: p.adc,
        };
        CalibrationTable {
            min: to_point(self.point(CalibrationLevel::Min)),
            mid: to_point(self.point(CalibrationLevel::Mid)),
            max: to_point(self.point(CalibrationLevel::Max)),
        }
    }
}

/// An in-progress guided calibration of one channel.
///
/// The session accumulates verified points per quantity and level; nothing
/// touches the channel's [`CalibrationConf`] until a successful
/// [`CalibrationSession::write_into`].
#[derive(Debug)]
pub struct CalibrationSession {
    channel: usize,
    voltage: SessionValue,
    current: SessionValue,
    remark: String<32>,
    remark_set: bool,
}

impl CalibrationSession {
    pub fn new(channel: usize) -> Self {
        Self {
            channel,
            voltage: SessionValue::default(),
            current: SessionValue::default(),
            remark: String::new(),
            remark_set: false,
        }
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Record one verified calibration point.
    ///
    /// The entered value must lie within the channel's hard limits and
    /// within the tolerance band around the driven reference level;
    /// otherwise nothing is mutated and `Bounds` is returned.
    ///
    /// # Args
    /// * `quantity` - Which quantity the point belongs to.
    /// * `level` - The reference level currently driven on the output.
    /// * `measured` - The externally verified value entered by the operator.
    /// * `adc` - The raw (factory-mapped) converter reading at this level.
    /// * `params` - The quantity's factory parameters.
    pub fn record(
        &mut self,
        quantity: Quantity,
        level: CalibrationLevel,
        measured: f32,
        adc: f32,
        params: &QuantityParameters,
    ) -> Result<(), Error> {
        if !(params.min..=params.max).contains(&measured) {
            return Err(Error::Bounds);
        }

        let reference = match level {
            CalibrationLevel::Min => params.cal_min,
            CalibrationLevel::Mid => params.cal_mid,
            CalibrationLevel::Max => params.cal_max,
        };
        if libm::fabsf(measured - reference) > CAL_POINT_TOLERANCE * (params.max - params.min) {
            return Err(Error::Bounds);
        }

        *self.value_mut(quantity).point_mut(level) = SessionPoint {
            set: true,
            dac: reference,
            val: measured,
            adc,
        };
        Ok(())
    }

    pub fn set_remark(&mut self, text: &str) -> Result<(), Error> {
        self.remark.clear();
        self.remark.push_str(text).or(Err(Error::Bounds))?;
        self.remark_set = true;
        Ok(())
    }

    /// Check whether the recorded data can be committed.
    ///
    /// Distinguishes data that has not been recorded (`MissingCalibrationData`)
    /// from recorded data that is inconsistent (`InvalidCalibrationData`).
    pub fn can_save(&self) -> Result<(), Error> {
        if !(self.voltage.complete() && self.current.complete() && self.remark_set) {
            return Err(Error::MissingCalibrationData);
        }

        if !(self.voltage.monotonic() && self.current.monotonic()) {
            return Err(Error::InvalidCalibrationData);
        }

        Ok(())
    }

    /// Commit the session into a channel's calibration configuration.
    pub fn write_into(&self, conf: &mut CalibrationConf, date: &str) -> Result<(), Error> {
        self.can_save()?;

        conf.u = self.voltage.as_table();
        conf.i = self.current.as_table();
        conf.u_exists = true;
        conf.i_exists = true;

        conf.date.clear();
        conf.date.push_str(date).or(Err(Error::Bounds))?;
        conf.remark.clear();
        conf.remark.push_str(self.remark.as_str()).ok();

        Ok(())
    }

    fn value_mut(&mut self, quantity: Quantity) -> &mut SessionValue {
        match quantity {
            Quantity::Voltage => &mut self.voltage,
            Quantity::Current => &mut self.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ChannelParameters {
        ChannelParameters::default()
    }

    fn record_all(session: &mut CalibrationSession, p: &ChannelParameters) {
        for (level, u_val, i_val) in [
            (CalibrationLevel::Min, 0.21, 0.05),
            (CalibrationLevel::Mid, 14.08, 2.46),
            (CalibrationLevel::Max, 27.95, 4.84),
        ] {
            session
                .record(Quantity::Voltage, level, u_val, u_val + 0.01, &p.u)
                .unwrap();
            session
                .record(Quantity::Current, level, i_val, i_val - 0.002, &p.i)
                .unwrap();
        }
    }

    #[test]
    fn cleared_conf_uses_factory_references() {
        let p = params();
        let conf = CalibrationConf::cleared(&p);
        assert!(!conf.exists());
        assert_eq!(conf.u.min.val, p.u.cal_min);
        assert_eq!(conf.u.max.dac, p.u.cal_max);
        assert_eq!(conf.i.mid.adc, (p.i.cal_min + p.i.cal_max) / 2.0);
        assert_eq!(conf.remark.as_str(), DEFAULT_REMARK);
        assert!(conf.date.is_empty());
    }

    #[test]
    fn out_of_range_point_is_rejected_without_mutation() {
        let p = params();
        let mut session = CalibrationSession::new(0);

        // Far away from the min reference level.
        assert_eq!(
            session.record(Quantity::Voltage, CalibrationLevel::Min, 22.0, 22.0, &p.u),
            Err(Error::Bounds)
        );
        // Outside the hard channel limits.
        assert_eq!(
            session.record(Quantity::Voltage, CalibrationLevel::Max, 31.0, 31.0, &p.u),
            Err(Error::Bounds)
        );
        assert_eq!(session.can_save(), Err(Error::MissingCalibrationData));
    }

    #[test]
    fn missing_remark_blocks_save() {
        let p = params();
        let mut session = CalibrationSession::new(0);
        record_all(&mut session, &p);

        assert_eq!(session.can_save(), Err(Error::MissingCalibrationData));
        session.set_remark("bench 3, 25C").unwrap();
        assert_eq!(session.can_save(), Ok(()));
    }

    #[test]
    fn non_monotonic_data_is_invalid() {
        let p = params();
        let mut session = CalibrationSession::new(0);
        record_all(&mut session, &p);
        session.set_remark("swapped").unwrap();

        // Force the voltage max point below the min point.
        session
            .record(Quantity::Voltage, CalibrationLevel::Max, 27.9, 0.01, &p.u)
            .unwrap();
        session
            .record(Quantity::Voltage, CalibrationLevel::Min, 0.21, 27.9, &p.u)
            .unwrap();

        assert_eq!(session.can_save(), Err(Error::InvalidCalibrationData));
    }

    #[test]
    fn write_into_commits_tables_and_flags() {
        let p = params();
        let mut session = CalibrationSession::new(1);
        record_all(&mut session, &p);
        session.set_remark("verified").unwrap();

        let mut conf = CalibrationConf::cleared(&p);
        session.write_into(&mut conf, "2026-08-06").unwrap();

        assert!(conf.exists());
        assert_eq!(conf.u.min.val, 0.21);
        assert_eq!(conf.i.max.val, 4.84);
        assert_eq!(conf.date.as_str(), "2026-08-06");
        assert_eq!(conf.remark.as_str(), "verified");
    }
}
