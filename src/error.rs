//! Error type definitions for the supply core.

/// An enumeration of possible errors within the supply core.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
pub enum Error {
    /// A provided value is out of the permissible range.
    Bounds,

    /// The operation is not valid in the current state.
    InvalidState,

    /// The channel power rail reported a fault.
    ChannelFault,

    /// Calibration data is present but inconsistent.
    InvalidCalibrationData,

    /// Calibration data required for saving has not been recorded.
    MissingCalibrationData,
}
