//! Immutable factory parameters of a supply channel.

/// Selector for one of a channel's two regulated quantities.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
pub enum Quantity {
    Voltage,
    Current,
}

/// Factory limits and defaults for one regulated quantity.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize)]
pub struct QuantityParameters {
    pub min: f32,
    pub default: f32,
    pub max: f32,

    pub min_step: f32,
    pub default_step: f32,
    pub max_step: f32,

    /// Reference levels driven during guided calibration.
    pub cal_min: f32,
    pub cal_mid: f32,
    pub cal_max: f32,

    /// Cross-coupling constant of this quantity against the other one,
    /// recorded at factory characterization for the calibration wizard.
    pub cross_coupling: f32,
}

/// Factory defaults for one protection kind. Delays in seconds.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize)]
pub struct ProtectionDefaults {
    pub enabled: bool,
    pub min_delay: f32,
    pub default_delay: f32,
    pub max_delay: f32,
}

/// Factory defaults for the over-power protection, which carries a trip
/// level in watts in addition to the delay.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize)]
pub struct PowerProtectionDefaults {
    pub enabled: bool,
    pub min_delay: f32,
    pub default_delay: f32,
    pub max_delay: f32,
    pub min_level: f32,
    pub default_level: f32,
    pub max_level: f32,
}

/// The full immutable parameter set of one channel.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize)]
pub struct ChannelParameters {
    pub u: QuantityParameters,
    pub i: QuantityParameters,
    pub ovp: ProtectionDefaults,
    pub ocp: ProtectionDefaults,
    pub opp: PowerProtectionDefaults,
}

impl Default for ChannelParameters {
    /// Parameters of the stock 30 V / 5 A output board.
    fn default() -> Self {
        Self {
            u: QuantityParameters {
                // V
                min: 0.0,
                default: 0.0,
                max: 30.0,
                min_step: 0.01,
                default_step: 0.1,
                max_step: 5.0,
                cal_min: 0.2,
                cal_mid: 14.1,
                cal_max: 28.0,
                // V/A
                cross_coupling: 0.05,
            },
            i: QuantityParameters {
                // A
                min: 0.0,
                default: 0.0,
                max: 5.0,
                min_step: 0.01,
                default_step: 0.01,
                max_step: 1.0,
                cal_min: 0.05,
                cal_mid: 2.45,
                cal_max: 4.85,
                // A/V
                cross_coupling: 0.001,
            },
            ovp: ProtectionDefaults {
                enabled: true,
                // s
                min_delay: 0.0,
                default_delay: 0.005,
                max_delay: 10.0,
            },
            ocp: ProtectionDefaults {
                enabled: true,
                // s
                min_delay: 0.0,
                default_delay: 0.02,
                max_delay: 10.0,
            },
            opp: PowerProtectionDefaults {
                enabled: true,
                // s
                min_delay: 1.0,
                default_delay: 10.0,
                max_delay: 300.0,
                // W
                min_level: 0.0,
                default_level: 150.0,
                max_level: 160.0,
            },
        }
    }
}
