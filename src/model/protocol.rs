use serde::{Deserialize, Serialize};

use super::{Id, Liquid, Waveform};

/// Type of protocol run during an assay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolType {
    /// Voltage command
    Voltage,
    /// Current command
    Current,
    /// Liquid addition (dosing, washout)
    Liquid,
    /// Controlled temperature change
    Temperature,
    /// Unknown protocol
    Unknown,
}

/// How a liquid concentration value was obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcentrationType {
    /// Nominal concentration from the protocol
    Nominal,
    /// Calculated for a particular device and liquid
    Calculated,
    /// Measured in samples collected from the well
    Measured,
    /// Obtained from satellite experiments
    Satellite,
    /// Unknown
    #[default]
    Unknown,
}

impl ConcentrationType {
    /// Name used in the CONCT column
    pub fn as_ted_str(&self) -> &'static str {
        match self {
            ConcentrationType::Nominal => "NOMINAL",
            ConcentrationType::Calculated => "CALCULATED",
            ConcentrationType::Measured => "MEASURED",
            ConcentrationType::Satellite => "SATELLITE",
            ConcentrationType::Unknown => "UNKNOWN",
        }
    }

    /// Parse a CONCT value (case-insensitive)
    pub fn from_ted_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NOMINAL" => Some(ConcentrationType::Nominal),
            "CALCULATED" => Some(ConcentrationType::Calculated),
            "MEASURED" => Some(ConcentrationType::Measured),
            "SATELLITE" => Some(ConcentrationType::Satellite),
            "UNKNOWN" => Some(ConcentrationType::Unknown),
            _ => None,
        }
    }
}

/// Intended command waveform applied to the cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageProtocol {
    /// Intended command
    pub waveform: Waveform,
}

/// Addition of a liquid at a given concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidProtocol {
    /// Liquid added
    pub liquid: Liquid,

    /// Concentration value
    pub concentration: f64,

    /// Concentration unit (e.g., uM)
    pub concentration_unit: String,

    /// How the concentration was obtained
    pub concentration_type: ConcentrationType,

    /// Liquid used as control
    pub is_control: bool,

    /// Liquid used to eliminate residual currents (e.g., E-4031 in hERG assays)
    pub is_selective_blocker: bool,
}

impl LiquidProtocol {
    /// Create a liquid protocol with unknown concentration type and no flags
    pub fn new(liquid: Liquid, concentration: f64, concentration_unit: impl Into<String>) -> Self {
        Self {
            liquid,
            concentration,
            concentration_unit: concentration_unit.into(),
            concentration_type: ConcentrationType::Unknown,
            is_control: false,
            is_selective_blocker: false,
        }
    }
}

/// Variant-specific part of a [`Protocol`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProtocolKind {
    /// Voltage command protocol
    Voltage(VoltageProtocol),
    /// Liquid addition protocol
    Liquid(LiquidProtocol),
}

/// Protocol executed during the assay
///
/// Shared fields live in the envelope; variant data in [`ProtocolKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    /// Protocol identifier
    pub id: Id,

    /// Protocol name
    pub name: String,

    /// Duration in `duration_unit`
    pub duration: f64,

    /// Unit of `duration`
    pub duration_unit: String,

    /// Variant data
    pub kind: ProtocolKind,
}

impl Protocol {
    /// Create a voltage protocol
    pub fn voltage(id: Id, name: impl Into<String>, waveform: Waveform) -> Self {
        Self {
            id,
            name: name.into(),
            duration: 0.0,
            duration_unit: String::new(),
            kind: ProtocolKind::Voltage(VoltageProtocol { waveform }),
        }
    }

    /// Create a liquid protocol
    pub fn liquid(id: Id, name: impl Into<String>, liquid: LiquidProtocol) -> Self {
        Self {
            id,
            name: name.into(),
            duration: 0.0,
            duration_unit: String::new(),
            kind: ProtocolKind::Liquid(liquid),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: f64, unit: impl Into<String>) -> Self {
        self.duration = duration;
        self.duration_unit = unit.into();
        self
    }

    /// Discriminating tag of this protocol
    pub fn protocol_type(&self) -> ProtocolType {
        match self.kind {
            ProtocolKind::Voltage(_) => ProtocolType::Voltage,
            ProtocolKind::Liquid(_) => ProtocolType::Liquid,
        }
    }

    /// Liquid variant, if any
    pub fn as_liquid(&self) -> Option<&LiquidProtocol> {
        match &self.kind {
            ProtocolKind::Liquid(lp) => Some(lp),
            _ => None,
        }
    }

    /// Voltage variant, if any
    pub fn as_voltage(&self) -> Option<&VoltageProtocol> {
        match &self.kind {
            ProtocolKind::Voltage(vp) => Some(vp),
            _ => None,
        }
    }
}
