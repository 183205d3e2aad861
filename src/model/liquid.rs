use serde::{Deserialize, Serialize};

use super::Id;

/// Sign convention of the reported voltage, with `Vcell = Vclamp - Vljp`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LjpReportedVoltage {
    /// Reported voltages are not corrected for the junction potential
    Vcell,
    /// Reported voltages are already corrected for the junction potential
    #[default]
    Vclamp,
}

/// Liquid junction potential of the internal/external solutions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidJunctionPotential {
    /// Potential value (NaN when unknown)
    pub value: f64,

    /// Unit of `value` (e.g., mV)
    pub unit: String,

    /// Sign convention of the reported voltages
    pub reported_voltage: LjpReportedVoltage,
}

impl Default for LiquidJunctionPotential {
    fn default() -> Self {
        Self {
            value: f64::NAN,
            unit: String::new(),
            reported_voltage: LjpReportedVoltage::Vclamp,
        }
    }
}

impl LiquidJunctionPotential {
    /// Create a junction potential
    pub fn new(value: f64, unit: impl Into<String>, reported_voltage: LjpReportedVoltage) -> Self {
        Self {
            value,
            unit: unit.into(),
            reported_voltage,
        }
    }
}

/// Liquid used in a CiPA assay (control, drug, selective blocker...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Liquid {
    /// Liquid identifier
    pub id: Id,

    /// Liquid name (LIQUID column)
    pub name: String,

    /// Batch
    pub batch: String,

    /// Additional description
    pub description: String,
}

impl Liquid {
    /// Create a liquid with identifier and name
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }
}
