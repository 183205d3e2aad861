use serde::{Deserialize, Serialize};

/// Types of cell properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    /// Input resistance
    InputResistance,
    /// Membrane capacitance (Cm)
    MembraneCapacitance,
    /// Membrane resistance (Rm)
    MembraneResistance,
    /// Membrane resting potential (Vm)
    MembraneRestingPotential,
    /// Passage number (P)
    PassageNumber,
    /// Seal resistance (Rseal)
    SealResistance,
    /// Series resistance (Rs)
    SeriesResistance,
    /// Series resistance compensation
    SeriesResistanceCompensation,
    /// Temperature
    Temperature,
    /// Unrecognized PARAMCD
    Unknown,
}

impl PropertyType {
    /// Map a PARAMCD code to its property type; unrecognized codes map to `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "Cm" => PropertyType::MembraneCapacitance,
            "P" => PropertyType::PassageNumber,
            "Rm" => PropertyType::MembraneResistance,
            "Rs" => PropertyType::SeriesResistance,
            "Rseal" => PropertyType::SealResistance,
            "Temperature" => PropertyType::Temperature,
            "Vm" => PropertyType::MembraneRestingPotential,
            _ => PropertyType::Unknown,
        }
    }
}

/// Named attribute of a cell (one CellProperties row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Code of the property (PARAMCD)
    pub code: String,

    /// Display name (PARAM)
    pub display_name: String,

    /// Property type resolved from `code`
    pub property_type: PropertyType,

    /// Value as written in the dataset (VALUE)
    pub value: String,

    /// Unit of the value (UNIT)
    pub unit: String,

    /// Additional notes
    pub description: String,
}

impl Property {
    /// Create a property, resolving its type from the code
    pub fn new(
        code: impl Into<String>,
        display_name: impl Into<String>,
        value: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        let code = code.into();
        Self {
            property_type: PropertyType::from_code(&code),
            code,
            display_name: display_name.into(),
            value: value.into(),
            unit: unit.into(),
            description: String::new(),
        }
    }
}
