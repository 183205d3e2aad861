use serde::{Deserialize, Serialize};

use super::Id;

/// Device used to perform electrophysiology experiments and recordings
///
/// Experiments reference a device through its [`Id`] instead of holding a copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier
    pub id: Id,

    /// Device code
    pub code: String,

    /// Manufacturer's model name
    pub manufacturer_model_name: String,

    /// Software or firmware name and version running on the device
    pub device_software_name: String,

    /// Analysis software name and version
    pub analysis_software_name: String,

    /// Software used to generate the dataset
    pub cod_software_name: String,

    /// Additional general information regarding the analysis
    pub additional_analysis_information: String,
}

impl Device {
    /// Create a device with identifier, code, model and device software
    pub fn new(
        id: Id,
        code: impl Into<String>,
        manufacturer_model_name: impl Into<String>,
        device_software_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            manufacturer_model_name: manufacturer_model_name.into(),
            device_software_name: device_software_name.into(),
            ..Default::default()
        }
    }
}
