use serde::{Deserialize, Serialize};

use super::{Device, Experiment, Id, Liquid, LiquidJunctionPotential, Protocol, Study};

/// A CiPA trial or assay, root of the data model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// TED format version the trial was written with
    pub version: String,

    /// Short description of the dataset
    pub description: String,

    /// General information about the study
    pub study: Study,

    /// Devices used to perform the assay; must be non-empty before export
    pub devices: Vec<Device>,

    /// Default liquid junction potential
    pub ljp: LiquidJunctionPotential,

    /// Liquids applied in the assay
    pub liquids: Vec<Liquid>,

    /// Protocols used in the assay
    pub protocols: Vec<Protocol>,

    /// Experiments performed in the assay
    pub experiments: Vec<Experiment>,
}

impl Trial {
    /// Create an empty trial
    pub fn new(version: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Look up a protocol by identifier
    pub fn protocol(&self, id: &Id) -> Option<&Protocol> {
        self.protocols.iter().find(|p| &p.id == id)
    }

    /// Look up a device by identifier
    pub fn device(&self, id: &Id) -> Option<&Device> {
        self.devices.iter().find(|d| &d.id == id)
    }

    /// First voltage protocol, used as the intended voltage command
    pub fn intended_voltage_protocol(&self) -> Option<&Protocol> {
        self.protocols.iter().find(|p| p.as_voltage().is_some())
    }

    /// Total number of trace results across the first results set of every experiment
    pub fn trace_count(&self) -> usize {
        self.experiments
            .iter()
            .filter_map(|e| e.results_sets.first())
            .map(|rs| rs.results.len())
            .sum()
    }
}
