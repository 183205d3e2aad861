use serde::{Deserialize, Serialize};

use super::{Id, Results};

/// Event marking when a protocol ran during an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolExecution {
    /// Identifier of the executed protocol in [`Trial::protocols`](super::Trial::protocols)
    pub protocol: Id,

    /// Elapsed time from the beginning of the experiment
    pub time: f64,

    /// Unit of `time`
    pub time_unit: String,
}

impl ProtocolExecution {
    /// Create a protocol execution event
    pub fn new(protocol: Id, time: f64, time_unit: impl Into<String>) -> Self {
        Self {
            protocol,
            time,
            time_unit: time_unit.into(),
        }
    }
}

/// One recorded cell/run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Experiment identifier
    pub id: Id,

    /// Experiment name
    pub name: String,

    /// Identifier of the device used (foreign key into [`Trial::devices`](super::Trial::devices))
    pub device: Id,

    /// Start time (ISO-8601)
    pub start_time: String,

    /// Protocols executed, in any order
    pub protocols: Vec<ProtocolExecution>,

    /// Analysis passes; only the first one is persisted to TED
    pub results_sets: Vec<Results>,
}

impl Experiment {
    /// Create an empty experiment
    pub fn new(id: Id, device: Id, start_time: impl Into<String>) -> Self {
        Self {
            id,
            device,
            start_time: start_time.into(),
            ..Default::default()
        }
    }
}
