use serde::{Deserialize, Serialize};

/// Study report of a CiPA study
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyReport {
    /// Report title
    pub title: String,

    /// Report version
    pub version: String,

    /// Report date (ISO-8601)
    pub date: String,

    /// Free-text contents of the report
    pub text: String,
}

impl StudyReport {
    /// Create a new study report
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        date: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            date: date.into(),
            text: text.into(),
        }
    }
}

/// A CiPA study, owned 1:1 by its [`Trial`](super::Trial)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Study {
    /// Study identifier (STUDYID)
    pub study_id: String,

    /// Study report information
    pub report: StudyReport,
}

impl Study {
    /// Create a study with an empty report
    pub fn new(study_id: impl Into<String>) -> Self {
        Self {
            study_id: study_id.into(),
            report: StudyReport::default(),
        }
    }
}
