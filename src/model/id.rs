use std::fmt;

use serde::{Deserialize, Serialize};

/// Two-part identifier used by every entity of the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    /// Root of the identifier (e.g., an experiment or cell code)
    pub root: String,

    /// Optional extension qualifying the root (empty when unused)
    pub extension: String,
}

impl Id {
    /// Create an identifier without extension
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: String::new(),
        }
    }

    /// Create an identifier with root and extension
    pub fn with_extension(root: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Composite key used for EXPID/CELLID columns: `root` or `root_extension`
    pub fn composite(&self) -> String {
        if self.extension.is_empty() {
            self.root.clone()
        } else {
            format!("{}_{}", self.root, self.extension)
        }
    }

    /// Root and extension concatenated without separator (DEVICE_ID column)
    pub fn concatenated(&self) -> String {
        format!("{}{}", self.root, self.extension)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.composite())
    }
}
