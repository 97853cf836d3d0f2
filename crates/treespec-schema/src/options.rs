//! # Validation Options
//!
//! Knobs for a validation pass. The defaults reproduce the permissive
//! behaviour: document keys that the grammar does not declare are ignored.
//!
//! Options can be read from a YAML file:
//!
//! ```yaml
//! closed: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::load::{self, LoadError};

/// Options for one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidateOptions {
    /// Report document keys that the grammar map does not declare.
    pub closed: bool,
}

impl ValidateOptions {
    /// Set closed-schema mode.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Parse options from YAML text. `origin` names the source in errors.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, LoadError> {
        serde_yaml::from_str(text).map_err(|source| LoadError::Yaml {
            path: origin.to_string(),
            source,
        })
    }

    /// Read options from a YAML file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = load::read_file(path)?;
        Self::from_yaml_str(&text, &path.display().to_string())
    }
}
