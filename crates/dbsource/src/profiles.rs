//! Named datasource profiles, loaded from a YAML file.
//!
//! A profiles file maps profile names to raw connection parameters:
//!
//! ```yaml
//! datasources:
//!   analytics:
//!     engine: mysql
//!     host: db.internal
//!     port: 3306
//!     database: reporting
//!     user: alice
//!     password: change-me
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dispatch::Dispatcher;
use crate::error::{DataSourceError, Result, ValidationErrors};
use crate::params::RawParams;

/// Starter profiles file written by `dbsource init`.
pub const EXAMPLE: &str = r#"# dbsource datasource profiles
datasources:
  analytics:
    engine: mysql
    host: db.internal
    port: 3306
    database: reporting
    user: alice
    password: change-me
    extra:
      useSSL: "false"
  warehouse:
    engine: hive
    host: nn1:10000,nn2:10000
    port: 10000
    database: default
    user: etl
    password: change-me
"#;

/// All datasource profiles known to one configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profiles {
    /// Profiles by name. Ordered so serialization and hashing are stable.
    #[serde(default)]
    pub datasources: BTreeMap<String, RawParams>,
}

impl Profiles {
    /// Load profiles from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse profiles from a YAML string and validate every entry.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let profiles: Profiles = serde_yaml::from_str(yaml)?;
        profiles.validate()?;
        Ok(profiles)
    }

    /// Validate every profile, reporting violations qualified by profile
    /// name (`analytics.host`, ...) so one pass covers the whole file.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        for (name, params) in &self.datasources {
            match Dispatcher::validate(params) {
                Ok(()) => {}
                Err(DataSourceError::Validation(profile_errors)) => {
                    for violation in profile_errors.violations() {
                        errors.push(
                            format!("{}.{}", name, violation.field),
                            violation.message.clone(),
                        );
                    }
                }
                Err(other) => return Err(other),
            }
        }
        errors.into_result()
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Result<&RawParams> {
        self.datasources.get(name).ok_or_else(|| {
            DataSourceError::config(format!("unknown datasource profile '{name}'"))
        })
    }

    /// Compute a SHA256 hash of the profiles for change detection.
    pub fn hash(&self) -> String {
        let yaml = serde_yaml::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(yaml.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
