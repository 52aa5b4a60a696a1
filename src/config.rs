use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::VersionError;
use crate::models::VersionRecord;

pub const DEFAULT_CONFIG_FILE: &str = "gitVersionProperties.json";

/// User overrides for the persisted record. Unset fields fall back to the
/// published record.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub application_name: Option<String>,
    #[serde(default)]
    pub version_major: Option<String>,
    #[serde(default)]
    pub version_minor: Option<String>,
    #[serde(default)]
    pub version_patch: Option<String>,
    #[serde(default)]
    pub build_number: Option<String>,
    #[serde(default)]
    pub build_date: Option<String>,
    #[serde(default)]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub git_sha: Option<String>,
    #[serde(default)]
    pub extra_properties: Option<BTreeMap<String, String>>,
    /// Re-apply the written record as the build version. Default: true
    #[serde(default)]
    pub apply_version_properties_after_file_creation: Option<bool>,
}

/// A fully resolved `create` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub record: VersionRecord,
    pub apply_after_creation: bool,
}

impl Config {
    /// Load from an explicit path, which must exist, or from the project's
    /// default config file if present.
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self, VersionError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(VersionError::configuration(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let path = project_dir.join(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| {
            VersionError::configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&content).map_err(|e| {
            VersionError::configuration(format!("Invalid config {}: {}", path.display(), e.message))
        })
    }

    pub fn parse(content: &str) -> Result<Self, VersionError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Explicit values win, everything else comes from `defaults`.
    /// Extra properties do not inherit from `defaults`.
    pub fn resolve(&self, defaults: &VersionRecord) -> CreateRequest {
        let pick = |value: &Option<String>, fallback: &String| {
            value.clone().unwrap_or_else(|| fallback.clone())
        };
        CreateRequest {
            record: VersionRecord {
                application_name: pick(&self.application_name, &defaults.application_name),
                version_major: pick(&self.version_major, &defaults.version_major),
                version_minor: pick(&self.version_minor, &defaults.version_minor),
                version_patch: pick(&self.version_patch, &defaults.version_patch),
                build_number: pick(&self.build_number, &defaults.build_number),
                build_date: pick(&self.build_date, &defaults.build_date),
                git_sha: pick(&self.git_sha, &defaults.git_sha),
                git_branch: pick(&self.git_branch, &defaults.git_branch),
                extra_properties: self.extra_properties.clone().unwrap_or_default(),
            },
            apply_after_creation: self
                .apply_version_properties_after_file_creation
                .unwrap_or(true),
        }
    }
}
