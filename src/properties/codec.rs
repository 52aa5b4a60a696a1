use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::VersionError;
use crate::models::VersionRecord;

use super::format::{parse_properties, write_properties};

pub const EXTRA_PROPERTIES_PREFIX: &str = "extraProperties.";
const HEADER_COMMENT: &str = "gitVersionProperties";

/// Flatten a record into properties text. `version` and `versionComplete`
/// are written for readers of the file; [`decode`] recomputes them.
pub fn encode(record: &VersionRecord) -> String {
    let version = record.version();
    let version_complete = record.version_complete();
    let extra_keys: Vec<(String, &str)> = record
        .extra_properties
        .iter()
        .map(|(k, v)| (format!("{EXTRA_PROPERTIES_PREFIX}{k}"), v.as_str()))
        .collect();

    let scalars = [
        ("applicationName", record.application_name.as_str()),
        ("versionMajor", record.version_major.as_str()),
        ("versionMinor", record.version_minor.as_str()),
        ("versionPatch", record.version_patch.as_str()),
        ("buildNumber", record.build_number.as_str()),
        ("buildDate", record.build_date.as_str()),
        ("gitSha", record.git_sha.as_str()),
        ("gitBranch", record.git_branch.as_str()),
        ("version", version.as_str()),
        ("versionComplete", version_complete.as_str()),
    ];

    write_properties(
        HEADER_COMMENT,
        scalars
            .into_iter()
            .chain(extra_keys.iter().map(|(k, v)| (k.as_str(), *v))),
    )
}

/// Rebuild a record from a parsed key/value map. Missing fields are empty,
/// unknown keys outside the extra-properties namespace are ignored.
pub fn from_properties(props: &BTreeMap<String, String>) -> VersionRecord {
    let field = |name: &str| props.get(name).cloned().unwrap_or_default();
    VersionRecord {
        application_name: field("applicationName"),
        version_major: field("versionMajor"),
        version_minor: field("versionMinor"),
        version_patch: field("versionPatch"),
        build_number: field("buildNumber"),
        build_date: field("buildDate"),
        git_sha: field("gitSha"),
        git_branch: field("gitBranch"),
        extra_properties: props
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(EXTRA_PROPERTIES_PREFIX)
                    .map(|name| (name.to_string(), v.clone()))
            })
            .collect(),
    }
}

pub fn decode(text: &str) -> Result<VersionRecord, VersionError> {
    let props = parse_properties(text)
        .map_err(|e| VersionError::corrupt("properties text", &e.to_string()))?;
    Ok(from_properties(&props))
}

/// Load a persisted record. `Ok(None)` when the file does not exist.
pub fn read_file(path: &Path) -> Result<Option<VersionRecord>, VersionError> {
    if !path.exists() {
        return Ok(None);
    }
    let display = path.display().to_string();
    let bytes = fs::read(path)
        .map_err(|e| VersionError::file_system(format!("Cannot read {display}: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| VersionError::corrupt(&display, &e.to_string()))?;
    let props = parse_properties(&text).map_err(|e| VersionError::corrupt(&display, &e.to_string()))?;
    Ok(Some(from_properties(&props)))
}

/// Persist a record, creating parent directories as needed.
pub fn write_file(record: &VersionRecord, path: &Path) -> Result<(), VersionError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            VersionError::file_system(format!("Cannot create {}: {e}", parent.display()))
        })?;
    }
    fs::write(path, encode(record))
        .map_err(|e| VersionError::file_system(format!("Cannot write {}: {e}", path.display())))
}
