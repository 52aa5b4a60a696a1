use std::collections::BTreeMap;

use crate::git::VersionControlSnapshot;
use crate::version::{effective_version, BuildInfo};

/// The version and build metadata of one build. Never mutated once built;
/// derived strings are computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionRecord {
    pub application_name: String,
    pub version_major: String,
    pub version_minor: String,
    pub version_patch: String,
    pub build_number: String,
    pub build_date: String,
    pub git_sha: String,
    pub git_branch: String,
    pub extra_properties: BTreeMap<String, String>,
}

impl VersionRecord {
    /// Fresh record from version control and build metadata, without extra properties.
    pub fn compute(
        application_name: impl Into<String>,
        snapshot: &VersionControlSnapshot,
        build: &BuildInfo,
    ) -> Self {
        let version = effective_version(snapshot, &build.timestamp);
        Self {
            application_name: application_name.into(),
            version_major: version.major,
            version_minor: version.minor,
            version_patch: version.patch,
            build_number: build.number.clone(),
            build_date: build.build_date(),
            git_sha: snapshot.short_hash.clone(),
            git_branch: snapshot.branch.clone(),
            extra_properties: BTreeMap::new(),
        }
    }

    /// `major.minor.patch`
    pub fn version(&self) -> String {
        format!(
            "{}.{}.{}",
            self.version_major, self.version_minor, self.version_patch
        )
    }

    /// `major.minor.patch-buildNumber`
    pub fn version_complete(&self) -> String {
        format!("{}-{}", self.version(), self.build_number)
    }
}
