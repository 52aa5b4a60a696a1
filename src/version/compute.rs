use chrono::{DateTime, Utc};

use crate::git::VersionControlSnapshot;

const RELEASE_BRANCHES: [&str; 2] = ["main", "master"];
const RELEASE_BRANCH_SUFFIX: &str = "-release";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveVersion {
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl EffectiveVersion {
    fn new(major: &str, minor: &str, patch: String) -> Self {
        Self {
            major: major.to_string(),
            minor: minor.to_string(),
            patch,
        }
    }
}

pub fn is_release_branch(branch: &str) -> bool {
    RELEASE_BRANCHES.contains(&branch) || branch.ends_with(RELEASE_BRANCH_SUFFIX)
}

/// Empty for release branches, `.SNAPSHOT.<epoch seconds>` otherwise.
pub fn snapshot_suffix(branch: &str, build_timestamp: &DateTime<Utc>) -> String {
    if is_release_branch(branch) {
        String::new()
    } else {
        format!(".SNAPSHOT.{}", build_timestamp.timestamp())
    }
}

/// Derive major/minor/patch from the nearest tag. Missing components are
/// zero; components past the third are folded into the patch.
/// The commit distance does not take part in the result.
pub fn effective_version(
    snapshot: &VersionControlSnapshot,
    build_timestamp: &DateTime<Utc>,
) -> EffectiveVersion {
    let suffix = snapshot_suffix(&snapshot.branch, build_timestamp);
    let segments: Vec<&str> = if snapshot.tag_version.is_empty() {
        Vec::new()
    } else {
        snapshot.tag_version.split('.').collect()
    };

    match segments.as_slice() {
        [] => EffectiveVersion::new("0", "0", format!("0{suffix}")),
        [major] => EffectiveVersion::new(major, "0", format!("0{suffix}")),
        [major, minor] => EffectiveVersion::new(major, minor, format!("0{suffix}")),
        [major, minor, rest @ ..] => {
            EffectiveVersion::new(major, minor, format!("{}{suffix}", rest.join(".")))
        }
    }
}
