use serde_json::{json, Value};

use crate::error::VersionError;
use crate::models::VersionRecord;

pub fn print(value: &Value) {
    println!("{value:#}");
}

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &VersionError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

/// Record fields plus the derived `version` and `versionComplete`.
pub fn record_json(r: &VersionRecord) -> Value {
    json!({
        "applicationName": r.application_name,
        "versionMajor": r.version_major,
        "versionMinor": r.version_minor,
        "versionPatch": r.version_patch,
        "version": r.version(),
        "versionComplete": r.version_complete(),
        "buildNumber": r.build_number,
        "buildDate": r.build_date,
        "gitBranch": r.git_branch,
        "gitSha": r.git_sha,
        "extraProperties": r.extra_properties
    })
}
