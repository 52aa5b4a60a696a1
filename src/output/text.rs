use std::path::Path;

use crate::models::VersionRecord;

const RULE_WIDTH: usize = 48;

pub fn format_version_properties(r: &VersionRecord) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str("versionProperties:\n");

    let version = r.version();
    let version_complete = r.version_complete();
    for (label, value) in [
        ("applicationName", r.application_name.as_str()),
        ("versionMajor", r.version_major.as_str()),
        ("versionMinor", r.version_minor.as_str()),
        ("versionPatch", r.version_patch.as_str()),
        ("version", version.as_str()),
        ("versionComplete", version_complete.as_str()),
        ("buildNumber", r.build_number.as_str()),
        ("buildDate", r.build_date.as_str()),
        ("gitBranch", r.git_branch.as_str()),
        ("gitSha", r.git_sha.as_str()),
    ] {
        out.push_str(&format!("  {label:<20} -> {value}\n"));
    }

    out.push_str(&format!("  {:<20} ->\n", "extraProperties:"));
    for (key, value) in &r.extra_properties {
        out.push_str(&format!("    {key:<18} -> {value}\n"));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

pub fn print_version_properties(r: &VersionRecord) {
    print!("{}", format_version_properties(r));
}

pub fn print_created(path: &Path, applied_version: Option<&str>) {
    println!("Created {}", path.display());
    if let Some(version) = applied_version {
        println!("  Version: {version}");
    }
}

pub fn print_deleted(path: &Path, deleted: bool) {
    if deleted {
        println!("Deleted {}", path.display());
    } else {
        println!("Nothing to delete at {}", path.display());
    }
}
