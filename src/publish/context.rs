use std::fs;
use std::path::{Path, PathBuf};

use crate::models::VersionRecord;

pub const VERSION_PROPERTIES_DIR: &str = "gitVersionProperties";
pub const VERSION_PROPERTIES_FILE: &str = "version.properties";
pub const DEFAULT_BUILD_DIR: &str = "build";
const UNSPECIFIED_PROJECT: &str = "unspecified";

/// The slice of build state this tool reads and publishes to.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
    pub project_name: String,
    version: Option<String>,
    version_properties: Option<VersionRecord>,
}

impl BuildContext {
    pub fn new(project_dir: impl Into<PathBuf>, build_dir: Option<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let build_dir = build_dir.unwrap_or_else(|| project_dir.join(DEFAULT_BUILD_DIR));
        let project_name = project_name(&project_dir);
        Self {
            project_dir,
            build_dir,
            project_name,
            version: None,
            version_properties: None,
        }
    }

    pub fn version_properties_dir(&self) -> PathBuf {
        self.build_dir.join(VERSION_PROPERTIES_DIR)
    }

    /// `<build>/gitVersionProperties/version.properties`
    pub fn version_properties_file(&self) -> PathBuf {
        self.version_properties_dir().join(VERSION_PROPERTIES_FILE)
    }

    /// Make `record` the build's version and its shared `versionProperties` value.
    pub fn apply(&mut self, record: &VersionRecord) {
        self.version = Some(record.version());
        self.version_properties = Some(record.clone());
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn version_properties(&self) -> Option<&VersionRecord> {
        self.version_properties.as_ref()
    }
}

fn project_name(project_dir: &Path) -> String {
    fs::canonicalize(project_dir)
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNSPECIFIED_PROJECT.to_string())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_paths_and_name() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("my-app");
        fs::create_dir(&project).unwrap();

        let ctx = BuildContext::new(&project, None);
        assert_eq!(ctx.project_name, "my-app");
        assert_eq!(
            ctx.version_properties_file(),
            project.join("build/gitVersionProperties/version.properties")
        );

        let ctx = BuildContext::new(&project, Some(dir.path().join("out")));
        assert_eq!(
            ctx.version_properties_dir(),
            dir.path().join("out").join("gitVersionProperties")
        );
    }

    #[test]
    fn test_missing_project_dir_is_unspecified() {
        let ctx = BuildContext::new("/definitely/not/here", None);
        assert_eq!(ctx.project_name, "unspecified");
    }

    #[test]
    fn test_apply_sets_version_and_shared_value() {
        let mut ctx = BuildContext::new(".", None);
        assert!(ctx.version().is_none());

        let record = VersionRecord {
            version_major: "1".into(),
            version_minor: "2".into(),
            version_patch: "3".into(),
            ..Default::default()
        };
        ctx.apply(&record);
        assert_eq!(ctx.version(), Some("1.2.3"));
        assert_eq!(ctx.version_properties(), Some(&record));
    }
}
