use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::CreateRequest;
use crate::error::VersionError;
use crate::git::{QueryRunner, VersionControlReader};
use crate::models::VersionRecord;
use crate::properties;
use crate::version::BuildInfo;

use super::context::BuildContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Loaded from a version.properties file left by an earlier phase.
    Restored,
    /// Derived from version control and build metadata.
    Computed,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restored => "restored",
            Self::Computed => "computed",
        }
    }
}

pub struct RecordPublisher<'a, R: QueryRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: QueryRunner + ?Sized> RecordPublisher<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Restore the persisted record if there is one, otherwise compute it.
    /// A persisted file that cannot be read is an error, not a reason to recompute.
    pub fn resolve_with(
        &self,
        ctx: &BuildContext,
        build_info: impl FnOnce() -> BuildInfo,
    ) -> Result<(VersionRecord, Origin), VersionError> {
        let path = ctx.version_properties_file();
        if let Some(record) = properties::read_file(&path)? {
            tracing::info!("using version properties from {}", path.display());
            return Ok((record, Origin::Restored));
        }

        tracing::info!("computing version properties from git and build info");
        let snapshot = VersionControlReader::new(self.runner).snapshot();
        let build = build_info();
        let record = VersionRecord::compute(&ctx.project_name, &snapshot, &build);
        Ok((record, Origin::Computed))
    }

    /// Resolve and apply the record to the build.
    pub fn publish(&self, ctx: &mut BuildContext) -> Result<Origin, VersionError> {
        let (record, origin) = self.resolve_with(ctx, BuildInfo::capture)?;
        ctx.apply(&record);
        Ok(origin)
    }
}

/// Write the requested record to the build's version.properties file and,
/// unless disabled, make it the build's version.
pub fn create_version_properties_file(
    ctx: &mut BuildContext,
    request: &CreateRequest,
) -> Result<PathBuf, VersionError> {
    let path = ctx.version_properties_file();
    properties::write_file(&request.record, &path)?;
    tracing::info!("wrote {}", path.display());
    if request.apply_after_creation {
        ctx.apply(&request.record);
    }
    Ok(path)
}

/// Remove the version.properties directory. Returns whether anything was deleted.
pub fn delete_version_properties_file(ctx: &BuildContext) -> Result<bool, VersionError> {
    let dir = ctx.version_properties_dir();
    match fs::remove_dir_all(&dir) {
        Ok(()) => {
            tracing::info!("deleted {}", dir.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(VersionError::file_system(format!(
            "Cannot delete {}: {e}",
            dir.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::DateTime;
    use tempfile::TempDir;

    use super::*;
    use crate::error::ErrorCode;

    struct CountingRunner {
        calls: Cell<usize>,
    }

    impl CountingRunner {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl QueryRunner for CountingRunner {
        fn run_read_only_query(&self, args: &[&str]) -> Result<Vec<String>, VersionError> {
            self.calls.set(self.calls.get() + 1);
            match args.first() {
                Some(&"describe") => Ok(vec!["1.2.3-5-gabc1234".into()]),
                _ => Ok(vec!["feature-x".into()]),
            }
        }
    }

    fn build_at(epoch: i64) -> impl FnOnce() -> BuildInfo {
        move || BuildInfo::new(Some("8".into()), DateTime::from_timestamp(epoch, 0).unwrap())
    }

    fn context(dir: &TempDir) -> BuildContext {
        let project = dir.path().join("demo");
        fs::create_dir_all(&project).unwrap();
        BuildContext::new(project, None)
    }

    #[test]
    fn test_compute_when_no_file() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let runner = CountingRunner::new();

        let (record, origin) = RecordPublisher::new(&runner)
            .resolve_with(&ctx, build_at(1000))
            .unwrap();
        assert_eq!(origin, Origin::Computed);
        assert_eq!(runner.calls.get(), 2);
        assert_eq!(record.application_name, "demo");
        assert_eq!(record.version(), "1.2.3.SNAPSHOT.1000");
        assert_eq!(record.build_number, "8");
        assert_eq!(record.git_sha, "abc1234");
        assert_eq!(record.git_branch, "feature-x");
        assert!(record.extra_properties.is_empty());
    }

    #[test]
    fn test_persist_then_restore_skips_queries() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let runner = CountingRunner::new();
        let publisher = RecordPublisher::new(&runner);

        let (computed, _) = publisher.resolve_with(&ctx, build_at(1000)).unwrap();
        let request = CreateRequest {
            record: computed.clone(),
            apply_after_creation: true,
        };
        create_version_properties_file(&mut ctx, &request).unwrap();
        assert_eq!(ctx.version(), Some("1.2.3.SNAPSHOT.1000"));

        let (restored, origin) = publisher.resolve_with(&ctx, build_at(2000)).unwrap();
        assert_eq!(origin, Origin::Restored);
        assert_eq!(restored, computed);
        assert_eq!(restored.version_complete(), computed.version_complete());
        assert_eq!(runner.calls.get(), 2);
    }

    #[test]
    fn test_create_without_apply_leaves_version() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let request = CreateRequest {
            record: VersionRecord {
                version_major: "9".into(),
                ..Default::default()
            },
            apply_after_creation: false,
        };
        let path = create_version_properties_file(&mut ctx, &request).unwrap();
        assert!(path.exists());
        assert!(ctx.version().is_none());
    }

    #[test]
    fn test_corrupt_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        fs::create_dir_all(ctx.version_properties_dir()).unwrap();
        fs::write(ctx.version_properties_file(), "versionMajor=\\u00\n").unwrap();

        let runner = CountingRunner::new();
        let err = RecordPublisher::new(&runner)
            .resolve_with(&ctx, build_at(1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PersistedFileCorrupt);
        assert_eq!(runner.calls.get(), 0);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        assert!(!delete_version_properties_file(&ctx).unwrap());

        let request = CreateRequest {
            record: VersionRecord::default(),
            apply_after_creation: true,
        };
        create_version_properties_file(&mut ctx, &request).unwrap();
        assert!(delete_version_properties_file(&ctx).unwrap());
        assert!(!ctx.version_properties_dir().exists());
        assert!(!delete_version_properties_file(&ctx).unwrap());
    }
}
