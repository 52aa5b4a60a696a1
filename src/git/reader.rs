use std::sync::LazyLock;

use regex::Regex;

use super::query::QueryRunner;

pub const DEFAULT_TAG_VERSION: &str = "0.0";
pub const DEFAULT_COMMITS_SINCE_TAG: &str = "0";
pub const UNKNOWN_BRANCH: &str = "<unknown branch>";

/// `<tag>-<commits>-g<sha>` where the tag part is greedy, so the nearest
/// trailing `-<n>-g` wins when the tag itself contains dashes.
static DESCRIBE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<tag>.*)-(?P<commits>[^-]*)-g)?(?P<sha>[^-]*)$")
        .expect("describe pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Describe {
    pub tag_version: String,
    pub commits_since_tag: String,
    pub short_hash: String,
}

impl Default for Describe {
    fn default() -> Self {
        Self {
            tag_version: DEFAULT_TAG_VERSION.to_string(),
            commits_since_tag: DEFAULT_COMMITS_SINCE_TAG.to_string(),
            short_hash: String::new(),
        }
    }
}

/// Everything version control tells us about the current checkout.
/// Every field is always populated; unavailable data yields the fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionControlSnapshot {
    pub tag_version: String,
    pub commits_since_tag: String,
    pub short_hash: String,
    pub branch: String,
}

impl VersionControlSnapshot {
    pub fn new(describe: Describe, branch: impl Into<String>) -> Self {
        Self {
            tag_version: describe.tag_version,
            commits_since_tag: describe.commits_since_tag,
            short_hash: describe.short_hash,
            branch: branch.into(),
        }
    }
}

/// Parse one line of `git describe --tags --long --always` output.
pub fn parse_describe(line: &str) -> Option<Describe> {
    let caps = DESCRIBE_PATTERN.captures(line.trim())?;
    let field = |name: &str, fallback: &str| {
        caps.name(name)
            .map_or_else(|| fallback.to_string(), |m| m.as_str().to_string())
    };
    Some(Describe {
        tag_version: field("tag", DEFAULT_TAG_VERSION),
        commits_since_tag: field("commits", DEFAULT_COMMITS_SINCE_TAG),
        short_hash: field("sha", ""),
    })
}

pub struct VersionControlReader<'a, R: QueryRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: QueryRunner + ?Sized> VersionControlReader<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    pub fn describe(&self) -> Describe {
        let lines = match self
            .runner
            .run_read_only_query(&["describe", "--tags", "--long", "--always"])
        {
            Ok(lines) => lines,
            Err(e) => {
                tracing::info!("git describe unavailable, using defaults: {}", e);
                return Describe::default();
            }
        };

        let first = lines.first().map(String::as_str).unwrap_or_default();
        parse_describe(first).unwrap_or_else(|| {
            tracing::info!("unparseable git describe output '{}', using defaults", first);
            Describe::default()
        })
    }

    pub fn branch(&self) -> String {
        match self
            .runner
            .run_read_only_query(&["rev-parse", "--abbrev-ref", "HEAD"])
        {
            Ok(lines) => match lines.first() {
                Some(line) => line.trim().to_string(),
                None => UNKNOWN_BRANCH.to_string(),
            },
            Err(e) => {
                tracing::info!("git branch unavailable: {}", e);
                UNKNOWN_BRANCH.to_string()
            }
        }
    }

    pub fn snapshot(&self) -> VersionControlSnapshot {
        VersionControlSnapshot::new(self.describe(), self.branch())
    }
}
