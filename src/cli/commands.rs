use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "git-version-properties",
    version = VERSION,
    about = "Derive a project's version and build metadata from git",
    after_help = "\
NOTE:
  The version is read from <build-dir>/gitVersionProperties/version.properties
  when that file exists. Otherwise it is computed from `git describe` and the
  current branch, and BUILD_NUMBER from the environment (default 0).

VERSION RULES:
  Tag 1.2.3 on main, master or *-release     -> 1.2.3
  Tag 1.2.3 on any other branch              -> 1.2.3.SNAPSHOT.<epoch seconds>
  Missing tag components are 0; a missing tag or git failure counts as 0.0.

EXIT CODES:
  0  Success
  1  Error (unreadable version.properties, invalid config, file system)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Project root; git runs here
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Build output directory (default: <project-dir>/build)
    #[arg(long, global = true)]
    pub build_dir: Option<PathBuf>,

    /// Config file (default: <project-dir>/gitVersionProperties.json if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the effective version properties
    Print,

    /// Write version.properties from the effective values and config overrides
    #[command(after_help = "\
NOTE:
  Config values override the effective ones; extraProperties start empty.
  --extra entries are merged over configured extraProperties.
  Unless --no-apply is given (or applyVersionPropertiesAfterFileCreation is
  false), the written record becomes the build version.")]
    Create {
        /// Extra property, repeatable
        #[arg(long = "extra", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        extra: Vec<(String, String)>,

        /// Do not apply the written record as the build version
        #[arg(long)]
        no_apply: bool,
    },

    /// Delete version.properties and its directory
    Delete,

    /// Print the effective build version
    Version,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("team=core=infra"),
            Ok(("team".to_string(), "core=infra".to_string()))
        );
        assert_eq!(parse_key_value("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_key_value("=v").is_err());
        assert!(parse_key_value("novalue").is_err());
    }

    #[test]
    fn test_cli_parses_create_flags() {
        let cli = Cli::try_parse_from([
            "git-version-properties",
            "create",
            "--extra",
            "a=1",
            "--extra",
            "b=2",
            "--no-apply",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Create { extra, no_apply } => {
                assert_eq!(extra.len(), 2);
                assert!(no_apply);
            }
            _ => panic!("expected create"),
        }
    }
}
