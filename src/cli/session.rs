use crate::cli::commands::Cli;
use crate::config::Config;
use crate::error::VersionError;
use crate::git::GitCommand;
use crate::output;
use crate::publish::{BuildContext, Origin, RecordPublisher};

/// Build state after the version record has been published.
pub struct Session {
    pub ctx: BuildContext,
    pub origin: Origin,
    pub config: Config,
}

/// Load config, then restore or compute the record and apply it to the build.
pub fn open(cli: &Cli) -> Result<Session, VersionError> {
    let mut ctx = BuildContext::new(&cli.project_dir, cli.build_dir.clone());
    let config = Config::load(&ctx.project_dir, cli.config.as_deref())?;
    let git = GitCommand::new(&ctx.project_dir);
    let origin = RecordPublisher::new(&git).publish(&mut ctx)?;
    Ok(Session {
        ctx,
        origin,
        config,
    })
}

/// Print `e` and return the failure exit code.
pub fn report_error(e: &VersionError, json_output: bool) -> i32 {
    if json_output {
        output::json::print(&output::json::error(e));
    } else {
        eprintln!("Error: {}", e.message);
    }
    1
}
