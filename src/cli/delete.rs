use serde_json::json;

use crate::cli::commands::Cli;
use crate::cli::session;
use crate::error::VersionError;
use crate::output;
use crate::publish::{delete_version_properties_file, BuildContext};

pub fn run(cli: &Cli) -> i32 {
    match run_inner(cli) {
        Ok(code) => code,
        Err(e) => session::report_error(&e, cli.json),
    }
}

// Deleting needs neither git nor the current record.
fn run_inner(cli: &Cli) -> Result<i32, VersionError> {
    let ctx = BuildContext::new(&cli.project_dir, cli.build_dir.clone());
    let dir = ctx.version_properties_dir();
    let deleted = delete_version_properties_file(&ctx)?;

    if cli.json {
        output::json::print(&output::json::success(json!({
            "path": dir.to_string_lossy(),
            "deleted": deleted
        })));
    } else {
        output::text::print_deleted(&dir, deleted);
    }
    Ok(0)
}
