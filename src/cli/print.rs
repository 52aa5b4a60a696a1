use serde_json::json;

use crate::cli::commands::Cli;
use crate::cli::session::{self, Session};
use crate::error::VersionError;
use crate::output;

pub fn run(cli: &Cli) -> i32 {
    match run_inner(cli) {
        Ok(code) => code,
        Err(e) => session::report_error(&e, cli.json),
    }
}

fn run_inner(cli: &Cli) -> Result<i32, VersionError> {
    let Session { ctx, origin, .. } = session::open(cli)?;
    let record = ctx.version_properties().cloned().unwrap_or_default();

    if cli.json {
        output::json::print(&output::json::success(json!({
            "origin": origin.as_str(),
            "versionProperties": output::json::record_json(&record)
        })));
    } else {
        output::text::print_version_properties(&record);
    }
    Ok(0)
}
