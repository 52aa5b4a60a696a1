use serde_json::json;

use crate::cli::commands::Cli;
use crate::cli::session;
use crate::error::VersionError;
use crate::output;

pub fn run(cli: &Cli) -> i32 {
    match run_inner(cli) {
        Ok(code) => code,
        Err(e) => session::report_error(&e, cli.json),
    }
}

fn run_inner(cli: &Cli) -> Result<i32, VersionError> {
    let session = session::open(cli)?;
    let version = session.ctx.version().unwrap_or_default();

    if cli.json {
        output::json::print(&output::json::success(json!({
            "version": version,
            "origin": session.origin.as_str()
        })));
    } else {
        println!("{version}");
    }
    Ok(0)
}
