use serde_json::json;

use crate::cli::commands::Cli;
use crate::cli::session::{self, Session};
use crate::error::VersionError;
use crate::output;
use crate::publish::create_version_properties_file;

pub fn run(cli: &Cli, extra: &[(String, String)], no_apply: bool) -> i32 {
    match run_inner(cli, extra, no_apply) {
        Ok(code) => code,
        Err(e) => session::report_error(&e, cli.json),
    }
}

fn run_inner(cli: &Cli, extra: &[(String, String)], no_apply: bool) -> Result<i32, VersionError> {
    let Session {
        mut ctx, config, ..
    } = session::open(cli)?;
    let defaults = ctx.version_properties().cloned().unwrap_or_default();

    let mut request = config.resolve(&defaults);
    request
        .record
        .extra_properties
        .extend(extra.iter().cloned());
    if no_apply {
        request.apply_after_creation = false;
    }

    let path = create_version_properties_file(&mut ctx, &request)?;

    if cli.json {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy(),
            "applied": request.apply_after_creation,
            "version": ctx.version(),
            "versionProperties": output::json::record_json(&request.record)
        })));
    } else {
        let applied = request.apply_after_creation.then(|| request.record.version());
        output::text::print_created(&path, applied.as_deref());
    }
    Ok(0)
}
