//! `gravcheck openapi-paths`: dump the sorted path list of an OpenAPI document.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OpenApiPathsArgs;
use crate::output;

const HEADER: &str = "API Paths found:";
const EXCERPT_CHARS: usize = 500;

#[derive(Debug, Serialize)]
struct PathsWritten {
    output: String,
    count: usize,
}

/// Handle `gravcheck openapi-paths`.
pub fn handle(args: &OpenApiPathsArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let paths = extract_paths(&content)
        .with_context(|| format!("failed to parse {} as JSON", args.file.display()))?;
    write_paths(&args.output, &paths)?;

    tracing::info!(count = paths.len(), output = %args.output.display(), "analysis complete");
    output::output(
        &PathsWritten {
            output: args.output.display().to_string(),
            count: paths.len(),
        },
        flags.format,
    )
}

/// Sorted keys of the top-level `paths` object. A document without `paths`
/// yields an empty list.
fn extract_paths(content: &str) -> anyhow::Result<Vec<String>> {
    let document: Value = serde_json::from_str(content).map_err(|error| {
        let excerpt: String = content.chars().take(EXCERPT_CHARS).collect();
        anyhow::anyhow!("{error}\ntop of file content:\n{excerpt}")
    })?;

    let mut paths: Vec<String> = document
        .get("paths")
        .and_then(Value::as_object)
        .map(|paths| paths.keys().cloned().collect())
        .unwrap_or_default();
    paths.sort();
    Ok(paths)
}

fn write_paths(path: &Path, paths: &[String]) -> anyhow::Result<()> {
    let mut body = String::from(HEADER);
    body.push('\n');
    for item in paths {
        body.push_str(item);
        body.push('\n');
    }
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}
