use std::fs;

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FindLinesArgs;
use crate::output;

/// First occurrence of one search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct LineMatch {
    term: String,
    /// 1-based; absent when the term never occurs.
    line: Option<usize>,
    text: Option<String>,
}

/// Handle `gravcheck find-lines`.
pub fn handle(args: &FindLinesArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    output::output(&first_matches(&content, &args.terms), flags.format)
}

fn first_matches(content: &str, terms: &[String]) -> Vec<LineMatch> {
    terms
        .iter()
        .map(|term| {
            let hit = content
                .lines()
                .enumerate()
                .find(|(_, line)| line.contains(term.as_str()));
            LineMatch {
                term: term.clone(),
                line: hit.map(|(index, _)| index + 1),
                text: hit.map(|(_, line)| line.trim().to_string()),
            }
        })
        .collect()
}
