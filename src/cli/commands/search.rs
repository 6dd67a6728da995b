//! Search command implementation.

use super::FAILURE_EXIT_CODE;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::handlers::{SearchArgs, ToolHandlers};
use crate::search::SearchResponse;
use anyhow::Result;

/// Search YouTube and print the results.
pub async fn run_search(
    query: &str,
    limit: Option<i64>,
    sort: &str,
    json: bool,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Search, &settings)?;

    let handlers = ToolHandlers::from_settings(&settings)?;
    let spinner = (!json).then(|| Output::spinner("Searching YouTube..."));

    let response = handlers
        .search_videos(SearchArgs {
            query: query.to_string(),
            limit,
            sort: Some(sort.to_string()),
        })
        .await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let response = response?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if let Some(error) = &response.error {
        Output::error(&format!("Search failed: {}", error));
    }

    if let Some(code) = exit_code(&response) {
        std::process::exit(code);
    }
    if json {
        return Ok(());
    }

    if response.items.is_empty() {
        Output::info("No results found.");
        return Ok(());
    }

    Output::header(&format!("Results for \"{}\"", response.query));
    if response.sort_effective != response.sort_requested {
        Output::warning(&format!(
            "No view counts available; showing {} order instead of {}.",
            response.sort_effective, response.sort_requested
        ));
    }

    for (i, item) in response.items.iter().enumerate() {
        Output::search_item(i + 1, item);
    }
    println!();

    Ok(())
}

/// Non-zero status when the upstream search failed, in both output modes.
fn exit_code(response: &SearchResponse) -> Option<i32> {
    response.error.as_ref().map(|_| FAILURE_EXIT_CODE)
}
