//! Search directive building and sort-mode policy.

use crate::error::{Result, TranscriberError};
use serde::{Deserialize, Serialize};

/// Smallest result count sent upstream.
pub const MIN_LIMIT: i64 = 1;
/// Largest result count sent upstream.
pub const MAX_LIMIT: i64 = 10;

/// Requested ordering of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Relevance,
    Views,
    Date,
}

impl std::str::FromStr for SortMode {
    type Err = TranscriberError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "relevance" => Ok(SortMode::Relevance),
            "views" => Ok(SortMode::Views),
            "date" => Ok(SortMode::Date),
            _ => Err(TranscriberError::InvalidSort(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Relevance => write!(f, "relevance"),
            SortMode::Views => write!(f, "views"),
            SortMode::Date => write!(f, "date"),
        }
    }
}

/// Parse an optional sort argument; missing means relevance.
pub fn parse_sort(sort: Option<&str>) -> Result<SortMode> {
    sort.map_or(Ok(SortMode::Relevance), |s| s.parse())
}

/// What to send to the search collaborator, and what the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    /// yt-dlp search directive, e.g. `ytsearch5:rust async`.
    pub directive: String,
    /// The clamped result count.
    pub limit_used: usize,
    pub sort_requested: SortMode,
    /// Tentative; may be downgraded once results are known.
    pub sort_effective: SortMode,
}

/// Clamp `limit` into `MIN_LIMIT..=MAX_LIMIT`.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(MIN_LIMIT, MAX_LIMIT) as usize
}

/// Build the search directive for `query`.
///
/// Upstream only knows a relevance-ordered and a date-ordered mode, so
/// `views` is issued as a relevance search.
pub fn build_query(query: &str, limit: i64, sort: SortMode) -> SearchPlan {
    let limit_used = clamp_limit(limit);

    let prefix = match sort {
        SortMode::Date => "ytsearchdate",
        SortMode::Relevance | SortMode::Views => "ytsearch",
    };

    SearchPlan {
        directive: format!("{}{}:{}", prefix, limit_used, query),
        limit_used,
        sort_requested: sort,
        sort_effective: sort,
    }
}

/// Sort mode actually honored, given whether any result carried a view count.
pub fn effective_sort(requested: SortMode, any_view_count: bool) -> SortMode {
    match requested {
        SortMode::Views if !any_view_count => SortMode::Relevance,
        other => other,
    }
}
