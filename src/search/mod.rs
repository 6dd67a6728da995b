//! Keyword search over YouTube.
//!
//! Builds the directive sent to yt-dlp, maps the flat hits it returns into
//! [`SearchResultItem`]s, and reports which sort mode was actually honored.

mod query;

pub use query::{
    build_query, clamp_limit, effective_sort, parse_sort, SearchPlan, SortMode, MAX_LIMIT,
    MIN_LIMIT,
};

use crate::youtube::{SearchHit, VideoId};
use serde::Serialize;

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultItem {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Upload date as reported upstream (YYYYMMDD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
}

impl SearchResultItem {
    /// Map a raw hit; hits without an id are dropped.
    pub fn from_hit(hit: SearchHit) -> Option<Self> {
        let video_id = hit.id.filter(|id| !id.is_empty())?;
        let url = match VideoId::parse(&video_id) {
            Some(id) => id.watch_url(),
            None => format!("https://www.youtube.com/watch?v={}", video_id),
        };

        Some(Self {
            video_id,
            title: hit.title.unwrap_or_default(),
            channel: hit.uploader.or(hit.channel).unwrap_or_default(),
            duration_seconds: hit.duration,
            upload_date: hit.upload_date,
            url,
            view_count: hit.view_count,
        })
    }
}

/// Response of the `search_videos` tool.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub limit: usize,
    pub sort_requested: SortMode,
    pub sort_effective: SortMode,
    pub items: Vec<SearchResultItem>,
    /// Upstream failure message; `items` is empty when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Assemble the response from a plan and the hits it produced.
    ///
    /// Items keep upstream order. The effective sort is corrected here since
    /// it depends on what the hits carry.
    pub fn from_hits(query: &str, plan: &SearchPlan, hits: Vec<SearchHit>) -> Self {
        let items: Vec<SearchResultItem> = hits
            .into_iter()
            .filter_map(SearchResultItem::from_hit)
            .take(plan.limit_used)
            .collect();

        let any_view_count = items.iter().any(|item| item.view_count.is_some());

        Self {
            query: query.to_string(),
            limit: plan.limit_used,
            sort_requested: plan.sort_requested,
            sort_effective: effective_sort(plan.sort_requested, any_view_count),
            items,
            error: None,
        }
    }

    /// Response for a search the collaborator could not complete.
    ///
    /// No items means no view counts, so `views` is reported as relevance.
    pub fn failed(query: &str, plan: &SearchPlan, error: String) -> Self {
        Self {
            query: query.to_string(),
            limit: plan.limit_used,
            sort_requested: plan.sort_requested,
            sort_effective: effective_sort(plan.sort_requested, false),
            items: Vec::new(),
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, views: Option<u64>) -> SearchHit {
        SearchHit {
            id: Some(id.to_string()),
            title: Some(format!("Video {}", id)),
            uploader: Some("Uploader".to_string()),
            channel: Some("Channel".to_string()),
            duration: Some(212.0),
            upload_date: None,
            view_count: views,
        }
    }

    #[test]
    fn test_views_downgraded_without_view_counts() {
        let plan = build_query("q", 5, SortMode::Views);
        let response = SearchResponse::from_hits("q", &plan, vec![hit("aaaaaaaaaaa", None)]);

        assert_eq!(response.sort_requested, SortMode::Views);
        assert_eq!(response.sort_effective, SortMode::Relevance);
    }

    #[test]
    fn test_views_kept_with_any_view_count() {
        let plan = build_query("q", 5, SortMode::Views);
        let hits = vec![hit("aaaaaaaaaaa", None), hit("bbbbbbbbbbb", Some(10))];
        let response = SearchResponse::from_hits("q", &plan, hits);

        assert_eq!(response.sort_effective, SortMode::Views);
    }

    #[test]
    fn test_empty_results_keep_requested_sort() {
        let plan = build_query("q", 5, SortMode::Date);
        let response = SearchResponse::from_hits("q", &plan, vec![]);

        assert!(response.items.is_empty());
        assert_eq!(response.sort_effective, SortMode::Date);
        assert!(response.error.is_none());
    }

    #[test]
    fn test_failed_views_search_reports_relevance() {
        let plan = build_query("q", 5, SortMode::Views);
        let response = SearchResponse::failed("q", &plan, "yt-dlp failed".to_string());

        assert!(response.items.is_empty());
        assert_eq!(response.sort_requested, SortMode::Views);
        assert_eq!(response.sort_effective, SortMode::Relevance);

        let plan = build_query("q", 5, SortMode::Date);
        let response = SearchResponse::failed("q", &plan, "yt-dlp failed".to_string());
        assert_eq!(response.sort_effective, SortMode::Date);
    }

    #[test]
    fn test_items_keep_order_and_limit() {
        let plan = build_query("q", 2, SortMode::Relevance);
        let hits = vec![
            hit("ccccccccccc", Some(1)),
            SearchHit { id: None, ..hit("xxxxxxxxxxx", None) },
            hit("aaaaaaaaaaa", Some(99)),
            hit("bbbbbbbbbbb", Some(50)),
        ];
        let response = SearchResponse::from_hits("q", &plan, hits);

        let ids: Vec<_> = response.items.iter().map(|i| i.video_id.as_str()).collect();
        assert_eq!(ids, vec!["ccccccccccc", "aaaaaaaaaaa"]);
    }

    #[test]
    fn test_item_mapping() {
        let item = SearchResultItem::from_hit(hit("dQw4w9WgXcQ", None)).unwrap();

        assert_eq!(item.channel, "Uploader");
        assert_eq!(item.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");

        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("view_count").is_none());
        assert!(value.get("upload_date").is_none());
        assert_eq!(value["duration_seconds"], 212.0);
    }

    #[test]
    fn test_channel_falls_back() {
        let item = SearchResultItem::from_hit(SearchHit {
            uploader: None,
            ..hit("dQw4w9WgXcQ", None)
        })
        .unwrap();
        assert_eq!(item.channel, "Channel");
    }
}
