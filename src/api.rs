//! Request and response payloads for the HTTP API
//!
//! Wire field names are camelCase to match the browser client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::types::RepoMap;
use crate::tutorial::Chapter;

/// Request payload for repository ingestion
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubRequest {
    /// URL of the public GitHub repository to ingest
    pub repo_url: String,
}

/// Request payload for chapter planning
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// The ingested repository payload; absent → 400
    pub repo_data: Option<RepoMap>,
}

/// Response payload for chapter planning
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub chapters: Vec<Chapter>,
}

/// Request payload for chapter content generation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRequest {
    /// The chapter to generate; absent → 400
    pub chapter: Option<Chapter>,
    /// The ingested repository payload; absent → 400
    pub repo_data: Option<RepoMap>,
}

/// Response payload for chapter content generation
#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterResponse {
    /// Generated chapter markdown
    pub content: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Current status
    pub status: String,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
    /// Service uptime in seconds
    pub uptime: u64,
}
