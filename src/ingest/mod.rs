//! Repository ingestion
//!
//! Walks a GitHub recursive tree listing, classifies paths, fetches raw file
//! contents and assembles the [`RepoMap`] payload the tutorial endpoints
//! consume. Single pass, sequential fetches, no retry.

pub mod classify;
pub mod types;

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, ServiceError};

use classify::FileCategory;
use types::{ClassifiedFiles, FetchedFile, PackageManifest, RepoMap, RepoStats, TreeResponse};

static REPO_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com/([^/\s]+)/([^/\s]+)").expect("valid regex"));

const USER_AGENT: &str = concat!("repotutor/", env!("CARGO_PKG_VERSION"));

/// Fetches and classifies the file tree of a public GitHub repository
pub struct RepoIngestor {
    client: Client,
    api_base: String,
    raw_base: String,
    max_code_files: usize,
}

impl RepoIngestor {
    /// Creates an ingestor from the application configuration
    ///
    /// When a GitHub token is configured it is attached to every request,
    /// which raises the unauthenticated rate limit considerably.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        if let Some(token) = &config.api_keys.github_token {
            let auth_value = format!("token {}", token);
            let value = header::HeaderValue::from_str(&auth_value)
                .map_err(|_| ServiceError::Config("GitHub token contains invalid characters".into()))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.github.timeout_seconds))
            .build()
            .map_err(ServiceError::Http)?;

        Ok(Self {
            client,
            api_base: config.github.api_base.trim_end_matches('/').to_string(),
            raw_base: config.github.raw_base.trim_end_matches('/').to_string(),
            max_code_files: config.limits.max_code_files,
        })
    }

    /// Extracts `owner` and `repo` from a GitHub repository URL
    pub fn parse_repo_url(url: &str) -> Result<(String, String)> {
        let captures = REPO_URL_RE
            .captures(url)
            .ok_or_else(|| ServiceError::Validation("Invalid URL".into()))?;
        Ok((captures[1].to_string(), captures[2].to_string()))
    }

    /// Ingests a repository: metadata, commit, tree, then classified raw files
    pub async fn ingest(&self, repo_url: &str) -> Result<RepoMap> {
        let (owner, repo) = Self::parse_repo_url(repo_url)?;
        info!("Ingesting repository {}/{}", owner, repo);

        let meta = self
            .fetch_json(&format!("{}/repos/{}/{}", self.api_base, owner, repo))
            .await?;
        let branch = meta["default_branch"].as_str().unwrap_or("main").to_string();

        let commit = self
            .fetch_json(&format!("{}/repos/{}/{}/commits/{}", self.api_base, owner, repo, branch))
            .await?;
        let tree_sha = commit["commit"]["tree"]["sha"]
            .as_str()
            .ok_or_else(|| ServiceError::GitHubApi("Commit response missing tree sha".into()))?
            .to_string();

        let tree_url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, owner, repo, tree_sha
        );
        let tree: TreeResponse = serde_json::from_value(self.fetch_json(&tree_url).await?)
            .map_err(|e| ServiceError::GitHubApi(format!("Malformed tree listing: {}", e)))?;

        let project_type = classify::detect_project_types(&tree.tree);
        let total_files = tree.tree.len();

        let mut files = ClassifiedFiles::default();
        for entry in &tree.tree {
            if entry.kind != "blob" {
                continue;
            }
            if classify::is_ignored(&entry.path) {
                continue;
            }

            match classify::classify(&entry.path) {
                Some(FileCategory::Doc) => {
                    let content = self.fetch_raw(&owner, &repo, &branch, &entry.path).await;
                    files.docs.push(FetchedFile { path: entry.path.clone(), content });
                }
                Some(FileCategory::Config) => {
                    let content = self.fetch_raw(&owner, &repo, &branch, &entry.path).await;

                    if entry.path.ends_with("package.json") {
                        let raw = content.as_deref().unwrap_or("{}");
                        match serde_json::from_str::<Value>(raw) {
                            Ok(json) => {
                                files.packages.push(PackageManifest { path: entry.path.clone(), json });
                            }
                            Err(e) => {
                                // Unparseable manifests stay in the configs list
                                warn!("Skipping malformed package.json at {}: {}", entry.path, e);
                            }
                        }
                    }

                    files.configs.push(FetchedFile { path: entry.path.clone(), content });
                }
                Some(FileCategory::Code) => {
                    if files.code.len() >= self.max_code_files {
                        continue;
                    }
                    let content = self.fetch_raw(&owner, &repo, &branch, &entry.path).await;
                    files.code.push(FetchedFile { path: entry.path.clone(), content });
                }
                None => {}
            }
        }

        let stats = RepoStats {
            total_files,
            docs: files.docs.len(),
            configs: files.configs.len(),
            code: files.code.len(),
            packages: files.packages.len(),
        };
        info!(
            "Ingested {}/{}: {} tree entries, {} docs, {} configs, {} code files",
            owner, repo, stats.total_files, stats.docs, stats.configs, stats.code
        );

        Ok(RepoMap {
            repo: format!("{}/{}", owner, repo),
            branch,
            project_type,
            stats,
            files,
        })
    }

    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<Value>().await?),
            StatusCode::NOT_FOUND => {
                Err(ServiceError::GitHubApi(format!("Resource not found: {}", url)))
            }
            StatusCode::FORBIDDEN => {
                Err(ServiceError::GitHubApi("GitHub API rate limit exceeded".into()))
            }
            status => Err(ServiceError::GitHubApi(format!("GitHub API returned {} for {}", status, url))),
        }
    }

    /// Fetches a raw file body; any failure yields `None`, never an error
    async fn fetch_raw(&self, owner: &str, repo: &str, branch: &str, path: &str) -> Option<String> {
        let url = format!("{}/{}/{}/{}/{}", self.raw_base, owner, repo, branch, path);
        debug!("Fetching raw file {}", url);

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                debug!("Raw fetch returned {} for {}", response.status(), path);
                None
            }
            Err(e) => {
                warn!("Raw fetch failed for {}: {}", path, e);
                None
            }
        }
    }
}
