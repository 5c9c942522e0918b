use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload produced by repository ingestion
///
/// This is the `repoData` object the tutorial endpoints consume. Field names
/// are camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoMap {
    /// Repository identifier in `owner/repo` form
    pub repo: String,
    /// Branch the files were fetched from
    pub branch: String,
    /// Detected project-type flags
    #[serde(default)]
    pub project_type: ProjectType,
    /// Counts per category
    #[serde(default)]
    pub stats: RepoStats,
    /// Classified file lists
    #[serde(default)]
    pub files: ClassifiedFiles,
}

/// Project-type flags derived from the lowercased tree paths
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectType {
    pub is_node: bool,
    pub is_python: bool,
    pub is_go: bool,
    pub is_rust: bool,
    pub is_java: bool,
    /// More than one `package.json` in the tree
    pub is_monorepo: bool,
}

/// Counts of tree entries and classified files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepoStats {
    /// Total number of entries in the recursive tree listing
    pub total_files: usize,
    pub docs: usize,
    pub configs: usize,
    pub code: usize,
    pub packages: usize,
}

/// Files grouped by classification category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifiedFiles {
    pub docs: Vec<FetchedFile>,
    pub configs: Vec<FetchedFile>,
    pub code: Vec<FetchedFile>,
    /// Successfully parsed `package.json` manifests
    pub packages: Vec<PackageManifest>,
}

/// A repository file with its raw content
///
/// Content is `None` when the raw fetch returned a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedFile {
    pub path: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// A parsed `package.json` manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    pub path: String,
    pub json: Value,
}

/// A single entry of the recursive GitHub tree listing
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// `blob` for files, `tree` for directories
    #[serde(rename = "type")]
    pub kind: String,
}

/// Recursive tree listing response from the GitHub API
#[derive(Debug, Deserialize)]
pub struct TreeResponse {
    pub tree: Vec<TreeEntry>,
}
