//! Tutorial planning and chapter generation
//!
//! Both operations turn a [`RepoMap`] into a prompt, call the chat-completion
//! endpoint and shape the response: the planner parses a JSON chapter list,
//! the chapter generator returns markdown verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::config::Limits;
use crate::error::{Result, ServiceError};
use crate::ingest::types::RepoMap;
use crate::llm::ChatClient;
use crate::prompts;

/// A titled, AI-generated section of the synthesized tutorial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

/// Chapter identifier; models emit either numbers or strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChapterId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChapterId::Number(n) => write!(f, "{}", n),
            ChapterId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Generates tutorial plans and chapter content
pub struct TutorialGenerator {
    client: ChatClient,
    limits: Limits,
}

impl TutorialGenerator {
    pub fn new(client: ChatClient, limits: Limits) -> Self {
        Self { client, limits }
    }

    /// Asks the model for a chapter plan covering the ingested repository
    pub async fn plan(&self, repo: &RepoMap) -> Result<Vec<Chapter>> {
        let repo_map = serde_json::to_string_pretty(&build_repo_summary(repo, &self.limits))?;
        let prompt = prompts::plan_prompt(&repo_map);

        let response = self.client.complete(prompts::SYSTEM_PROMPT, &prompt).await?;
        let chapters = parse_chapter_plan(&response)?;
        info!("Planned {} chapters for {}", chapters.len(), repo.repo);

        Ok(chapters)
    }

    /// Generates the markdown content for a single chapter
    pub async fn chapter(&self, chapter: &Chapter, repo: &RepoMap) -> Result<String> {
        let context = serde_json::to_string_pretty(&build_repo_context(repo, &self.limits))?;
        let prompt = prompts::chapter_prompt(
            &context,
            &chapter.id.to_string(),
            &chapter.title,
            &chapter.summary,
        );

        let content = self.client.complete(prompts::SYSTEM_PROMPT, &prompt).await?;
        info!("Generated chapter {} ({} chars)", chapter.id, content.len());

        Ok(content)
    }
}

/// Compact repository view given to the planner: flags plus path lists
fn build_repo_summary(repo: &RepoMap, limits: &Limits) -> Value {
    let paths: Vec<&str> = all_paths(repo).take(limits.max_tree_paths).collect();

    json!({
        "repo": &repo.repo,
        "branch": &repo.branch,
        "projectType": &repo.project_type,
        "stats": &repo.stats,
        "fileTree": paths,
    })
}

/// Chapter-generation context: broad file tree plus clipped code contents
fn build_repo_context(repo: &RepoMap, limits: &Limits) -> Value {
    let file_tree: Vec<&str> = all_paths(repo).take(limits.max_tree_paths).collect();

    let files: Vec<Value> = repo
        .files
        .code
        .iter()
        .take(limits.max_context_files)
        .map(|file| {
            let content = match &file.content {
                Some(content) => clip(content, limits.max_file_chars),
                None => "// No content".to_string(),
            };
            json!({ "path": &file.path, "content": content })
        })
        .collect();

    json!({
        "projectType": &repo.project_type,
        "fileTree": file_tree,
        "files": files,
    })
}

fn all_paths(repo: &RepoMap) -> impl Iterator<Item = &str> {
    repo.files
        .docs
        .iter()
        .chain(repo.files.configs.iter())
        .chain(repo.files.code.iter())
        .map(|file| file.path.as_str())
}

fn clip(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}

/// Parses the planner response into a chapter list
///
/// Models wrap JSON in markdown fences or prose despite instructions, so the
/// outermost array is located before parsing.
fn parse_chapter_plan(response: &str) -> Result<Vec<Chapter>> {
    let start = response
        .find('[')
        .ok_or_else(|| ServiceError::Llm("Plan response contains no JSON array".into()))?;
    let end = response
        .rfind(']')
        .filter(|&end| end > start)
        .ok_or_else(|| ServiceError::Llm("Plan response contains no JSON array".into()))?;

    let chapters: Vec<Chapter> = serde_json::from_str(&response[start..=end])
        .map_err(|e| ServiceError::Llm(format!("Failed to parse chapter plan: {}", e)))?;

    if chapters.is_empty() {
        return Err(ServiceError::Llm("Plan response contained no chapters".into()));
    }
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::{ClassifiedFiles, FetchedFile, ProjectType, RepoStats};
    use pretty_assertions::assert_eq;

    fn repo_with_code(count: usize) -> RepoMap {
        let code = (0..count)
            .map(|i| FetchedFile {
                path: format!("src/file{}.rs", i),
                content: Some("fn main() {}".repeat(10)),
            })
            .collect();

        RepoMap {
            repo: "owner/repo".into(),
            branch: "main".into(),
            project_type: ProjectType::default(),
            stats: RepoStats::default(),
            files: ClassifiedFiles { docs: vec![], configs: vec![], code, packages: vec![] },
        }
    }

    #[test]
    fn test_parse_chapter_plan_plain_array() {
        let response = r#"[{"id": 1, "title": "Overview", "summary": "Intro"}]"#;
        let chapters = parse_chapter_plan(response).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].id, ChapterId::Number(1));
        assert_eq!(chapters[0].title, "Overview");
    }

    #[test]
    fn test_parse_chapter_plan_with_fences_and_prose() {
        let response = "Here is the plan:\n```json\n[{\"id\": \"intro\", \"title\": \"Intro\", \"summary\": \"s\"}]\n```\nDone.";
        let chapters = parse_chapter_plan(response).unwrap();
        assert_eq!(chapters[0].id, ChapterId::Text("intro".into()));
    }

    #[test]
    fn test_parse_chapter_plan_rejects_garbage() {
        assert!(parse_chapter_plan("no json here").is_err());
        assert!(parse_chapter_plan("[]").is_err());
        assert!(parse_chapter_plan("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_context_caps_file_count_and_length() {
        let limits = Limits { max_context_files: 50, max_file_chars: 20, ..Limits::default() };
        let context = build_repo_context(&repo_with_code(80), &limits);

        let files = context["files"].as_array().unwrap();
        assert_eq!(files.len(), 50);
        assert_eq!(files[0]["content"].as_str().unwrap().chars().count(), 20);
    }

    #[test]
    fn test_context_placeholder_for_missing_content() {
        let mut repo = repo_with_code(1);
        repo.files.code[0].content = None;

        let context = build_repo_context(&repo, &Limits::default());
        assert_eq!(context["files"][0]["content"], "// No content");
    }

    #[test]
    fn test_summary_tree_is_capped() {
        let limits = Limits { max_tree_paths: 10, ..Limits::default() };
        let summary = build_repo_summary(&repo_with_code(25), &limits);
        assert_eq!(summary["fileTree"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_chapter_id_display() {
        assert_eq!(ChapterId::Number(7).to_string(), "7");
        assert_eq!(ChapterId::Text("setup".into()).to_string(), "setup");
    }
}
