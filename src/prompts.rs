//! Prompt templates for tutorial generation

/// System message sent with every completion request
pub const SYSTEM_PROMPT: &str = "You are a helpful coding tutor.";

/// Builds the prompt that asks the model for a chapter plan
///
/// The model is instructed to answer with a bare JSON array so the response
/// can be parsed without scraping prose.
pub fn plan_prompt(repo_map: &str) -> String {
    format!(
        r#"You are a senior software engineer planning a tutorial that explains a codebase.

STRICT RULES:
1. Base the plan ONLY on the repository map below.
2. Produce between 5 and 8 chapters, ordered from overview to detail.
3. The first chapter must cover the project structure and architecture.
4. Respond with ONLY a JSON array, no prose and no markdown fences.
5. Each element must have the shape {{"id": number, "title": string, "summary": string}}.

Repository Map:
{repo_map}

Task:
Return the chapter plan as a JSON array.
"#
    )
}

/// Builds the prompt for generating a single chapter's content
pub fn chapter_prompt(repo_context: &str, id: &str, title: &str, summary: &str) -> String {
    format!(
        r#"You are a senior software engineer writing a specific chapter for a project tutorial.

STRICT RULES:
1. You MUST use the code provided in the Project Context.
2. CITATION REQUIRED: When you explain a concept, you must reference the specific file path where it is implemented.
3. DO NOT generate a generic "How to build X" tutorial.
4. FOCUS ONLY on the specific topic of the Chapter Info below.
5. If the chapter is about "Auth", only explain the Auth files in the context.
6. If the chapter is "Project Structure" or an overview, use the 'fileTree' to describe the architecture.
7. Use Markdown. Use code blocks with the language specified (e.g. ```tsx).

Project Context (FILES FROM REPO):
{repo_context}

Chapter Info:
ID: {id}
Title: {title}
Summary: {summary}

Task:
Write the detailed tutorial content for this SINGLE chapter.
Start immediately with a level 1 heading (# {title}).
"#
    )
}
