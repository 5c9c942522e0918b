use serde::{Deserialize, Serialize};

/// Stores API keys for the external services the server talks to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    /// Groq API key used for chat-completion requests
    pub groq_api_key: Option<String>,
    /// GitHub API token for authenticated requests (raises rate limits)
    pub github_token: Option<String>,
}

impl ApiKeys {
    /// Loads API keys from the process environment
    pub fn from_env() -> Self {
        Self {
            groq_api_key: get_env_value("GROQ_API_KEY"),
            github_token: get_env_value("GITHUB_TOKEN"),
        }
    }
}

/// Reads an environment variable, treating empty values as unset
pub fn get_env_value(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_env_value_is_none() {
        std::env::set_var("REPOTUTOR_TEST_EMPTY", "");
        assert_eq!(get_env_value("REPOTUTOR_TEST_EMPTY"), None);

        std::env::set_var("REPOTUTOR_TEST_SET", "value");
        assert_eq!(get_env_value("REPOTUTOR_TEST_SET"), Some("value".to_string()));
    }
}
