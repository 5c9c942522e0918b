mod env_manager;

use std::fs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

pub use env_manager::{get_env_value, ApiKeys};

const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";
const DEFAULT_LLM_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";

/// Main configuration struct for the application
///
/// Holds API keys, upstream endpoint locations, model settings and the
/// limits applied during repository ingestion and prompt construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API keys for the external services
    #[serde(default)]
    pub api_keys: ApiKeys,
    /// GitHub endpoint configuration
    #[serde(default)]
    pub github: GitHubConfig,
    /// Chat-completion endpoint configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Limits applied while ingesting repositories and building prompts
    #[serde(default)]
    pub limits: Limits,
}

/// Locations of the GitHub REST and raw-content endpoints
///
/// Overridable so tests can point the ingestor at a mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the GitHub REST API
    pub api_base: String,
    /// Base URL for raw file contents
    pub raw_base: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

/// Settings for the OpenAI-compatible chat-completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the chat-completion API
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

/// Limits applied during ingestion and prompt construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum number of code files fetched per repository
    pub max_code_files: usize,
    /// Maximum number of code files embedded in a chapter prompt
    pub max_context_files: usize,
    /// Maximum number of paths listed in the prompt file tree
    pub max_tree_paths: usize,
    /// Maximum characters of a single file embedded in a prompt
    pub max_file_chars: usize,
}

impl Config {
    /// Creates a configuration from environment variables and defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.api_keys = ApiKeys::from_env();
        if let Some(base) = get_env_value("GITHUB_API_BASE_URL") {
            config.github.api_base = base;
        }
        if let Some(base) = get_env_value("GITHUB_RAW_BASE_URL") {
            config.github.raw_base = base;
        }
        if let Some(base) = get_env_value("GROQ_API_BASE_URL") {
            config.llm.base_url = base;
        }
        if let Some(model) = get_env_value("GROQ_MODEL") {
            config.llm.model = model;
        }
        config
    }

    /// Loads configuration from the default config file location
    ///
    /// If the config directory cannot be determined (e.g. no home directory)
    /// or the config file doesn't exist, falls back to environment-derived
    /// defaults. The config file is expected to be in TOML format; environment
    /// variables override file values for API keys and endpoints.
    pub fn load() -> Result<Self> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(Self::from_env());
        };
        let config_path = config_dir.join("repotutor").join("config.toml");

        if !config_path.exists() {
            return Ok(Self::from_env());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| ServiceError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| ServiceError::Config(format!("Failed to parse config file: {}", e)))?;

        let env_keys = ApiKeys::from_env();
        if env_keys.groq_api_key.is_some() {
            config.api_keys.groq_api_key = env_keys.groq_api_key;
        }
        if env_keys.github_token.is_some() {
            config.api_keys.github_token = env_keys.github_token;
        }
        if let Some(model) = get_env_value("GROQ_MODEL") {
            config.llm.model = model;
        }

        Ok(config)
    }

    /// Retrieves the Groq API key from the configuration
    ///
    /// Returns the key as a string if it exists, otherwise returns an error
    pub fn groq_api_key(&self) -> Result<&str> {
        self.api_keys
            .groq_api_key
            .as_deref()
            .ok_or_else(|| ServiceError::Config("GROQ_API_KEY not configured".into()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_keys: ApiKeys::default(),
            github: GitHubConfig::default(),
            llm: LlmConfig::default(),
            limits: Limits::default(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            raw_base: DEFAULT_GITHUB_RAW_BASE.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            timeout_seconds: 60,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_code_files: 300,
            max_context_files: 50,
            max_tree_paths: 500,
            max_file_chars: 8000,
        }
    }
}
