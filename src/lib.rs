#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

/// Request and response payloads for the HTTP API
pub mod api;
/// Configuration module for the application
pub mod config;
/// Error handling types and utilities
pub mod error;
/// Repository ingestion: tree walking, classification, raw file fetching
pub mod ingest;
/// Chat-completion client for the OpenAI-compatible endpoint
pub mod llm;
/// Logging configuration
pub mod logging;
/// Prompt templates for tutorial generation
pub mod prompts;
/// HTTP server: routes, handlers and application state
pub mod server;
/// Tutorial planning and chapter generation
pub mod tutorial;

// Re-export common types
pub use config::Config;
pub use error::{Result, ServiceError};
pub use ingest::types::RepoMap;
pub use ingest::RepoIngestor;
pub use server::create_app;
pub use tutorial::{Chapter, ChapterId, TutorialGenerator};
