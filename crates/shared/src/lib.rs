pub mod config;
mod config_env;
pub mod content;
pub mod credential;
pub mod llm;
pub mod models;
pub mod pipeline;
