pub mod blessing;
pub mod classifier;
pub mod common;
pub mod config;
pub mod parse;
pub mod pipeline;
pub mod prompts;
