pub mod config;
pub mod desk;
pub mod directory;
pub mod display;
pub mod errors;
pub mod leave;
pub mod matching;
pub mod mcp;
pub mod query;
pub mod resolution;
pub mod types;
