//! FitTrack Library
//!
//! Daily energy and macro targets, workout recommendations, food and weight
//! logging, and AI plan requests behind an MCP server.

pub mod ai;
pub mod build_info;
pub mod config;
pub mod db;
pub mod engine;
pub mod mcp;
pub mod models;
pub mod tools;
