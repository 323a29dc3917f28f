//! Tool server for life-science research agents.
//!
//! A catalog of independent tool handlers behind a Bedrock-agent-style
//! invocation envelope, plus the in-vivo study schedule optimizer exposed
//! both as a tool and as a direct HTTP endpoint.

pub mod catalog;
pub mod cli;
pub mod clients;
pub mod config;
pub mod envelope;
pub mod handlers;
pub mod scheduler;
pub mod server;
