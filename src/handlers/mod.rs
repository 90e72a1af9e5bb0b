//! MCP tool handlers for the visit tracker server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod delete;
pub mod get;
pub mod list;
pub mod submit;
