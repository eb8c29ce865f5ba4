//! Shared configuration and error types for the xCard workspace.

pub mod config;
pub mod error;
