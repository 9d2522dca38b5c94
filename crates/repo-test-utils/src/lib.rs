//! Shared test utilities for the MCP services workspace.
//!
//! This crate provides standardised git fixtures so the crate test suites do
//! not each grow their own. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at two realism levels
//! - [`repo`]: [`TestOrigin`] builder for an "upstream" repository to clone from

pub mod git;
pub mod repo;

pub use repo::TestOrigin;
