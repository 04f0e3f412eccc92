//! Shared test fixtures for the serverless-cicd workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`service`] — [`ServiceFixture`] builder for service descriptions
//! - [`file`] — [`ServiceFile`], a description written to a temporary directory

pub mod file;
pub mod service;

pub use file::ServiceFile;
pub use service::ServiceFixture;
