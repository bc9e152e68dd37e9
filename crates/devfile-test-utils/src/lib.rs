//! Shared test fakes and fixtures for the devfile-flattener workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`clients`]: recording fake HTTP and Kubernetes clients
//! - [`merger`]: a [`merger::RecordingMerger`] counting collaborator calls
//! - [`fixtures`]: terse constructors for devfiles and plugin components

pub mod clients;
pub mod fixtures;
pub mod merger;

pub use clients::{FakeHttpClient, FakeKubeClient};
pub use merger::RecordingMerger;
