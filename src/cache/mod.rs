//! Cache module for persisting the fetched user listing to disk
//!
//! This module provides a cache manager that persists one snapshot of the
//! user listing to the filesystem with a capture timestamp and a schema tag.
//! A missing, malformed, or schema-mismatched snapshot is treated as a cache
//! miss, never as an error.

mod manager;

pub use manager::{CacheManager, Snapshot};

use std::time::Duration;

/// How long a snapshot stays fresh, and how often the forced refresh runs
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(2 * 60);
