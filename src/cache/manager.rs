//! Cache manager for persisting the user listing to disk
//!
//! Provides a `CacheManager` that stores a single snapshot of user records as
//! a JSON file with a capture timestamp, failing soft to a cache miss when
//! the slot is missing or unreadable.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::REFRESH_INTERVAL;
use crate::data::UserProfile;

/// Schema tag written into every snapshot; a mismatch on load is a cache miss
const SNAPSHOT_SCHEMA: u32 = 1;

/// File name of the single snapshot slot
const SNAPSHOT_FILE: &str = "users.json";

/// One cached page of user records plus its capture time
///
/// A new snapshot unconditionally replaces the prior one; there is no
/// history and no merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema tag, `SNAPSHOT_SCHEMA` for snapshots written by this version
    schema: u32,
    /// The cached records, in fetch order
    pub data: Vec<UserProfile>,
    /// When the records were fetched
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Creates a snapshot carrying the current schema tag
    pub fn new(data: Vec<UserProfile>, timestamp: DateTime<Utc>) -> Self {
        Self {
            schema: SNAPSHOT_SCHEMA,
            data,
            timestamp,
        }
    }

    /// Returns true while `now - timestamp` is under the refresh interval
    ///
    /// Staleness is a pure function of wall-clock time. It is evaluated only
    /// at the startup decision point; the forced periodic refresh never
    /// consults it.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.timestamp)
            < Duration::milliseconds(REFRESH_INTERVAL.as_millis() as i64)
    }
}

/// Manages the single persisted snapshot slot
///
/// The snapshot is stored as a JSON file in an XDG-compliant cache directory
/// (`~/.cache/hubgrid/` on Linux). The slot is shared process-wide; nothing
/// coordinates concurrent instances, so across processes the last writer
/// wins.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where the snapshot file lives
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using an XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory); the application then runs uncached.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "hubgrid")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    #[allow(dead_code)]
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path of the snapshot slot
    fn snapshot_path(&self) -> PathBuf {
        self.cache_dir.join(SNAPSHOT_FILE)
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Reads the persisted snapshot
    ///
    /// Returns `None` if the slot is missing, unreadable, malformed, or
    /// carries a different schema tag. Never returns an error outward.
    pub fn load(&self) -> Option<Snapshot> {
        let content = fs::read_to_string(self.snapshot_path()).ok()?;
        let snapshot: Snapshot = serde_json::from_str(&content).ok()?;

        (snapshot.schema == SNAPSHOT_SCHEMA).then_some(snapshot)
    }

    /// Writes `records` as the sole snapshot, replacing any prior value
    ///
    /// # Arguments
    /// * `records` - The fetched records, in fetch order
    /// * `timestamp` - The fetch completion time
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn store(&self, records: &[UserProfile], timestamp: DateTime<Utc>) -> std::io::Result<()> {
        self.ensure_dir()?;

        let snapshot = Snapshot::new(records.to_vec(), timestamp);
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.snapshot_path(), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cache() -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    fn sample_users() -> Vec<UserProfile> {
        vec![
            UserProfile {
                id: 583231,
                login: "octocat".to_string(),
                avatar_url: "https://avatars.githubusercontent.com/u/583231?v=4".to_string(),
                html_url: "https://github.com/octocat".to_string(),
            },
            UserProfile {
                id: 1024025,
                login: "torvalds".to_string(),
                avatar_url: "https://avatars.githubusercontent.com/u/1024025?v=4".to_string(),
                html_url: "https://github.com/torvalds".to_string(),
            },
        ]
    }

    #[test]
    fn test_store_creates_file_in_cache_directory() {
        let (cache, temp_dir) = create_test_cache();

        cache
            .store(&sample_users(), Utc::now())
            .expect("Store should succeed");

        let expected_path = temp_dir.path().join("users.json");
        assert!(expected_path.exists(), "Snapshot file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"schema\""));
        assert!(content.contains("\"octocat\""));
        assert!(content.contains("\"timestamp\""));
    }

    #[test]
    fn test_load_returns_none_for_missing_slot() {
        let (cache, _temp_dir) = create_test_cache();

        assert!(cache.load().is_none(), "Empty cache should be a miss");
    }

    #[test]
    fn test_store_then_load_roundtrip() {
        let (cache, _temp_dir) = create_test_cache();
        let users = sample_users();
        let timestamp = Utc::now();

        cache.store(&users, timestamp).expect("Store should succeed");

        let snapshot = cache.load().expect("Should load stored snapshot");
        assert_eq!(snapshot.data, users);
        assert_eq!(snapshot.timestamp, timestamp);
    }

    #[test]
    fn test_load_returns_none_for_malformed_slot() {
        let (cache, _temp_dir) = create_test_cache();
        cache.ensure_dir().unwrap();
        fs::write(cache.snapshot_path(), "not json at all").unwrap();

        assert!(cache.load().is_none(), "Malformed slot should be a miss");
    }

    #[test]
    fn test_load_returns_none_for_mismatched_schema() {
        let (cache, _temp_dir) = create_test_cache();
        cache.ensure_dir().unwrap();
        let json = r#"{ "schema": 2, "data": [], "timestamp": "2026-01-01T00:00:00Z" }"#;
        fs::write(cache.snapshot_path(), json).unwrap();

        assert!(cache.load().is_none(), "Unknown schema should be a miss");
    }

    #[test]
    fn test_load_returns_none_for_missing_schema_tag() {
        let (cache, _temp_dir) = create_test_cache();
        cache.ensure_dir().unwrap();
        let json = r#"{ "data": [], "timestamp": "2026-01-01T00:00:00Z" }"#;
        fs::write(cache.snapshot_path(), json).unwrap();

        assert!(cache.load().is_none(), "Untagged slot should be a miss");
    }

    #[test]
    fn test_store_replaces_prior_snapshot() {
        let (cache, _temp_dir) = create_test_cache();
        let users = sample_users();

        cache.store(&users, Utc::now()).expect("First store should succeed");
        cache
            .store(&users[..1], Utc::now())
            .expect("Second store should succeed");

        let snapshot = cache.load().expect("Should load snapshot");
        assert_eq!(snapshot.data.len(), 1, "Slot should hold the latest records");
        assert_eq!(snapshot.data[0].login, "octocat");
    }

    #[test]
    fn test_store_twice_is_idempotent_up_to_timestamp() {
        let (cache, _temp_dir) = create_test_cache();
        let users = sample_users();

        cache.store(&users, Utc::now()).expect("First store should succeed");
        let first = cache.load().expect("Should load snapshot");

        cache.store(&users, Utc::now()).expect("Second store should succeed");
        let second = cache.load().expect("Should load snapshot");

        assert_eq!(first.data, second.data);
        assert!(second.timestamp >= first.timestamp);
    }

    #[test]
    fn test_store_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache").join("dir");
        let cache = CacheManager::with_dir(nested_path.clone());

        cache
            .store(&sample_users(), Utc::now())
            .expect("Store should succeed");

        assert!(nested_path.join("users.json").exists());
    }

    #[test]
    fn test_snapshot_fresh_within_interval() {
        let timestamp = Utc::now();
        let snapshot = Snapshot::new(sample_users(), timestamp);

        let thirty_seconds_later = timestamp + Duration::seconds(30);
        assert!(snapshot.is_fresh(thirty_seconds_later));
    }

    #[test]
    fn test_snapshot_stale_past_interval() {
        let timestamp = Utc::now();
        let snapshot = Snapshot::new(sample_users(), timestamp);

        let after_150_seconds = timestamp + Duration::seconds(150);
        assert!(!snapshot.is_fresh(after_150_seconds));
    }

    #[test]
    fn test_snapshot_stale_exactly_at_interval() {
        let timestamp = Utc::now();
        let snapshot = Snapshot::new(sample_users(), timestamp);

        // Freshness is a strict inequality
        let at_interval = timestamp + Duration::seconds(120);
        assert!(!snapshot.is_fresh(at_interval));

        let just_before = timestamp + Duration::seconds(119);
        assert!(snapshot.is_fresh(just_before));
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(cache) = CacheManager::new() {
            let path_str = cache.cache_dir.to_string_lossy();
            assert!(
                path_str.contains("hubgrid"),
                "Cache path should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}
