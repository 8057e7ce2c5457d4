//! Core data models for hubgrid
//!
//! This module contains the user profile record fetched from the GitHub
//! listing endpoint and re-exports the API client types.

pub mod users;

pub use users::{FetchError, UsersClient};

use serde::{Deserialize, Serialize};

/// A public GitHub user profile
///
/// Only the fields the application consumes are kept; the listing endpoint
/// returns many more. Records are immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique, stable identifier assigned by GitHub
    pub id: u64,
    /// Login handle shown in the grid and matched by the search filter
    pub login: String,
    /// URL of the user's avatar image
    pub avatar_url: String,
    /// URL of the user's profile page
    pub html_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_creation() {
        let user = UserProfile {
            id: 583231,
            login: "octocat".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/583231?v=4".to_string(),
            html_url: "https://github.com/octocat".to_string(),
        };

        assert_eq!(user.id, 583231);
        assert_eq!(user.login, "octocat");
        assert!(user.avatar_url.contains("avatars.githubusercontent.com"));
        assert!(user.html_url.ends_with("/octocat"));
    }

    #[test]
    fn test_user_profile_serialization_roundtrip() {
        let user = UserProfile {
            id: 1024025,
            login: "torvalds".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/1024025?v=4".to_string(),
            html_url: "https://github.com/torvalds".to_string(),
        };

        let json = serde_json::to_string(&user).expect("Failed to serialize UserProfile");
        let deserialized: UserProfile =
            serde_json::from_str(&json).expect("Failed to deserialize UserProfile");

        assert_eq!(deserialized, user);
    }
}
