//! GitHub users API client
//!
//! Fetches the public user listing from the GitHub API and normalizes the
//! response records into our `UserProfile` data structure.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::UserProfile;

/// Fixed listing endpoint; only the first page GitHub returns is used
const GITHUB_USERS_URL: &str = "https://api.github.com/users";

/// User-Agent header value; the GitHub API rejects requests without one
const APP_USER_AGENT: &str = concat!("hubgrid/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when fetching the user listing
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse the API response
    #[error("Failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A raw record from the listing endpoint
///
/// Every field is optional so one malformed record cannot fail the whole
/// fetch; normalization drops records missing a consumed field.
#[derive(Debug, Deserialize)]
struct RawUser {
    id: Option<u64>,
    login: Option<String>,
    avatar_url: Option<String>,
    html_url: Option<String>,
}

impl RawUser {
    /// Converts a raw record into a `UserProfile`, or `None` if any consumed
    /// field is missing
    fn normalize(self) -> Option<UserProfile> {
        Some(UserProfile {
            id: self.id?,
            login: self.login?,
            avatar_url: self.avatar_url?,
            html_url: self.html_url?,
        })
    }
}

/// Client for fetching the public user listing from the GitHub API
#[derive(Debug, Clone)]
pub struct UsersClient {
    /// HTTP client for making requests
    http_client: Client,
    /// URL of the listing endpoint (allows override for testing)
    base_url: String,
}

impl UsersClient {
    /// Creates a new UsersClient pointed at the GitHub API
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: GITHUB_USERS_URL.to_string(),
        }
    }

    /// Creates a new UsersClient with a custom endpoint URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
        }
    }

    /// Fetches all user profiles from the listing endpoint
    ///
    /// Performs one read-only request with no parameters; no pagination
    /// cursor is followed. There are no retries and no timeout override
    /// beyond the platform default.
    ///
    /// # Returns
    /// * `Ok(Vec<UserProfile>)` - Normalized records in endpoint order
    /// * `Err(FetchError)` - Transport failure, non-success status, or an
    ///   unparsable body
    pub async fn fetch_users(&self) -> Result<Vec<UserProfile>, FetchError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, APP_USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        let raw: Vec<RawUser> = serde_json::from_str(&text)?;

        Ok(normalize_records(raw))
    }
}

impl Default for UsersClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops records missing a consumed field, preserving endpoint order
fn normalize_records(raw: Vec<RawUser>) -> Vec<UserProfile> {
    raw.into_iter().filter_map(RawUser::normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A trimmed-down sample of the real listing payload, with one record
    /// missing its login and one unknown field sprinkled in
    const SAMPLE_PAYLOAD: &str = r#"[
        {
            "login": "octocat",
            "id": 583231,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "type": "User"
        },
        {
            "id": 9999,
            "avatar_url": "https://avatars.githubusercontent.com/u/9999?v=4",
            "html_url": "https://github.com/ghost"
        },
        {
            "login": "torvalds",
            "id": 1024025,
            "avatar_url": "https://avatars.githubusercontent.com/u/1024025?v=4",
            "html_url": "https://github.com/torvalds"
        }
    ]"#;

    fn parse_sample() -> Vec<RawUser> {
        serde_json::from_str(SAMPLE_PAYLOAD).expect("Sample payload should parse")
    }

    #[test]
    fn test_normalize_drops_records_missing_a_field() {
        let users = normalize_records(parse_sample());

        assert_eq!(users.len(), 2, "The login-less record should be dropped");
        assert!(users.iter().all(|u| !u.login.is_empty()));
    }

    #[test]
    fn test_normalize_preserves_endpoint_order() {
        let users = normalize_records(parse_sample());

        assert_eq!(users[0].login, "octocat");
        assert_eq!(users[1].login, "torvalds");
    }

    #[test]
    fn test_normalize_keeps_all_consumed_fields() {
        let users = normalize_records(parse_sample());

        assert_eq!(users[0].id, 583231);
        assert_eq!(
            users[0].avatar_url,
            "https://avatars.githubusercontent.com/u/583231?v=4"
        );
        assert_eq!(users[0].html_url, "https://github.com/octocat");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // "type" is not a consumed field; deserialization must not reject it
        let users = normalize_records(parse_sample());
        assert_eq!(users[0].login, "octocat");
    }

    #[test]
    fn test_empty_listing_normalizes_to_empty() {
        let raw: Vec<RawUser> = serde_json::from_str("[]").unwrap();
        assert!(normalize_records(raw).is_empty());
    }

    #[test]
    fn test_non_array_body_is_a_parse_error() {
        let result: Result<Vec<RawUser>, _> = serde_json::from_str(r#"{"message": "rate limited"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_error_display() {
        let err: FetchError = serde_json::from_str::<Vec<RawUser>>("not json")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("Failed to parse API response"));
    }

    #[test]
    fn test_default_client_points_at_github() {
        let client = UsersClient::default();
        assert_eq!(client.base_url, "https://api.github.com/users");
    }

    #[test]
    fn test_with_base_url_overrides_endpoint() {
        let client = UsersClient::with_base_url("http://localhost:8080/users".to_string());
        assert_eq!(client.base_url, "http://localhost:8080/users");
    }
}
