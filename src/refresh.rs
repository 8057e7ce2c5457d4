//! Background data refresh system
//!
//! Runs the fetch-and-store path on a single background task: once every
//! refresh interval unconditionally, and immediately on request. Results are
//! reported to the main application over a tokio channel.
//!
//! Because every fetch executes on this one task, fetch-and-store cycles are
//! serialized in-process; an interval tick cannot overlap a still-running
//! requested refresh.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::cache::{CacheManager, REFRESH_INTERVAL};
use crate::data::{UserProfile, UsersClient};

/// Messages sent from the background refresh task to the main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// A fetch cycle has started
    RefreshStarted,
    /// The user listing was fetched and the snapshot stored
    UsersUpdated {
        users: Vec<UserProfile>,
        fetched_at: DateTime<Utc>,
    },
    /// The fetch failed; the persisted snapshot is untouched
    RefreshError(String),
    /// The fetch cycle finished, successfully or not
    RefreshCompleted,
}

/// Commands accepted by the background task
#[derive(Debug)]
enum RefreshCommand {
    /// Run the fetch-and-store path now
    RefreshNow,
    /// Stop the task
    Shutdown,
}

/// Configuration for the background refresh
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between forced refreshes
    pub interval: std::time::Duration,
    /// Whether the periodic refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: REFRESH_INTERVAL,
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh task
///
/// This is the explicitly owned task handle for the view lifetime: created at
/// startup, shut down at teardown.
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Channel for sending commands to the task
    commands: mpsc::Sender<RefreshCommand>,
}

impl RefreshHandle {
    /// Spawns the background refresh task
    ///
    /// Every `config.interval` the task runs the fetch-and-store path
    /// unconditionally; snapshot freshness is not re-checked (this is a
    /// forced refresh, not a lazy one). With `enabled: false` only explicit
    /// `request_refresh` calls run.
    ///
    /// # Arguments
    /// * `config` - Refresh interval and enablement
    /// * `client` - The listing API client, owned by the task
    /// * `cache` - Snapshot store, if one could be created
    pub fn spawn(config: RefreshConfig, client: UsersClient, cache: Option<CacheManager>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (cmd_tx, mut cmd_rx) = mpsc::channel::<RefreshCommand>(4);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Skip the first tick (immediate)
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick(), if config.enabled => {
                        run_refresh(&client, cache.as_ref(), &msg_tx).await;
                    }
                    cmd = cmd_rx.recv() => match cmd {
                        Some(RefreshCommand::RefreshNow) => {
                            run_refresh(&client, cache.as_ref(), &msg_tx).await;
                        }
                        Some(RefreshCommand::Shutdown) | None => break,
                    }
                }
            }
        });

        Self {
            receiver: msg_rx,
            commands: cmd_tx,
        }
    }

    /// Requests an immediate run of the fetch-and-store path
    ///
    /// Used for the startup cache miss, the manual refresh key, and retrying
    /// from the error state.
    pub async fn request_refresh(&self) {
        let _ = self.commands.send(RefreshCommand::RefreshNow).await;
    }

    /// Shuts down the background task
    ///
    /// An in-flight fetch is not cancelled; its result is simply never
    /// drained.
    pub async fn shutdown(self) {
        let _ = self.commands.send(RefreshCommand::Shutdown).await;
    }
}

/// Runs one fetch-and-store cycle and reports the outcome
///
/// On success the snapshot is stamped with the fetch completion time and
/// written before the update message is sent; on failure nothing is written.
async fn run_refresh(
    client: &UsersClient,
    cache: Option<&CacheManager>,
    tx: &mpsc::Sender<RefreshMessage>,
) {
    let _ = tx.send(RefreshMessage::RefreshStarted).await;

    match client.fetch_users().await {
        Ok(users) => {
            let fetched_at = Utc::now();
            if let Some(cache) = cache {
                // A failed write is not fatal; the next cycle tries again
                let _ = cache.store(&users, fetched_at);
            }
            let _ = tx
                .send(RefreshMessage::UsersUpdated { users, fetched_at })
                .await;
        }
        Err(err) => {
            let _ = tx.send(RefreshMessage::RefreshError(err.to_string())).await;
        }
    }

    let _ = tx.send(RefreshMessage::RefreshCompleted).await;
}

/// Checks for a pending refresh message without blocking
///
/// # Returns
/// * `Some(RefreshMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
