//! The signed-in user, mirrored between memory and durable storage.

use std::sync::Arc;

use pizzadash_core::auth::{AuthError, KeyValueStore, Result, UserRecord, USER_STORAGE_KEY};
use pizzadash_core::routes::{Navigator, Route};

/// Holds at most one user record.
///
/// The durable copy lives under [`USER_STORAGE_KEY`]; the in-memory copy is a
/// cache of it for the lifetime of the process. Both agree after every
/// completed `set` or `clear`.
pub struct SessionStore {
    durable: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
    current: Option<UserRecord>,
}

impl SessionStore {
    /// Load the durable record once.
    ///
    /// A value that does not deserialize, or that the store cannot read, is
    /// purged and treated as absent.
    pub async fn hydrate(durable: Arc<dyn KeyValueStore>, navigator: Arc<dyn Navigator>) -> Self {
        let current = match durable.get_item(USER_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<UserRecord>(&raw) {
                Ok(record) => {
                    tracing::debug!(user_id = %record.id, "Restored stored session");
                    Some(record)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding malformed stored user");
                    Self::purge(durable.as_ref()).await;
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored user");
                Self::purge(durable.as_ref()).await;
                None
            }
        };

        Self {
            durable,
            navigator,
            current,
        }
    }

    async fn purge(durable: &dyn KeyValueStore) {
        if let Err(e) = durable.remove_item(USER_STORAGE_KEY).await {
            tracing::warn!(error = %e, "Failed to purge stored user");
        }
    }

    /// The current user, if signed in.
    pub fn get(&self) -> Option<&UserRecord> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the stored user.
    ///
    /// The durable write happens first; if it fails the in-memory copy is
    /// left as it was.
    pub async fn set(&mut self, record: UserRecord) -> Result<()> {
        let raw = serde_json::to_string(&record)
            .map_err(|e| AuthError::Storage(format!("failed to serialize user: {}", e)))?;
        self.durable.set_item(USER_STORAGE_KEY, &raw).await?;

        tracing::info!(user_id = %record.id, "Session established");
        self.current = Some(record);
        Ok(())
    }

    /// Sign out: remove both copies and go back to the landing page.
    pub async fn clear(&mut self) -> Result<()> {
        self.durable.remove_item(USER_STORAGE_KEY).await?;

        if let Some(previous) = self.current.take() {
            tracing::info!(user_id = %previous.id, "Session cleared");
        }
        self.navigator.navigate(Route::Landing);
        Ok(())
    }
}
