//! Native stand-in for the browser document's script tags.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use pizzadash_core::auth::{AuthError, Result, ScriptHost, ScriptTag};

/// Loads scripts by fetching their source once and remembering their ids.
#[derive(Debug, Default)]
pub struct HttpScriptHost {
    http: reqwest::Client,
    loaded: Mutex<HashSet<String>>,
}

impl HttpScriptHost {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            loaded: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl ScriptHost for HttpScriptHost {
    fn is_present(&self, id: &str) -> bool {
        self.loaded
            .lock()
            .map(|loaded| loaded.contains(id))
            .unwrap_or(false)
    }

    async fn inject(&self, script: &ScriptTag) -> Result<()> {
        let response = self
            .http
            .get(script.src.clone())
            .send()
            .await
            .map_err(|e| AuthError::ScriptLoadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::ScriptLoadFailed(format!(
                "{} returned {}",
                script.src, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::ScriptLoadFailed(e.to_string()))?;

        tracing::debug!(id = %script.id, src = %script.src, bytes = body.len(), "Script loaded");

        self.loaded
            .lock()
            .map_err(|_| AuthError::ScriptLoadFailed("script registry poisoned".to_string()))?
            .insert(script.id.clone());
        Ok(())
    }
}
