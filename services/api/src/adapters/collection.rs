//! services/api/src/adapters/collection.rs
//!
//! This module contains the adapter for the third-party order collection script.
//! It implements the `CollectionEndpoint` port from the `core` crate.

use async_trait::async_trait;
use purchase_core::domain::CollectionPayload;
use purchase_core::ports::{CollectionEndpoint, PortError, PortResult};
use reqwest::Client;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `CollectionEndpoint` port with a plain JSON POST.
#[derive(Clone)]
pub struct ScriptCollectionAdapter {
    client: Client,
    url: String,
}

impl ScriptCollectionAdapter {
    /// Creates a new `ScriptCollectionAdapter` posting to `url`.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

//=========================================================================================
// `CollectionEndpoint` Trait Implementation
//=========================================================================================

#[async_trait]
impl CollectionEndpoint for ScriptCollectionAdapter {
    /// Posts the payload and drops the response unread.
    ///
    /// Only transport failures are errors. Any HTTP status counts as delivered,
    /// since the collection script's answer is opaque to the purchase page.
    async fn deliver(&self, payload: &CollectionPayload) -> PortResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        debug!(status = %response.status(), "Collection endpoint answered; response ignored.");
        Ok(())
    }
}
