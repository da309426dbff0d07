//! Ordered card name resolution: directory, then remote API, then placeholder
//!
//! The resolver never fails; a lookup that cannot be satisfied yields a
//! placeholder name embedding the raw identifier, so one bad identifier
//! never aborts a whole conversion.

use crate::card_directory::CardDirectory;
use crate::ygoprodeck;
use std::sync::Arc;

/// Resolves card identifiers to names via the directory with a remote
/// API fallback. Remote hits are memorized into the directory for the
/// lifetime of the process.
pub struct CardResolver {
    directory: Arc<CardDirectory>,
    api_base_url: String,
}

impl CardResolver {
    /// Create a resolver against the production YGOPRODeck API
    pub fn new(directory: Arc<CardDirectory>) -> Self {
        Self::with_base_url(directory, ygoprodeck::API_BASE_URL)
    }

    /// Create a resolver against a specific API base URL (for tests)
    pub fn with_base_url(directory: Arc<CardDirectory>, base_url: impl Into<String>) -> Self {
        Self {
            directory,
            api_base_url: base_url.into(),
        }
    }

    /// Resolve an identifier to a card name.
    ///
    /// Resolution order: local directory, remote API (memorized on
    /// success), then the `Unknown Card (<id>)` placeholder.
    pub async fn resolve(&self, card_id: &str) -> String {
        if let Some(name) = self.directory.lookup(card_id) {
            return name;
        }

        match ygoprodeck::fetch_card_name_from(&self.api_base_url, card_id).await {
            Ok(name) => {
                self.directory.remember(card_id, &name);
                name
            }
            Err(e) => {
                log::warn!("Failed to resolve card {}: {}", card_id, e);
                format!("Unknown Card ({})", card_id)
            }
        }
    }
}
