//! In-memory card identifier to name directory
//!
//! Bulk-loaded once at startup from a YGOPRODeck `cardinfo.json` dump and
//! grown dynamically when remote lookups succeed. Shared across requests,
//! so the map sits behind a mutex.

use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// One card record in the YGOPRODeck dump
#[derive(Debug, Deserialize)]
struct CardRecord {
    id: u64,
    name: String,
}

/// Dump file structure: `{"data": [{"id": ..., "name": ...}, ...]}`
#[derive(Debug, Deserialize)]
struct CardInfoFile {
    data: Vec<CardRecord>,
}

/// Identifier -> name directory, shared across requests
pub struct CardDirectory {
    cards: Mutex<HashMap<String, String>>,
}

impl CardDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            cards: Mutex::new(HashMap::new()),
        }
    }

    /// Load the directory from a cardinfo.json dump file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let file: CardInfoFile = serde_json::from_str(&json)?;

        let cards: HashMap<String, String> = file
            .data
            .into_iter()
            .map(|c| (c.id.to_string(), c.name))
            .collect();

        log::info!("Loaded {} cards from {}", cards.len(), path.display());

        Ok(Self {
            cards: Mutex::new(cards),
        })
    }

    /// Look up a card name by identifier
    pub fn lookup(&self, card_id: &str) -> Option<String> {
        self.cards.lock().unwrap().get(card_id).cloned()
    }

    /// Remember a resolved name for subsequent lookups. Idempotent
    /// insert/overwrite; not persisted across restarts.
    pub fn remember(&self, card_id: &str, name: &str) {
        self.cards
            .lock()
            .unwrap()
            .insert(card_id.to_string(), name.to_string());
    }

    /// Number of known cards
    pub fn len(&self) -> usize {
        self.cards.lock().unwrap().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.cards.lock().unwrap().is_empty()
    }
}

impl Default for CardDirectory {
    fn default() -> Self {
        Self::new()
    }
}
