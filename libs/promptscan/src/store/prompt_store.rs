use anyhow::{Context, Result};
use uuid::Uuid;

use super::storage::KeyValueStorage;
use super::tags::{all_tags, infer_tags};
use super::types::{filter_prompts, PromptFilter, SavedPrompt};
use crate::common::get_current_timestamp_millis;

/// The whole library lives as one JSON array under this key.
pub const STORAGE_KEY: &str = "prompt_scanner_saved";

/// Saved prompts over an injected key-value storage.
///
/// `save` and `remove` are read-modify-write cycles on a single key. They are
/// not atomic; callers sharing one store across tasks must serialize them.
pub struct PromptStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> PromptStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Newest first. Missing, unreadable or corrupted data reads as an empty library.
    pub fn list(&self) -> Vec<SavedPrompt> {
        self.load().unwrap_or_else(|e| {
            log::warn!("Failed to load saved prompts: {:?}", e);
            Vec::new()
        })
    }

    pub fn get(&self, id: &str) -> Option<SavedPrompt> {
        self.list().into_iter().find(|p| p.id == id)
    }

    /// Does not reject empty text; callers check before saving.
    ///
    /// Fails without writing if the current library cannot be read or parsed.
    pub fn save(&self, text: &str) -> Result<SavedPrompt> {
        let mut prompts = self.load()?;

        let mut id = Uuid::new_v4().to_string();
        while prompts.iter().any(|p| p.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let prompt = SavedPrompt::new(
            id,
            text.to_string(),
            infer_tags(text),
            get_current_timestamp_millis(),
        );

        prompts.insert(0, prompt.clone());
        self.persist(&prompts)?;

        log::info!("Saved prompt {} with tags {:?}", prompt.id, prompt.tags);
        Ok(prompt)
    }

    /// Unknown ids leave the contents unchanged.
    pub fn remove(&self, id: &str) -> Result<()> {
        let prompts = self.load()?;
        let before = prompts.len();
        let remaining: Vec<SavedPrompt> = prompts.into_iter().filter(|p| p.id != id).collect();

        self.persist(&remaining)?;

        if remaining.len() < before {
            log::info!("Removed prompt {}", id);
        } else {
            log::debug!("No prompt with id {} to remove", id);
        }
        Ok(())
    }

    pub fn search(&self, filter: &PromptFilter) -> Vec<SavedPrompt> {
        filter_prompts(&self.list(), filter)
    }

    pub fn tags(&self) -> Vec<String> {
        all_tags(&self.list())
    }

    fn load(&self) -> Result<Vec<SavedPrompt>> {
        let raw = self
            .storage
            .get(STORAGE_KEY)
            .context("Failed to read saved prompts")?;
        match raw {
            Some(raw) => serde_json::from_str(&raw).context("Saved prompts are corrupted"),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, prompts: &[SavedPrompt]) -> Result<()> {
        let raw = serde_json::to_string(prompts).context("Failed to serialize saved prompts")?;
        self.storage
            .set(STORAGE_KEY, &raw)
            .context("Failed to persist saved prompts")
    }
}
