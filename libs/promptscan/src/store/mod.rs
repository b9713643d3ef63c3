mod prompt_store;
mod storage;
mod tags;
mod types;

pub use prompt_store::{PromptStore, STORAGE_KEY};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage};
pub use tags::{all_tags, infer_tags, DEFAULT_TAG};
pub use types::{filter_prompts, PromptFilter, SavedPrompt};
