mod types;
mod utils;

pub use types::{CopyFlavor, CopyOutput, ShareOutcome, SharePayload};
pub use utils::{copy_text, resolve_share, CHAT_URL, MIDJOURNEY_SUFFIX};
