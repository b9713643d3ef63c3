use std::collections::BTreeSet;

use super::types::SavedPrompt;

pub const DEFAULT_TAG: &str = "General";

// Checked in order; a text may collect several labels.
const TAG_RULES: &[(&str, &[&str])] = &[
    ("Midjourney", &["--v", "--ar", "midjourney"]),
    ("ChatGPT", &["chatgpt", "openai"]),
    ("Code", &["def ", "function", "console.log", "import "]),
    ("Recipe", &["recipe", "ingredients"]),
];

/// Never returns an empty list.
pub fn infer_tags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let mut tags: Vec<String> = TAG_RULES
        .iter()
        .filter(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
        .map(|(tag, _)| tag.to_string())
        .collect();

    if tags.is_empty() {
        tags.push(DEFAULT_TAG.to_string());
    }
    tags
}

/// Deduplicated, sorted union of every tag in `prompts`.
pub fn all_tags(prompts: &[SavedPrompt]) -> Vec<String> {
    prompts
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
