use serde::{Deserialize, Serialize};

/// One entry of the prompt library, stored newest-first.
///
/// Field names on the wire (`createdAt`) match the layout written by earlier
/// clients, so existing libraries load unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPrompt {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl SavedPrompt {
    pub fn new(id: String, text: String, tags: Vec<String>, created_at: i64) -> Self {
        Self {
            id,
            text,
            tags,
            created_at,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Search text plus an optional active tag; both must match.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PromptFilter {
    pub search: Option<String>,
    pub tag: Option<String>,
}

impl PromptFilter {
    pub fn new(search: Option<String>, tag: Option<String>) -> Self {
        Self { search, tag }
    }

    pub fn matches(&self, prompt: &SavedPrompt) -> bool {
        let matches_search = match self.search.as_deref() {
            Some(search) if !search.is_empty() => {
                prompt.text.to_lowercase().contains(&search.to_lowercase())
            }
            _ => true,
        };

        let matches_tag = match self.tag.as_deref() {
            Some(tag) if !tag.is_empty() => prompt.has_tag(tag),
            _ => true,
        };

        matches_search && matches_tag
    }
}

/// Keeps stored order.
pub fn filter_prompts(prompts: &[SavedPrompt], filter: &PromptFilter) -> Vec<SavedPrompt> {
    prompts.iter().filter(|p| filter.matches(p)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(id: &str, text: &str, tags: &[&str]) -> SavedPrompt {
        SavedPrompt::new(
            id.to_string(),
            text.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
            0,
        )
    }

    fn library() -> Vec<SavedPrompt> {
        vec![
            prompt("1", "Recipe for cake", &["Recipe"]),
            prompt("2", "def f(): pass", &["Code"]),
            prompt("3", "--v 6.0 portrait", &["Midjourney"]),
        ]
    }

    #[test]
    fn test_filter_by_tag() {
        let filter = PromptFilter::new(None, Some("Code".to_string()));
        let result = filter_prompts(&library(), &filter);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");
    }

    #[test]
    fn test_filter_by_search_case_insensitive() {
        let filter = PromptFilter::new(Some("CAKE".to_string()), None);
        let result = filter_prompts(&library(), &filter);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_filter_requires_both() {
        let filter = PromptFilter::new(Some("cake".to_string()), Some("Code".to_string()));
        assert!(filter_prompts(&library(), &filter).is_empty());
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let filter = PromptFilter::new(Some(String::new()), Some(String::new()));
        let ids: Vec<String> = filter_prompts(&library(), &filter).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_wire_format_uses_created_at_camel_case() {
        let json = serde_json::to_value(prompt("1", "x", &["General"])).unwrap();
        assert_eq!(json["createdAt"], 0);
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_missing_tags_deserialize_empty() {
        let parsed: SavedPrompt =
            serde_json::from_str(r#"{"id":"a","text":"hi","createdAt":1700000000000}"#).unwrap();
        assert!(parsed.tags.is_empty());
        assert_eq!(parsed.created_at, 1_700_000_000_000);
    }
}
