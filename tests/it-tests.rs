use promptscan::normalize::normalize;
use promptscan::process::build_outcome;
use promptscan::image2text::OcrResult;
use promptscan::share::{resolve_share, ShareOutcome, SharePayload};
use promptscan::store::{infer_tags, PromptFilter, PromptStore, SqliteStorage, STORAGE_KEY};
use promptscan::store::KeyValueStorage;

#[cfg(test)]
mod normalize_tests {
    use super::*;

    const NOISY_INPUTS: &[&str] = &[
        "10:42\nPrompt: \"a cat in space\"\n87%\nPrompt: \"a dog on mars\"\nShow more",
        "9:41\n@studio_ai\nTwitter\nhyperrealistic portrait of an old sailor,\nweathered skin, golden hour\n1,204 likes\nVisa fler",
        "Recipe: 1. boil water 2. add pasta 3. stir\n$4.99\n-------",
        "prompt: “neon city at night”\n\n\n\nprompt: ‘quiet’ forest at dawn --ar 16:9",
    ];

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in NOISY_INPUTS {
            let once = normalize(raw).cleaned_text;
            assert_eq!(normalize(&once).cleaned_text, once, "input {:?}", raw);
        }
    }

    #[test]
    fn test_extracted_segments_carry_label() {
        let result = normalize(NOISY_INPUTS[3]);
        assert_eq!(result.extracted_count, 2);
        assert_eq!(
            result.cleaned_text,
            "Prompt: neon city at night\n\nPrompt: 'quiet' forest at dawn --ar 16:9"
        );
    }

    #[test]
    fn test_fallback_removes_chrome() {
        let result = normalize(NOISY_INPUTS[1]);
        assert_eq!(result.extracted_count, 0);
        assert_eq!(
            result.cleaned_text,
            "hyperrealistic portrait of an old sailor, weathered skin, golden hour\n1,204 likes"
        );
    }

    #[test]
    fn test_shared_text_flows_into_normalizer() {
        let payload = SharePayload {
            text: Some("Prompt: \"a paper boat\" Show more".to_string()),
            ..Default::default()
        };
        let raw = match resolve_share(&payload) {
            ShareOutcome::Text(text) => text,
            other => panic!("unexpected share outcome {:?}", other),
        };

        assert_eq!(normalize(&raw).cleaned_text, "Prompt: a paper boat");
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scan_polish_save_roundtrip_on_disk() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("library.db");

        let pages = vec![
            OcrResult::new("12:01\nPrompt: \"a cozy cabin, midjourney style\"".to_string(), 91.0),
            OcrResult::new("Prompt: \"write a python function\"\nShow more".to_string(), 88.0),
        ];
        let outcome = build_outcome(pages, None, true);

        let saved_id = {
            let store = PromptStore::new(SqliteStorage::open(&db_path).unwrap());
            let saved = store.save(outcome.final_text()).unwrap();
            assert_eq!(saved.tags, vec!["Midjourney", "Code"]);
            saved.id
        };

        let store = PromptStore::new(SqliteStorage::open(&db_path).unwrap());
        let prompts = store.list();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].id, saved_id);
        assert_eq!(
            prompts[0].text,
            "Prompt: a cozy cabin, midjourney style\n\nPrompt: write a python function"
        );

        let raw = store.storage().get(STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"createdAt\""));
    }

    #[test]
    fn test_library_filters() {
        let store = PromptStore::new(SqliteStorage::open_in_memory().unwrap());
        for text in ["Recipe for cake", "def f(): pass", "--v 6.0 portrait"] {
            store.save(text).unwrap();
        }

        let code = store.search(&PromptFilter::new(None, Some("Code".to_string())));
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].text, "def f(): pass");

        let cake = store.search(&PromptFilter::new(Some("cake".to_string()), None));
        assert_eq!(cake.len(), 1);
        assert_eq!(cake[0].tags, vec!["Recipe"]);

        assert_eq!(store.tags(), vec!["Code", "Midjourney", "Recipe"]);

        // newest first
        assert_eq!(store.list()[0].text, "--v 6.0 portrait");
    }

    #[test]
    fn test_remove_then_unknown_remove() {
        let store = PromptStore::new(SqliteStorage::open_in_memory().unwrap());
        let a = store.save("first").unwrap();
        let b = store.save("second").unwrap();

        store.remove(&a.id).unwrap();
        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id.clone()]);

        store.remove(&a.id).unwrap();
        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id]);
    }

    #[test]
    fn test_infer_tags_total() {
        for text in ["", "   ", "def foo(): pass", "ünïcödé ✨", "console.log('hi')"] {
            assert!(!infer_tags(text).is_empty(), "no tags for {:?}", text);
        }
    }
}
