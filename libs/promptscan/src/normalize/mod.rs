//! "Magic Polish": turns noisy OCR output into a usable prompt string.
//!
//! The work is split into named stages (see [`stages`]) that run in a fixed
//! order:
//!
//! 1. structured extraction of `Prompt: ...` segments,
//! 2. noise stripping, only when no segment was found,
//! 3. the formatting pass, always,
//! 4. a final trim.

mod extract;
pub mod stages;

pub use extract::{extract_prompts, PROMPT_LABEL};

use serde::{Deserialize, Serialize};

use self::stages::{run_stages, FORMAT_STAGES, NOISE_STAGES};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    pub cleaned_text: String,
    /// Number of `Prompt:` segments recovered; 0 when the noise fallback ran.
    pub extracted_count: usize,
}

impl NormalizedText {
    pub fn new(cleaned_text: String, extracted_count: usize) -> Self {
        Self {
            cleaned_text,
            extracted_count,
        }
    }
}

/// Never fails; any string input yields a cleaned string.
pub fn normalize(raw_text: &str) -> NormalizedText {
    if raw_text.trim().is_empty() {
        return NormalizedText::new(String::new(), 0);
    }

    let segments = extract_prompts(raw_text);
    let extracted_count = segments.len();

    let structured = if segments.is_empty() {
        run_stages(NOISE_STAGES, raw_text)
    } else {
        segments.join("\n\n")
    };

    let formatted = run_stages(FORMAT_STAGES, &structured);
    log::debug!(
        "Normalized {} chars into {} chars ({} prompts extracted)",
        raw_text.len(),
        formatted.trim().len(),
        extracted_count
    );

    NormalizedText::new(formatted.trim().to_string(), extracted_count)
}
