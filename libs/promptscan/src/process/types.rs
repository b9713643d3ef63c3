use serde::{Deserialize, Serialize};

use crate::image2text::{OcrConfig, OcrResult};
use crate::normalize::NormalizedText;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub ocr_config: OcrConfig,
    /// Run the normalizer on the combined text.
    pub polish: bool,
}

impl ProcessorConfig {
    pub fn new(ocr_config: OcrConfig, polish: bool) -> Self {
        Self { ocr_config, polish }
    }

    pub fn default() -> Self {
        Self {
            ocr_config: OcrConfig::default(),
            polish: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub pages: Vec<OcrResult>,
    /// Previous text (if any) followed by this batch.
    pub text: String,
    pub confidence: f32,
    pub normalized: Option<NormalizedText>,
}

impl ScanOutcome {
    /// Normalized text when polishing ran, the combined text otherwise.
    pub fn final_text(&self) -> &str {
        self.normalized
            .as_ref()
            .map(|n| n.cleaned_text.as_str())
            .unwrap_or(&self.text)
    }
}
