use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OcrResult {
    pub text: String,
    /// Mean word confidence reported by the engine, 0-100.
    pub confidence: f32,
}

impl OcrResult {
    pub fn new(text: String, confidence: f32) -> Self {
        Self { text, confidence }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OcrConfig {
    pub lang: Option<String>,
    pub dpi: Option<u32>, // dots per inch
    pub psm: Option<u32>, // Page segmentation mode
    pub oem: Option<u32>, // OCR Engine Mode
}

impl OcrConfig {
    pub fn default() -> Self {
        Self {
            lang: None,
            dpi: None,
            psm: None,
            oem: None,
        }
    }

    pub fn new(lang: Option<String>, dpi: Option<u32>, psm: Option<u32>, oem: Option<u32>) -> Self {
        Self {
            lang,
            dpi,
            psm,
            oem,
        }
    }

    pub fn get_default_lang() -> String {
        "eng".to_string()
    }

    pub fn get_default_dpi() -> u32 {
        300
    }

    // Fully automatic page segmentation; screenshots mix columns and chrome.
    pub fn get_default_psm() -> u32 {
        3
    }

    pub fn get_default_oem() -> u32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unset() {
        let config = OcrConfig::default();
        assert!(config.lang.is_none());
        assert!(config.dpi.is_none());
        assert!(config.psm.is_none());
        assert!(config.oem.is_none());
    }

    #[test]
    fn test_config_deserializes_partial_json() {
        let config: OcrConfig = serde_json::from_str(r#"{"lang":"swe","dpi":null,"psm":6,"oem":null}"#).unwrap();
        assert_eq!(config.lang.as_deref(), Some("swe"));
        assert_eq!(config.psm, Some(6));
    }
}
