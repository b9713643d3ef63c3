use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::PathBuf;
use std::time::Instant;

use super::types::{ProcessorConfig, ScanOutcome};
use crate::common::decode_base64;
use crate::image2text::{process_ocr, OcrConfig, OcrResult};
use crate::normalize::normalize;

const PAGE_SEPARATOR: &str = "\n\n";

fn load_image_from_path(path: &PathBuf) -> Result<DynamicImage> {
    image::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to load image from {}: {}", path.display(), e))
}

fn load_image_from_base64(data: &str) -> Result<DynamicImage> {
    let bytes = decode_base64(data)?;
    image::load_from_memory(&bytes).map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))
}

/// Joins each page's trimmed text with a blank line between pages.
pub fn combine_texts<S: AsRef<str>>(texts: &[S]) -> String {
    texts.iter().fold(String::new(), |mut combined, text| {
        if !combined.is_empty() {
            combined.push_str(PAGE_SEPARATOR);
        }
        combined.push_str(text.as_ref().trim());
        combined
    })
}

/// A new batch goes after what the user already has, separated by a blank line.
pub fn append_to_previous(previous: Option<&str>, combined: &str) -> String {
    match previous {
        Some(prev) if !prev.is_empty() => format!("{}{}{}", prev, PAGE_SEPARATOR, combined),
        _ => combined.to_string(),
    }
}

/// OCR every image in order. The first failure aborts the batch.
pub async fn ocr_images(images: &[DynamicImage], config: &OcrConfig) -> Result<Vec<OcrResult>> {
    let mut pages = Vec::with_capacity(images.len());

    for (i, image) in images.iter().enumerate() {
        let start = Instant::now();
        let page = process_ocr(image, config)
            .await
            .with_context(|| format!("OCR failed on image {}", i + 1))?;
        log::info!(
            "Image {} OCR took {:?}, confidence {:.1}",
            i + 1,
            start.elapsed(),
            page.confidence
        );
        pages.push(page);
    }

    Ok(pages)
}

pub fn build_outcome(pages: Vec<OcrResult>, previous: Option<&str>, polish: bool) -> ScanOutcome {
    let texts: Vec<&str> = pages.iter().map(|p| p.text.as_str()).collect();
    let text = append_to_previous(previous, &combine_texts(&texts));

    let confidence = if pages.is_empty() {
        0.0
    } else {
        pages.iter().map(|p| p.confidence).sum::<f32>() / pages.len() as f32
    };

    let normalized = if polish && !text.trim().is_empty() {
        Some(normalize(&text))
    } else {
        None
    };

    ScanOutcome {
        pages,
        text,
        confidence,
        normalized,
    }
}

pub async fn scan_image_paths(
    paths: &[PathBuf],
    previous: Option<&str>,
    config: &ProcessorConfig,
) -> Result<ScanOutcome> {
    let images = paths
        .iter()
        .map(load_image_from_path)
        .collect::<Result<Vec<_>>>()?;

    let pages = ocr_images(&images, &config.ocr_config).await?;
    Ok(build_outcome(pages, previous, config.polish))
}

/// Accepts plain base64 or `data:` URLs.
pub async fn scan_base64_images(
    images: &[String],
    previous: Option<&str>,
    config: &ProcessorConfig,
) -> Result<ScanOutcome> {
    let decoded = images
        .iter()
        .enumerate()
        .map(|(i, data)| {
            load_image_from_base64(data).with_context(|| format!("Invalid image {}", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let pages = ocr_images(&decoded, &config.ocr_config).await?;
    Ok(build_outcome(pages, previous, config.polish))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str, confidence: f32) -> OcrResult {
        OcrResult::new(text.to_string(), confidence)
    }

    #[test]
    fn test_combine_texts_trims_and_separates() {
        assert_eq!(combine_texts(&["  first \n", "\nsecond  "]), "first\n\nsecond");
        assert_eq!(combine_texts::<&str>(&[]), "");
    }

    #[test]
    fn test_append_to_previous() {
        assert_eq!(append_to_previous(None, "new"), "new");
        assert_eq!(append_to_previous(Some(""), "new"), "new");
        assert_eq!(append_to_previous(Some("old"), "new"), "old\n\nnew");
    }

    #[test]
    fn test_build_outcome_without_polish() {
        let outcome = build_outcome(vec![page("a", 80.0), page("b", 60.0)], None, false);

        assert_eq!(outcome.text, "a\n\nb");
        assert!((outcome.confidence - 70.0).abs() < f32::EPSILON);
        assert!(outcome.normalized.is_none());
        assert_eq!(outcome.final_text(), "a\n\nb");
    }

    #[test]
    fn test_build_outcome_with_polish() {
        let pages = vec![
            page("10:42\nPrompt: \"a cat in space\"", 90.0),
            page("87%\nPrompt: \"a dog on mars\"\nShow more", 70.0),
        ];
        let outcome = build_outcome(pages, None, true);

        let normalized = outcome.normalized.as_ref().unwrap();
        assert_eq!(normalized.extracted_count, 2);
        assert_eq!(outcome.final_text(), "Prompt: a cat in space\n\nPrompt: a dog on mars");
    }

    #[test]
    fn test_build_outcome_empty_batch_skips_polish() {
        let outcome = build_outcome(vec![page("   ", 0.0)], None, true);
        assert_eq!(outcome.text, "");
        assert!(outcome.normalized.is_none());
    }

    #[tokio::test]
    async fn test_scan_missing_file_fails() {
        let paths = vec![PathBuf::from("/definitely/not/here.png")];
        let result = scan_image_paths(&paths, None, &ProcessorConfig::default()).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to load image"));
    }

    #[tokio::test]
    async fn test_scan_invalid_base64_fails() {
        let images = vec!["data:image/png;base64,bm90IGFuIGltYWdl".to_string()];
        let result = scan_base64_images(&images, None, &ProcessorConfig::default()).await;

        assert!(result.is_err());
    }
}
