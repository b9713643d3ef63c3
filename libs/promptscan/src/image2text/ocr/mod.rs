mod ocr_tesseract;

mod types;
pub use types::{OcrConfig, OcrResult};

use anyhow::{Context, Result};
use image::DynamicImage;

/// Runs recognition on the blocking pool; Tesseract shells out and would stall the runtime.
pub async fn process_ocr(img: &DynamicImage, config: &OcrConfig) -> Result<OcrResult> {
    let image = img.clone();
    let config = config.clone();

    tokio::task::spawn_blocking(move || {
        use self::ocr_tesseract::perform_ocr_tesseract;
        perform_ocr_tesseract(&image, &config)
    })
    .await
    .context("OCR task panicked")?
    .context("Failed to extract text")
}
