use anyhow::Result;
use image::DynamicImage;
use rusty_tesseract::{Args, Data, DataOutput, Image};
use std::collections::HashMap;

use super::types::{OcrConfig, OcrResult};

// Tesseract "word" rows in TSV output.
const WORD_LEVEL: i32 = 5;

pub fn perform_ocr_tesseract(image: &DynamicImage, config: &OcrConfig) -> Result<OcrResult> {
    let args = Args {
        lang: config.lang.clone().unwrap_or_else(OcrConfig::get_default_lang),
        config_variables: HashMap::from([("tessedit_create_tsv".into(), "1".into())]),
        dpi: Some(config.dpi.unwrap_or(OcrConfig::get_default_dpi()) as i32),
        psm: Some(config.psm.unwrap_or(OcrConfig::get_default_psm()) as i32),
        oem: Some(config.oem.unwrap_or(OcrConfig::get_default_oem()) as i32),
    };

    let ocr_image = Image::from_dynamic_image(image)
        .map_err(|e| anyhow::anyhow!("Failed to prepare image for OCR: {:?}", e))?;

    let data_output = rusty_tesseract::image_to_data(&ocr_image, &args)
        .map_err(|e| anyhow::anyhow!("Tesseract failed: {:?}", e))?;

    let words = words_from_output(&data_output);
    let result = OcrResult::new(words_to_text(&words), mean_confidence(&words));
    log::debug!(
        "OCR produced {} chars at {:.1}% confidence",
        result.text.len(),
        result.confidence
    );
    Ok(result)
}

struct Word<'a> {
    block: i32,
    par: i32,
    line: i32,
    conf: f32,
    text: &'a str,
}

fn words_from_output(data_output: &DataOutput) -> Vec<Word<'_>> {
    data_output
        .data
        .iter()
        .filter(|d| d.level == WORD_LEVEL && !d.text.trim().is_empty())
        .map(|d: &Data| Word {
            block: d.block_num,
            par: d.par_num,
            line: d.line_num,
            conf: d.conf,
            text: d.text.trim(),
        })
        .collect()
}

/// Rebuilds the text with one line per Tesseract line and a blank line between blocks.
fn words_to_text(words: &[Word]) -> String {
    let mut text = String::new();
    let mut current: Option<(i32, i32, i32)> = None;

    for word in words {
        let key = (word.block, word.par, word.line);
        match current {
            Some(prev) if prev == key => text.push(' '),
            Some((block, _, _)) if block != key.0 => text.push_str("\n\n"),
            Some(_) => text.push('\n'),
            None => {}
        }
        text.push_str(word.text);
        current = Some(key);
    }

    text
}

fn mean_confidence(words: &[Word]) -> f32 {
    let scored: Vec<f32> = words.iter().map(|w| w.conf).filter(|c| *c >= 0.0).collect();
    if scored.is_empty() {
        return 0.0;
    }
    scored.iter().sum::<f32>() / scored.len() as f32
}
