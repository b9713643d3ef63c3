use once_cell::sync::Lazy;
use regex::Regex;

use super::stages::{run_stages, LINE_NOISE_STAGES};

/// Canonical label every extracted segment starts with.
pub const PROMPT_LABEL: &str = "Prompt: ";

static LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)prompt:\s*["“”]?"#).unwrap());

static TERMINATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)prompt:|visa fler|show more").unwrap());

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '“' | '”')
}

/// Returns each `Prompt:` span found in `text`, cleaned and re-labelled.
///
/// A span runs from its label to the next label, to a "Visa fler"/"Show more"
/// marker, or to the end of the input.
pub fn extract_prompts(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(label) = LABEL_RE.find_at(text, pos) {
        let body_start = label.end();
        let body_end = TERMINATOR_RE
            .find_at(text, body_start)
            .map(|m| m.start())
            .unwrap_or(text.len());

        let quoted = label.as_str().ends_with(is_quote);
        segments.push(clean_segment(&text[body_start..body_end], quoted));
        pos = body_end;
    }

    segments
}

fn clean_segment(body: &str, quoted: bool) -> String {
    // The first line continues the label, so line-anchored noise rules skip it.
    let cleaned = match body.split_once('\n') {
        Some((head, rest)) => {
            let mut lines = vec![head.to_string()];
            lines.extend(rest.lines().filter_map(strip_noise_line));
            lines.join("\n")
        }
        None => body.to_string(),
    };

    let mut content = cleaned.trim();
    if quoted {
        content = content.strip_suffix(is_quote).unwrap_or(content).trim();
    }

    format!("{}{}", PROMPT_LABEL, content)
}

/// Drops a line that is nothing but noise, newline included, so the
/// surrounding lines stay one break apart.
fn strip_noise_line(line: &str) -> Option<String> {
    let cleaned = run_stages(LINE_NOISE_STAGES, line);
    if cleaned.trim().is_empty() && !line.trim().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
