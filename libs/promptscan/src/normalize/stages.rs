//! Named, pure string transforms used by [`super::normalize`].

use once_cell::sync::Lazy;
use regex::Regex;

static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d{1,2}:\d{2}.*$").unwrap());

static PERCENT_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\d{1,3}%$").unwrap());

static SOCIAL_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:X\.com|Twitter|Post)\b").unwrap());

static SHOW_MORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)visa fler|show more").unwrap());

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());

static CURRENCY_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[$€£]\d+.*$").unwrap());

static RULE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[^\w\s]*[|—_-]{2,}.*$").unwrap());

// "12 h $", "3 d %": counters and prices from feed chrome.
static UNIT_FRAGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*\d+[ \t]+[a-z]{0,2}[ \t]*[$%]").unwrap());

static HORIZONTAL_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

#[derive(Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    transform: fn(&str) -> String,
}

impl Stage {
    pub const fn new(name: &'static str, transform: fn(&str) -> String) -> Self {
        Self { name, transform }
    }

    pub fn apply(&self, text: &str) -> String {
        (self.transform)(text)
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// Fallback cleanup, used when no `Prompt:` segment was found.
pub const NOISE_STAGES: &[Stage] = &[
    Stage::new("timestamps", strip_timestamps),
    Stage::new("percentages", strip_percent_lines),
    Stage::new("social_markers", strip_social_markers),
    Stage::new("show_more", strip_show_more),
    Stage::new("mentions", strip_mentions),
    Stage::new("currency_lines", strip_currency_lines),
    Stage::new("rule_lines", strip_rule_lines),
    Stage::new("unit_fragments", strip_unit_fragments),
];

/// Whole-line noise removed inside extracted `Prompt:` segments.
pub const LINE_NOISE_STAGES: &[Stage] = &[
    Stage::new("timestamps", strip_timestamps),
    Stage::new("percentages", strip_percent_lines),
    Stage::new("currency_lines", strip_currency_lines),
    Stage::new("rule_lines", strip_rule_lines),
    Stage::new("unit_fragments", strip_unit_fragments),
];

pub const FORMAT_STAGES: &[Stage] = &[
    Stage::new("show_more", strip_show_more),
    Stage::new("join_wrapped_lines", join_wrapped_lines),
    Stage::new("collapse_spaces", collapse_spaces),
    Stage::new("straighten_quotes", straighten_quotes),
    Stage::new("numbered_lists", break_numbered_lists),
    Stage::new("blank_lines", collapse_blank_lines),
];

pub fn run_stages(stages: &[Stage], text: &str) -> String {
    stages.iter().fold(text.to_string(), |acc, stage| {
        let next = stage.apply(&acc);
        if next != acc {
            log::trace!("stage {} changed {} -> {} chars", stage.name, acc.len(), next.len());
        }
        next
    })
}

pub fn strip_timestamps(text: &str) -> String {
    TIMESTAMP_RE.replace_all(text, "").into_owned()
}

pub fn strip_percent_lines(text: &str) -> String {
    PERCENT_LINE_RE.replace_all(text, "").into_owned()
}

pub fn strip_social_markers(text: &str) -> String {
    SOCIAL_MARKER_RE.replace_all(text, "").into_owned()
}

/// Repeats until no marker is left, so removals cannot splice a new one together.
pub fn strip_show_more(text: &str) -> String {
    let mut out = text.to_string();
    while SHOW_MORE_RE.is_match(&out) {
        out = SHOW_MORE_RE.replace_all(&out, "").into_owned();
    }
    out
}

pub fn strip_mentions(text: &str) -> String {
    MENTION_RE.replace_all(text, "").into_owned()
}

pub fn strip_currency_lines(text: &str) -> String {
    CURRENCY_LINE_RE.replace_all(text, "").into_owned()
}

pub fn strip_rule_lines(text: &str) -> String {
    RULE_LINE_RE.replace_all(text, "").into_owned()
}

pub fn strip_unit_fragments(text: &str) -> String {
    UNIT_FRAGMENT_RE.replace_all(text, "").into_owned()
}

/// Rejoins a sentence OCR wrapped mid-line: `[a-z,]` newline `[a-z]` becomes a space.
pub fn join_wrapped_lines(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' && i > 0 && i + 1 < chars.len() {
            let prev = chars[i - 1];
            let next = chars[i + 1];
            if (prev.is_ascii_lowercase() || prev == ',') && next.is_ascii_lowercase() {
                out.push(' ');
                continue;
            }
        }
        out.push(c);
    }

    out
}

pub fn collapse_spaces(text: &str) -> String {
    HORIZONTAL_SPACE_RE.replace_all(text, " ").into_owned()
}

pub fn straighten_quotes(text: &str) -> String {
    text.replace(|c: char| matches!(c, '‘' | '’'), "'")
        .replace(|c: char| matches!(c, '“' | '”'), "\"")
}

/// Puts a list marker (`1.`, `2)`) that follows whitespace at the start of its own line.
///
/// A marker must be followed by whitespace or the end of input, so version
/// numbers such as `6.0` stay intact.
pub fn break_numbered_lists(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() && starts_list_marker(&chars[i + 1..]) {
            out.push('\n');
        } else {
            out.push(c);
        }
    }

    out
}

// Stricter than splitting on any `\s\d+[.)]`: `size 3.5mm` and `--v 6.0`
// are left alone on purpose.
fn starts_list_marker(rest: &[char]) -> bool {
    let digits = rest.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    if !matches!(rest.get(digits), Some('.') | Some(')')) {
        return false;
    }
    rest.get(digits + 1).map_or(true, |c| c.is_whitespace())
}

pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES_RE.replace_all(text, "\n\n").into_owned()
}
