use super::types::{CopyFlavor, CopyOutput, ShareOutcome, SharePayload};

pub const MIDJOURNEY_SUFFIX: &str = " --v 6.0";
pub const CHAT_URL: &str = "https://chat.openai.com";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

pub fn copy_text(text: &str, flavor: CopyFlavor) -> CopyOutput {
    let (copied, open_url) = match flavor {
        CopyFlavor::Standard => (text.to_string(), None),
        CopyFlavor::Midjourney => {
            let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (format!("{}{}", single_line, MIDJOURNEY_SUFFIX), None)
        }
        CopyFlavor::ChatGpt => (text.to_string(), Some(CHAT_URL.to_string())),
    };

    CopyOutput {
        flavor,
        text: copied,
        open_url,
    }
}

/// Picks what a share delivered, by priority file > url > text > title.
pub fn resolve_share(payload: &SharePayload) -> ShareOutcome {
    if non_empty(&payload.media).is_some() {
        log::info!("Share contained a file, which is not supported");
        return ShareOutcome::FileUnsupported;
    }

    let text = non_empty(&payload.text);
    let content = match (non_empty(&payload.url), text, non_empty(&payload.title)) {
        (Some(url), _, _) => format!("{}\n{}", url, text.unwrap_or("")),
        (None, Some(text), _) => text.to_string(),
        (None, None, Some(title)) => title.to_string(),
        (None, None, None) => return ShareOutcome::Empty,
    };

    ShareOutcome::Text(content.trim().to_string())
}
