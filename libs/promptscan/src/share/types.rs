use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyFlavor {
    Standard,
    Midjourney,
    #[serde(rename = "chatgpt")]
    ChatGpt,
}

impl std::fmt::Display for CopyFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopyFlavor::Standard => write!(f, "standard"),
            CopyFlavor::Midjourney => write!(f, "midjourney"),
            CopyFlavor::ChatGpt => write!(f, "chatgpt"),
        }
    }
}

impl From<&str> for CopyFlavor {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "midjourney" | "mj" => CopyFlavor::Midjourney,
            "chatgpt" | "chat" => CopyFlavor::ChatGpt,
            _ => CopyFlavor::Standard,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyOutput {
    pub flavor: CopyFlavor,
    pub text: String,
    /// Where the caller should send the user after copying, if anywhere.
    pub open_url: Option<String>,
}

/// Fields a share target may deliver. `media` is the shared file name, if any.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SharePayload {
    pub text: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub media: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ShareOutcome {
    /// Raw input ready for the normalizer.
    Text(String),
    /// Files need a transport this service does not have.
    FileUnsupported,
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_from_str() {
        assert_eq!(CopyFlavor::from("MidJourney"), CopyFlavor::Midjourney);
        assert_eq!(CopyFlavor::from("chatgpt"), CopyFlavor::ChatGpt);
        assert_eq!(CopyFlavor::from("anything"), CopyFlavor::Standard);
    }

    #[test]
    fn test_flavor_serde_names() {
        assert_eq!(serde_json::to_string(&CopyFlavor::ChatGpt).unwrap(), "\"chatgpt\"");
        let parsed: CopyFlavor = serde_json::from_str("\"midjourney\"").unwrap();
        assert_eq!(parsed, CopyFlavor::Midjourney);
    }

    #[test]
    fn test_share_outcome_serialization() {
        let json = serde_json::to_value(ShareOutcome::Text("hi".into())).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["text"], "hi");
    }
}
