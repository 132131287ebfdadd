//! # Embed Resolver
//!
//! Turns a pasted link into something safe to put in an `iframe`.
//!
//! ```text
//! javascript: / data: / vbscript:        → ""  (rejected)
//! youtube.com/watch?v=ID, youtu.be/ID,
//!   /embed/ID, /shorts/ID, /live/ID      → https://www.youtube.com/embed/ID
//! vimeo.com/123, player.vimeo.com/...    → https://player.vimeo.com/video/123
//! anything with /embed/ or player.       → unchanged (trimmed)
//! anything else                          → ""  (caller shows "Invalid link")
//! ```
//!
//! The empty string is the only rejection signal; it never panics.
//!
//! Also home to the other link builders the renderer needs (click-to-chat and
//! map embeds), which share the same "never emit something unsafe" rule.

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

const FORBIDDEN_SCHEMES: [&str; 3] = ["javascript:", "data:", "vbscript:"];
const YOUTUBE_ID_LEN: usize = 11;
const YOUTUBE_FALLBACK_MIN_LEN: usize = 10;

fn youtube_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=|shorts/|live/)([^#&?]*).*").ok()
        })
        .as_ref()
}

fn vimeo_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?:vimeo\.com/|player\.vimeo\.com/video/)(\d+)").ok())
        .as_ref()
}

/// Resolve a video link into an embeddable URL; `""` means rejected
pub fn resolve_embed(url: &str) -> String {
    let clean = url.trim();
    if clean.is_empty() {
        return String::new();
    }

    if is_script_url(clean) {
        warn!(url = clean, "blocked unsafe embed url");
        return String::new();
    }

    if clean.contains("youtube") || clean.contains("youtu.be") {
        if let Some(id) = youtube_id(clean) {
            return format!("https://www.youtube.com/embed/{}", id);
        }
    }

    if clean.contains("vimeo") {
        if let Some(id) = vimeo_pattern()
            .and_then(|re| re.captures(clean))
            .and_then(|caps| caps.get(1))
        {
            return format!("https://player.vimeo.com/video/{}", id.as_str());
        }
    }

    if clean.contains("/embed/") || clean.contains("player.") {
        return clean.to_string();
    }

    String::new()
}

fn youtube_id(url: &str) -> Option<&str> {
    let strict = youtube_pattern()
        .and_then(|re| re.captures(url))
        .and_then(|caps| caps.get(2))
        .map(|id| id.as_str())
        .filter(|id| id.len() == YOUTUBE_ID_LEN);
    if strict.is_some() {
        return strict;
    }

    // Last `v=` value up to the next `&`
    let (_, tail) = url.rsplit_once("v=")?;
    let id = tail.split('&').next().unwrap_or_default();
    (id.len() >= YOUTUBE_FALLBACK_MIN_LEN).then_some(id)
}

/// Whether `url` would run script when followed as a link
pub fn is_script_url(url: &str) -> bool {
    let lowered = url.trim().to_lowercase();
    FORBIDDEN_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme))
}

/// Click-to-chat link; `#` when the number has no digits
pub fn messaging_url(number: &str, message: Option<&str>) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return "#".to_string();
    }

    let text = encode_component(message.unwrap_or_default());
    format!("https://wa.me/{}?text={}", digits, text)
}

/// Embeddable map for a free-form address
pub fn map_embed_url(address: &str) -> String {
    format!(
        "https://maps.google.com/maps?q={}&output=embed",
        encode_component(address.trim())
    )
}

fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
