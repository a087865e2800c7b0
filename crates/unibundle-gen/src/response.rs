use once_cell::sync::Lazy;
use regex::Regex;

static WHOLE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?:html)?\s*([\s\S]*?)\s*```$").unwrap());
static OPENING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```(?:html)?").unwrap());
static CLOSING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```$").unwrap());

/// Strips markdown fencing the model sometimes adds around the document.
pub fn clean_html(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(caps) = WHOLE_FENCE.captures(trimmed) {
        return caps[1].to_string();
    }

    // unbalanced fence
    if trimmed.starts_with("```") {
        let opened = OPENING_FENCE.replace(trimmed, "");
        return CLOSING_FENCE.replace(&opened, "").trim().to_string();
    }

    trimmed.to_string()
}
