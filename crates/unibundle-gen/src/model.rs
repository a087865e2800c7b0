use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hosted model used for generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "gemini-2.5-flash", alias = "flash")]
    Flash,
    #[default]
    #[serde(rename = "gemini-3-pro-preview", alias = "pro")]
    Pro,
}

impl Model {
    pub fn id(self) -> &'static str {
        match self {
            Model::Flash => "gemini-2.5-flash",
            Model::Pro => "gemini-3-pro-preview",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flash" | "gemini-2.5-flash" => Ok(Model::Flash),
            "pro" | "gemini-3-pro-preview" => Ok(Model::Pro),
            other => Err(format!("unknown model '{other}' (expected 'flash' or 'pro')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pro() {
        assert_eq!(Model::default(), Model::Pro);
        assert_eq!(Model::default().id(), "gemini-3-pro-preview");
    }

    #[test]
    fn parses_short_and_full_names() {
        assert_eq!("flash".parse::<Model>().unwrap(), Model::Flash);
        assert_eq!("Pro".parse::<Model>().unwrap(), Model::Pro);
        assert_eq!("gemini-2.5-flash".parse::<Model>().unwrap(), Model::Flash);
        assert!("gpt".parse::<Model>().is_err());
    }

    #[test]
    fn serde_uses_model_ids() {
        let json = serde_json::to_string(&Model::Flash).unwrap();
        assert_eq!(json, "\"gemini-2.5-flash\"");
        let parsed: Model = serde_json::from_str("\"pro\"").unwrap();
        assert_eq!(parsed, Model::Pro);
    }
}
