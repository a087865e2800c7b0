use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::rules::{Decision, FilterRules};

/// What to do with a kept member whose bytes are not valid UTF-8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Abort the whole ingestion.
    #[default]
    Fail,
    /// Drop the member and keep going.
    Skip,
    /// Replace invalid sequences with U+FFFD.
    Lossy,
}

pub type ProgressSink = Arc<dyn Fn(&Progress) + Send + Sync>;

#[derive(Clone, Default)]
pub struct IngestOptions {
    pub rules: FilterRules,
    pub decode_policy: DecodePolicy,
    pub on_progress: Option<ProgressSink>,
}

/// Reported after every filtering decision.
#[derive(Clone, Debug)]
pub struct Progress {
    /// Zero-based position in the archive listing.
    pub index: usize,
    pub path: String,
    pub decision: Decision,
    /// Files kept so far, this one included.
    pub kept: usize,
}

impl IngestOptions {
    pub fn rules(mut self, rules: FilterRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    pub fn on_progress(mut self, callback: ProgressSink) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub(crate) fn report(&self, progress: Progress) {
        if let Some(ref callback) = self.on_progress {
            callback(&progress);
        }
    }
}

impl fmt::Debug for IngestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestOptions")
            .field("rules", &self.rules)
            .field("decode_policy", &self.decode_policy)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
