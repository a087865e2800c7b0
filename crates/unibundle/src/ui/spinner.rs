use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

use crate::pipeline::{Stage, Status, StatusSink};

const SPINNER_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {prefix:.bold} {msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// Terminal rendering of pipeline stages. Draws to stderr and hides itself
/// when stderr is not a terminal.
pub struct StageSpinner {
    pb: ProgressBar,
}

impl StageSpinner {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        if let Some(style) = SPINNER_TEMPLATE.as_ref() {
            pb.set_style(style.clone());
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn sink(&self) -> StatusSink {
        let pb = self.pb.clone();
        Arc::new(move |status: &Status| render(&pb, status))
    }

    pub fn finish(&self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

impl Drop for StageSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}

fn render(pb: &ProgressBar, status: &Status) {
    pb.set_prefix(status.stage.to_string());
    match status.stage {
        Stage::Completed => pb.finish_with_message(status.message.clone()),
        // the error itself is printed by main
        Stage::Error => pb.finish_and_clear(),
        _ => pb.set_message(status.message.clone()),
    }
}
