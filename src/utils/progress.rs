//! Build spinner that becomes a no-op when the `progress` feature is disabled

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::time::Duration;

/// Spinner shown on stderr while an index generation builds
pub struct Spinner {
    #[cfg(feature = "progress")]
    bar: ProgressBar,
}

impl Spinner {
    /// Start a spinner with a message. Hidden when `enabled` is false.
    #[cfg(feature = "progress")]
    pub fn start(message: &str, enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    #[cfg(not(feature = "progress"))]
    pub fn start(_message: &str, _enabled: bool) -> Self {
        Self {}
    }

    #[cfg(feature = "progress")]
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }

    #[cfg(not(feature = "progress"))]
    pub fn finish(self) {}
}
