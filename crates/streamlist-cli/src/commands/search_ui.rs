use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a catalog request is in flight.
///
/// Without a terminal the spinner is hidden and progress goes to the log.
pub struct SearchSpinner {
    spinner: Option<ProgressBar>,
}

impl SearchSpinner {
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();

        if !is_interactive() {
            tracing::info!(operation = "search", message = %message, "Progress update");
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self { spinner: Some(spinner) }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
