use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Optional progress bar; a no-op when progress output is disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

fn bar_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg} ({eta})",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub fn bar(total: u64, message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
