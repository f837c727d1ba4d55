use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use zbx_core::enums::EntityKind;

use crate::ui;

/// Operator-facing progress on stderr; a no-op when progress is disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

fn bar_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => "{prefix:.bold} {bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{prefix:.bold} {wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{prefix:.bold} {wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    const fn disabled() -> Self {
        Self { bar: None }
    }

    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self::disabled();
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Bar over the entities of one group space.
    #[must_use]
    pub fn entities(kind: EntityKind, total: usize) -> Self {
        if !ui::prefs().progress {
            return Self::disabled();
        }

        let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_prefix(kind.as_str());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
