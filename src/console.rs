//! Terminal rendering of transient notices.

use std::io::Write;

use alerts_core::NoticeSink;
use alerts_domain::{Notice, NoticeSeverity};
use colored::Colorize;

/// Prints notices to stdout, one line each.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotices {
    plain: bool,
}

impl ConsoleNotices {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }
}

impl NoticeSink for ConsoleNotices {
    fn show(&self, notice: Notice) {
        let line = render_notice(&notice, self.plain);
        let mut out = std::io::stdout().lock();
        if let Err(err) = writeln!(out, "{line}") {
            tracing::debug!("Dropping notice, stdout unavailable: {}", err);
        }
    }
}

fn label(severity: NoticeSeverity) -> (&'static str, &'static str) {
    match severity {
        NoticeSeverity::Info => ("INFO", "[i]"),
        NoticeSeverity::Warning => ("WARNING", "[!]"),
        NoticeSeverity::Error => ("ALERT", "[x]"),
    }
}

/// Formats a notice as `LABEL: [icon] title: description`.
pub fn render_notice(notice: &Notice, plain: bool) -> String {
    let (name, icon) = label(notice.severity);
    let text = format!("{name}: {icon} {}: {}", notice.title, notice.description);
    if plain {
        return text;
    }
    match notice.severity {
        NoticeSeverity::Info => text.cyan().to_string(),
        NoticeSeverity::Warning => text.yellow().bold().to_string(),
        NoticeSeverity::Error => text.red().bold().to_string(),
    }
}
