//! Terminal output: styled status lines, rendered pages, or JSON.

use console::{style, StyledObject};
use levelup_commerce::loyalty::Tier;
use serde::Serialize;

/// Output handler for CLI messages.
///
/// In JSON mode only data and errors are printed; status lines are dropped.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn status(&self, symbol: StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{} {}", symbol, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.status(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.status(style("✓").green(), msg);
    }

    /// Warnings go to stderr so piped pages stay clean.
    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Print an error; in JSON mode as `{"error": ...}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Print a page rendered by `levelup_storefront::views`.
    pub fn page(&self, text: &str) {
        if !self.json {
            println!("{}", text);
        }
    }

    /// Print `value` as pretty JSON.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(e) => self.error(&format!("cannot encode output: {}", e)),
        }
    }

    /// Show a page: `value` as JSON in JSON mode, otherwise a titled text
    /// page. `render` only runs when the text is needed.
    pub fn show<T: Serialize>(&self, value: &T, title: &str, render: impl FnOnce() -> String) {
        if self.json {
            self.json(value);
        } else {
            self.header(title);
            self.page(&render());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored tier name.
pub fn tier_badge(tier: Tier) -> String {
    let label = tier.label();
    match tier {
        Tier::Diamond => style(label).cyan().bold().to_string(),
        Tier::Gold => style(label).yellow().bold().to_string(),
        Tier::Silver => style(label).white().to_string(),
        Tier::Bronze => style(label).red().dim().to_string(),
    }
}
