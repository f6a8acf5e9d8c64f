//! Colored status lines for the CLI.

use std::io;

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub struct TextPrinter {
    pub color: Option<&'static str>,
}

impl TextPrinter {
    /// Colors are dropped when stdout is not a terminal.
    pub fn new(color: &'static str) -> Self {
        let color = io::stdout().is_terminal().then_some(color);
        Self { color }
    }

    pub fn print(&self, text: &str) {
        println!("{}", self.render(text));
    }

    pub fn render(&self, text: &str) -> String {
        match self.color {
            Some("green") => text.green().to_string(),
            Some("red") => text.red().to_string(),
            Some("yellow") => text.yellow().to_string(),
            Some("cyan") => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_when_uncolored() {
        let p = TextPrinter { color: None };
        assert_eq!(p.render("ok"), "ok");
    }

    #[test]
    fn colored_output_wraps_text() {
        let p = TextPrinter { color: Some("green") };
        let s = p.render("ok");
        assert!(s.contains("ok"));
        assert_ne!(s, "ok");
    }
}
