//! Styles for the docvault CLI.
//!
//! Templates only ever name a style by what the text *is* (a title, a size, a notice);
//! this module decides what those names look like. Unknown names render unstyled.
//!
//! Whether ANSI codes are emitted at all is decided once per render, from the stdout
//! terminal's capabilities.

use console::{Style, Term};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const ACTIVE: &str = "active";
    pub const INDEX: &str = "index";
    pub const NAME: &str = "name";
    pub const SIZE: &str = "size";
    pub const COUNT: &str = "count";
    pub const RESOURCE: &str = "resource";
    pub const BAR: &str = "bar";
    pub const BAR_FULL: &str = "bar-full";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Applies a named style; `use_color == false` returns the text as is.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            _ => text.to_string(),
        }
    }
}

pub static VAULT_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(246);
    Theme::new()
        .add(names::TITLE, Style::new().bold())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, Style::new().color256(240))
        .add(names::ACTIVE, Style::new().cyan().bold())
        .add(names::INDEX, Style::new().yellow())
        .add(names::NAME, Style::new())
        .add(names::SIZE, Style::new().cyan())
        .add(names::COUNT, Style::new().green())
        .add(names::RESOURCE, Style::new().magenta())
        .add(names::BAR, Style::new().green())
        .add(names::BAR_FULL, Style::new().red().bold())
        .add(names::INFO, muted)
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::ERROR, Style::new().red().bold())
});

pub fn stdout_supports_color() -> bool {
    Term::stdout().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_leaves_text_untouched() {
        assert_eq!(VAULT_THEME.apply(names::TITLE, "Dia 1", false), "Dia 1");
    }

    #[test]
    fn color_mode_wraps_in_ansi() {
        let out = VAULT_THEME.apply(names::WARNING, "atenção", true);
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("atenção"));
    }

    #[test]
    fn unknown_style_is_plain() {
        assert_eq!(VAULT_THEME.apply("nope", "x", true), "x");
    }
}
