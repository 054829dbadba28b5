use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style names used by the templates.
pub mod names {
    pub const TITLE: &str = "title";
    pub const LABEL: &str = "label";
    pub const VALUE: &str = "value";
    pub const BLANK: &str = "blank";
    pub const INDEX: &str = "index";
    pub const ACTIVE: &str = "active";
    pub const TIME: &str = "time";
    pub const MUTED: &str = "muted";
    pub const SELECTED: &str = "selected";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

pub static SKL_STYLES: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    HashMap::from([
        (names::TITLE, Style::new().bold()),
        (names::LABEL, Style::new().cyan()),
        (names::VALUE, Style::new().bold()),
        (names::BLANK, Style::new().dim()),
        (names::INDEX, Style::new().yellow()),
        (names::ACTIVE, Style::new().green().bold()),
        (names::TIME, Style::new().color256(246).italic()),
        (names::MUTED, Style::new().dim()),
        (names::SELECTED, Style::new().bold().underlined()),
        (names::INFO, Style::new()),
        (names::SUCCESS, Style::new().green()),
        (names::WARNING, Style::new().yellow()),
        (names::ERROR, Style::new().red().bold()),
    ])
});

/// Applies a named style. Unknown names are flagged so template typos show up.
pub fn apply(name: &str, text: &str, use_color: bool) -> String {
    match SKL_STYLES.get(name) {
        Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
        Some(_) => text.to_string(),
        None => format!("(!?) {}", text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_returns_text() {
        assert_eq!(apply(names::TITLE, "SKL", false), "SKL");
    }

    #[test]
    fn color_mode_adds_escape_codes() {
        let styled = apply(names::ERROR, "gagal", true);
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("gagal"));
    }

    #[test]
    fn unknown_style_is_flagged() {
        assert_eq!(apply("nope", "x", false), "(!?) x");
    }
}
