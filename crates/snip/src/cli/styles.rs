//! Named terminal styles for the templates.
//!
//! Templates refer to styles by meaning (`id`, `owner`, `time`, ...) through the
//! `style` filter, never by color. Flash kinds double as style names, so a flash
//! renders with `{{ flash.text | style(flash.kind) }}`.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub static SNIP_STYLES: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    HashMap::from([
        ("success", Style::new().green()),
        ("fail", Style::new().red().bold()),
        ("id", Style::new().yellow()),
        ("owner", Style::new().cyan()),
        ("time", Style::new().color256(246).italic()),
        ("muted", Style::new().dim()),
        ("title", Style::new().bold()),
        ("error", Style::new().red()),
    ])
});

/// Applies the named style. Unknown names are flagged so template typos show up.
pub fn apply(name: &str, text: &str, use_color: bool) -> String {
    match SNIP_STYLES.get(name) {
        Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
        Some(_) => text.to_string(),
        None => format!("(!?){}", text),
    }
}
