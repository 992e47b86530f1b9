//! # Rendering Module
//!
//! Views come out of the API as data ([`View`]); this module turns them into text.
//!
//! Each view has a template of the same name in `src/cli/templates/`, embedded via
//! `include_str!()`. All of them extend `layout.jinja`, which prints the pending flash
//! above the body. The template context is the serialized view plus two extras:
//! - `flash`: the one-shot message taken from the session, if any
//! - `user`: the logged-in username, if any
//!
//! ## Filters
//!
//! - `style(name)`: applies a named style from [`super::styles`]
//! - `fit(width)`: first line only, truncated with `…` and padded to a display width
//! - `pad(width)`: right-aligns to a display width

use super::styles;
use anyhow::Result;
use minijinja::{Environment, Value};
use snipapp::api::View;
use snipapp::session::Flash;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.jinja", include_str!("templates/layout.jinja")),
    ("index.jinja", include_str!("templates/index.jinja")),
    ("all.jinja", include_str!("templates/all.jinja")),
    ("snippet.jinja", include_str!("templates/snippet.jinja")),
    ("new.jinja", include_str!("templates/new.jinja")),
    ("update.jinja", include_str!("templates/update.jinja")),
    ("delete.jinja", include_str!("templates/delete.jinja")),
    ("register.jinja", include_str!("templates/register.jinja")),
    ("login.jinja", include_str!("templates/login.jinja")),
    ("logout.jinja", include_str!("templates/logout.jinja")),
    ("error.jinja", include_str!("templates/error.jinja")),
];

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            styles::apply(&name, &value.to_string(), use_color)
        });
        env.add_filter("fit", |value: Value, width: usize| fit(&value.to_string(), width));
        env.add_filter("pad", |value: Value, width: usize| {
            let text = value.to_string();
            format!("{}{}", " ".repeat(width.saturating_sub(text.width())), text)
        });
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, view: &View, flash: Option<&Flash>, user: Option<&str>) -> Result<String> {
        let mut context = serde_json::to_value(view)?;
        if let Some(map) = context.as_object_mut() {
            map.insert("flash".to_string(), serde_json::to_value(flash)?);
            map.insert("user".to_string(), serde_json::to_value(user)?);
        }
        let template = self.env.get_template(&format!("{}.jinja", view.name()))?;
        Ok(template.render(&context)?)
    }
}

/// First line of `text` in exactly `width` columns.
fn fit(text: &str, width: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    let cut = text.trim_end().contains('\n') || line.width() > width;
    let budget = if cut { width.saturating_sub(1) } else { width };

    let mut out = String::new();
    let mut used = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    if cut {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use snipapp::api::SnippetForm;
    use snipapp::commands::ListedSnippet;
    use snipapp::model::Snippet;

    fn listed(id: u64, value: &str, owner: &str) -> ListedSnippet {
        ListedSnippet::from_snippet(Snippet::new(id, value.into(), owner.into()), Utc::now())
    }

    #[test]
    fn every_view_has_a_template() {
        let renderer = Renderer::new(false).unwrap();
        let views = [
            View::Index,
            View::All {
                snippets: vec![],
                filter: None,
            },
            View::Snippet {
                snippet: listed(1, "a", "alice"),
            },
            View::New { value: None },
            View::Update { form: None },
            View::Delete { form: None },
            View::Register { username: None },
            View::Login { username: None },
            View::Logout,
            View::Error {
                status: 404,
                message: "Not Found".into(),
            },
        ];
        for view in views {
            renderer.render(&view, None, None).unwrap();
        }
    }

    #[test]
    fn listing_shows_each_snippet() {
        let renderer = Renderer::new(false).unwrap();
        let view = View::All {
            snippets: vec![listed(2, "echo hi", "bob"), listed(1, "print(1)", "alice")],
            filter: None,
        };
        let out = renderer.render(&view, None, Some("alice")).unwrap();
        assert!(out.contains("echo hi"));
        assert!(out.contains("print(1)"));
        assert!(out.contains("alice"));
        assert!(out.find("echo hi").unwrap() < out.find("print(1)").unwrap());
    }

    #[test]
    fn empty_filtered_listing_names_the_owner() {
        let renderer = Renderer::new(false).unwrap();
        let view = View::All {
            snippets: vec![],
            filter: Some("carol".into()),
        };
        let out = renderer.render(&view, None, None).unwrap();
        assert!(out.contains("carol has no code snippets"));
    }

    #[test]
    fn flash_is_printed_above_the_body() {
        let renderer = Renderer::new(false).unwrap();
        let flash = Flash::success("The code snippet was saved successfully.");
        let out = renderer
            .render(&View::New { value: None }, Some(&flash), Some("alice"))
            .unwrap();
        assert!(out.starts_with("The code snippet was saved successfully."));
    }

    #[test]
    fn update_form_shows_current_value() {
        let renderer = Renderer::new(false).unwrap();
        let view = View::Update {
            form: Some(SnippetForm {
                id: 7,
                value: "let x = 1;".into(),
                owner: "alice".into(),
            }),
        };
        let out = renderer.render(&view, None, Some("alice")).unwrap();
        assert!(out.contains("#7"));
        assert!(out.contains("let x = 1;"));
        assert!(out.contains("snip update 7"));
    }

    #[test]
    fn error_view_shows_status() {
        let renderer = Renderer::new(false).unwrap();
        let view = View::Error {
            status: 403,
            message: "Forbidden".into(),
        };
        let out = renderer.render(&view, None, None).unwrap();
        assert!(out.contains("403"));
        assert!(out.contains("Forbidden"));
    }

    #[test]
    fn fit_truncates_and_pads() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 5), "abcd…");
        assert_eq!(fit("first\nsecond", 8), "first…  ");
        assert_eq!(fit("日本語", 4), "日… ");
    }
}
