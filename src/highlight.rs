//! Server-side rendering of snippet code into a standalone HTML page.

use std::borrow::Cow;

use syntect::{
    easy::HighlightLines,
    highlighting::{Color, Theme, ThemeSet},
    html::{styled_line_to_highlighted_html, IncludeBackground},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};

use crate::models::{Language, Style};

/// Syntax and theme definitions, loaded once and shared by all workers.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Renders `code` as a full HTML document titled `title`.
    pub fn render(
        &self,
        title: &str,
        code: &str,
        language: Language,
        style: Style,
        linenos: bool,
    ) -> Result<String, syntect::Error> {
        let syntax = self
            .syntaxes
            .find_syntax_by_token(language.syntax_token())
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let theme = match self.themes.themes.get(style.theme_name()) {
            Some(theme) => Cow::Borrowed(theme),
            None => Cow::Owned(Theme::default()),
        };

        let mut highlighter = HighlightLines::new(syntax, &theme);
        let width = code.lines().count().max(1).to_string().len();
        let mut body = String::new();
        for (index, line) in LinesWithEndings::from(code).enumerate() {
            let regions = highlighter.highlight_line(line, &self.syntaxes)?;
            if linenos {
                body.push_str(&format!(
                    "<span class=\"lineno\">{:>width$} </span>",
                    index + 1
                ));
            }
            body.push_str(&styled_line_to_highlighted_html(
                &regions[..],
                IncludeBackground::No,
            )?);
        }

        let settings = &theme.settings;
        let background = css_color(settings.background, "#ffffff");
        let foreground = css_color(settings.foreground, "#000000");
        let gutter = css_color(settings.gutter_foreground, "#999999");

        let page = format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <title>{title}</title>\n\
             <meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\">\n\
             <style type=\"text/css\">\n\
             body {{ background: {background}; color: {foreground}; }}\n\
             .highlight pre {{ margin: 0; line-height: 125%; }}\n\
             .lineno {{ color: {gutter}; padding-right: 0.5em; user-select: none; }}\n\
             </style>\n\
             </head>\n\
             <body>\n\
             <h2>{title}</h2>\n\n\
             <div class=\"highlight\"><pre>{body}</pre></div>\n\
             </body>\n\
             </html>\n",
            title = escape_html(title),
        );
        Ok(page)
    }
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn css_color(color: Option<Color>, fallback: &str) -> String {
    match color {
        Some(Color { r, g, b, .. }) => format!("#{r:02x}{g:02x}{b:02x}"),
        None => fallback.to_owned(),
    }
}
