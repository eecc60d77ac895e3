use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ______________________________________ Snippets ______________________________________

/// A stored snippet joined with its owner's username.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Snippet {
    pub id: i64,
    pub created: DateTime<Utc>,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
    pub highlighted: String,
    pub owner_id: i64,
    pub owner: String,
}

/// The writable fields of a snippet, with the model defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
}

impl NewSnippet {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            code: code.into(),
            linenos: false,
            language: Language::default(),
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownChoice;

// ______________________________________ Languages ______________________________________
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Language {
    Bash,
    C,
    Cpp,
    Css,
    Go,
    Haskell,
    Html,
    Java,
    Javascript,
    Json,
    Lua,
    Markdown,
    Perl,
    Php,
    #[default]
    Python,
    Ruby,
    Rust,
    Sql,
    Text,
    Xml,
    Yaml,
}

impl Language {
    pub const ALL: [Language; 21] = [
        Language::Bash,
        Language::C,
        Language::Cpp,
        Language::Css,
        Language::Go,
        Language::Haskell,
        Language::Html,
        Language::Java,
        Language::Javascript,
        Language::Json,
        Language::Lua,
        Language::Markdown,
        Language::Perl,
        Language::Php,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Sql,
        Language::Text,
        Language::Xml,
        Language::Yaml,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Bash => "bash",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Css => "css",
            Language::Go => "go",
            Language::Haskell => "haskell",
            Language::Html => "html",
            Language::Java => "java",
            Language::Javascript => "javascript",
            Language::Json => "json",
            Language::Lua => "lua",
            Language::Markdown => "markdown",
            Language::Perl => "perl",
            Language::Php => "php",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Sql => "sql",
            Language::Text => "text",
            Language::Xml => "xml",
            Language::Yaml => "yaml",
        }
    }

    /// File extension the bundled syntax definitions are registered under.
    pub fn syntax_token(self) -> &'static str {
        match self {
            Language::Bash => "sh",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Css => "css",
            Language::Go => "go",
            Language::Haskell => "hs",
            Language::Html => "html",
            Language::Java => "java",
            Language::Javascript => "js",
            Language::Json => "json",
            Language::Lua => "lua",
            Language::Markdown => "md",
            Language::Perl => "pl",
            Language::Php => "php",
            Language::Python => "py",
            Language::Ruby => "rb",
            Language::Rust => "rs",
            Language::Sql => "sql",
            Language::Text => "txt",
            Language::Xml => "xml",
            Language::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or(UnknownChoice)
    }
}

// ______________________________________ Styles ______________________________________
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "lowercase")]
pub enum Style {
    Default,
    #[default]
    Friendly,
    #[sqlx(rename = "github-dark")]
    GithubDark,
    Monokai,
    Native,
    #[sqlx(rename = "solarized-dark")]
    SolarizedDark,
    #[sqlx(rename = "solarized-light")]
    SolarizedLight,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Style::Default,
        Style::Friendly,
        Style::GithubDark,
        Style::Monokai,
        Style::Native,
        Style::SolarizedDark,
        Style::SolarizedLight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Default => "default",
            Style::Friendly => "friendly",
            Style::GithubDark => "github-dark",
            Style::Monokai => "monokai",
            Style::Native => "native",
            Style::SolarizedDark => "solarized-dark",
            Style::SolarizedLight => "solarized-light",
        }
    }

    /// Name of the bundled colour theme that renders this style.
    pub fn theme_name(self) -> &'static str {
        match self {
            Style::Default | Style::Friendly => "InspiredGitHub",
            Style::GithubDark => "base16-ocean.dark",
            Style::Monokai => "base16-mocha.dark",
            Style::Native => "base16-eighties.dark",
            Style::SolarizedDark => "Solarized (dark)",
            Style::SolarizedLight => "Solarized (light)",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or(UnknownChoice)
    }
}
