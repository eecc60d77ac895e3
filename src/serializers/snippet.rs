use serde::Serialize;
use serde_json::{Map, Value};

use super::{expect_object, field, string};
use crate::{
    error::{AppError, ValidationErrors, NOT_BLANK, REQUIRED},
    models::{Language, NewSnippet, Snippet, Style},
    utils::links::Links,
};

const TITLE_MAX_LENGTH: usize = 100;

/// Which fields a payload must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Replace,
    Patch,
}

/// The validated writable fields of a payload; `None` means "not sent".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SnippetChanges {
    pub title: Option<String>,
    pub code: Option<String>,
    pub linenos: Option<bool>,
    pub language: Option<Language>,
    pub style: Option<Style>,
}

impl SnippetChanges {
    /// A new snippet, with model defaults for anything not sent.
    pub fn into_new(self) -> NewSnippet {
        let defaults = NewSnippet::new(String::new());
        NewSnippet {
            title: self.title.unwrap_or(defaults.title),
            code: self.code.unwrap_or(defaults.code),
            linenos: self.linenos.unwrap_or(defaults.linenos),
            language: self.language.unwrap_or(defaults.language),
            style: self.style.unwrap_or(defaults.style),
        }
    }

    /// Overwrites the fields that were sent and keeps the rest.
    pub fn apply(self, snippet: &mut Snippet) {
        if let Some(title) = self.title {
            snippet.title = title;
        }
        if let Some(code) = self.code {
            snippet.code = code;
        }
        if let Some(linenos) = self.linenos {
            snippet.linenos = linenos;
        }
        if let Some(language) = self.language {
            snippet.language = language;
        }
        if let Some(style) = self.style {
            snippet.style = style;
        }
    }
}

pub fn validate(data: &Value, mode: Mode) -> Result<SnippetChanges, ValidationErrors> {
    let object = expect_object(data)?;
    let mut errors = ValidationErrors::default();

    let changes = SnippetChanges {
        title: field(object, "title", &mut errors, title),
        code: field(object, "code", &mut errors, code),
        linenos: field(object, "linenos", &mut errors, boolean),
        language: field(object, "language", &mut errors, choice::<Language>),
        style: field(object, "style", &mut errors, choice::<Style>),
    };
    if mode != Mode::Patch && !object.contains_key("code") {
        errors.add("code", REQUIRED);
    }

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

/// Validates every item of a list payload. On failure the error is a list
/// holding one error object per item, empty for the items that passed.
pub fn validate_many(items: &[Value]) -> Result<Vec<SnippetChanges>, AppError> {
    let mut valid = Vec::with_capacity(items.len());
    let mut reports = Vec::with_capacity(items.len());
    let mut failed = false;

    for item in items {
        match validate(item, Mode::Create) {
            Ok(changes) => {
                valid.push(changes);
                reports.push(Value::Object(Map::new()));
            }
            Err(errors) => {
                failed = true;
                reports.push(errors.into_value());
            }
        }
    }

    if failed {
        Err(AppError::Validation(Value::Array(reports)))
    } else {
        Ok(valid)
    }
}

fn title(value: &Value) -> Result<String, String> {
    let title = string(value)?;
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {TITLE_MAX_LENGTH} characters."
        ));
    }
    Ok(title)
}

fn code(value: &Value) -> Result<String, String> {
    let code = string(value)?;
    if code.is_empty() {
        return Err(NOT_BLANK.to_owned());
    }
    Ok(code)
}

fn boolean(value: &Value) -> Result<bool, String> {
    const INVALID: &str = "Must be a valid boolean.";
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Ok(true),
            Some(v) if v == 0.0 => Ok(false),
            _ => Err(INVALID.to_owned()),
        },
        Value::String(s) => match s.as_str() {
            "t" | "T" | "y" | "Y" | "yes" | "Yes" | "YES" | "true" | "True" | "TRUE" | "on"
            | "On" | "ON" | "1" => Ok(true),
            "f" | "F" | "n" | "N" | "no" | "No" | "NO" | "false" | "False" | "FALSE" | "off"
            | "Off" | "OFF" | "0" => Ok(false),
            _ => Err(INVALID.to_owned()),
        },
        _ => Err(INVALID.to_owned()),
    }
}

fn choice<T: std::str::FromStr>(value: &Value) -> Result<T, String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    raw.parse()
        .map_err(|_| format!("\"{raw}\" is not a valid choice."))
}

/// A snippet as the API presents it.
#[derive(Debug, Serialize)]
pub struct SnippetRepresentation {
    pub url: String,
    pub id: i64,
    pub highlight: String,
    pub owner: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
}

impl SnippetRepresentation {
    pub fn new(snippet: &Snippet, links: &Links) -> Self {
        Self {
            url: links.snippet_detail(snippet.id),
            id: snippet.id,
            highlight: links.snippet_highlight(snippet.id),
            owner: snippet.owner.clone(),
            title: snippet.title.clone(),
            code: snippet.code.clone(),
            linenos: snippet.linenos,
            language: snippet.language,
            style: snippet.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::NOT_NULL;

    fn messages(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors.get(field).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn create_applies_model_defaults() {
        let changes = validate(&json!({"code": "  print('hi')\n"}), Mode::Create).unwrap();
        let new = changes.into_new();

        assert_eq!(new.code, "print('hi')");
        assert_eq!(new.title, "");
        assert!(!new.linenos);
        assert_eq!(new.language, Language::Python);
        assert_eq!(new.style, Style::Friendly);
    }

    #[test]
    fn code_is_required_unless_patching() {
        let errors = validate(&json!({"title": "t"}), Mode::Create).unwrap_err();
        assert_eq!(messages(&errors, "code"), [REQUIRED]);

        let errors = validate(&json!({}), Mode::Replace).unwrap_err();
        assert_eq!(messages(&errors, "code"), [REQUIRED]);

        let changes = validate(&json!({"title": "t"}), Mode::Patch).unwrap();
        assert_eq!(changes.title.as_deref(), Some("t"));
        assert_eq!(changes.code, None);
    }

    #[test]
    fn blank_and_null_code_are_rejected() {
        let errors = validate(&json!({"code": "   "}), Mode::Create).unwrap_err();
        assert_eq!(messages(&errors, "code"), [NOT_BLANK]);

        let errors = validate(&json!({"code": null}), Mode::Patch).unwrap_err();
        assert_eq!(messages(&errors, "code"), [NOT_NULL]);
    }

    #[test]
    fn title_may_be_blank_but_not_too_long() {
        assert!(validate(&json!({"code": "x", "title": ""}), Mode::Create).is_ok());

        let errors = validate(&json!({"code": "x", "title": "a".repeat(101)}), Mode::Create)
            .unwrap_err();
        assert_eq!(
            messages(&errors, "title"),
            ["Ensure this field has no more than 100 characters."]
        );
        assert!(validate(&json!({"code": "x", "title": "a".repeat(100)}), Mode::Create).is_ok());
    }

    #[test]
    fn strings_reject_structured_values() {
        let errors = validate(&json!({"code": ["x"], "title": true}), Mode::Create).unwrap_err();
        assert_eq!(messages(&errors, "code"), ["Not a valid string."]);
        assert_eq!(messages(&errors, "title"), ["Not a valid string."]);

        let changes = validate(&json!({"code": 42}), Mode::Create).unwrap();
        assert_eq!(changes.code.as_deref(), Some("42"));
    }

    #[test]
    fn booleans_accept_common_spellings() {
        for (input, expected) in [
            (json!(true), true),
            (json!("on"), true),
            (json!("True"), true),
            (json!(1), true),
            (json!("no"), false),
            (json!(0), false),
            (json!("false"), false),
        ] {
            let changes = validate(&json!({"code": "x", "linenos": input}), Mode::Create).unwrap();
            assert_eq!(changes.linenos, Some(expected));
        }

        let errors = validate(&json!({"code": "x", "linenos": "maybe"}), Mode::Create).unwrap_err();
        assert_eq!(messages(&errors, "linenos"), ["Must be a valid boolean."]);
    }

    #[test]
    fn choices_must_be_known() {
        let errors = validate(
            &json!({"code": "x", "language": "klingon", "style": "neon"}),
            Mode::Create,
        )
        .unwrap_err();
        assert_eq!(
            messages(&errors, "language"),
            ["\"klingon\" is not a valid choice."]
        );
        assert_eq!(messages(&errors, "style"), ["\"neon\" is not a valid choice."]);

        let changes = validate(
            &json!({"code": "x", "language": "rust", "style": "solarized-light"}),
            Mode::Create,
        )
        .unwrap();
        assert_eq!(changes.language, Some(Language::Rust));
        assert_eq!(changes.style, Some(Style::SolarizedLight));
    }

    #[test]
    fn read_only_and_unknown_fields_are_ignored() {
        let changes = validate(
            &json!({"code": "x", "id": 99, "owner": "mallory", "highlight": "<b>", "extra": 1}),
            Mode::Create,
        )
        .unwrap();
        assert_eq!(
            changes,
            SnippetChanges {
                code: Some("x".into()),
                ..SnippetChanges::default()
            }
        );
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        let errors = validate(&json!("code"), Mode::Create).unwrap_err();
        assert_eq!(
            messages(&errors, "non_field_errors"),
            ["Invalid data. Expected a dictionary, but got str."]
        );
    }

    #[test]
    fn many_reports_errors_per_item() {
        let result = validate_many(&[json!({"code": "ok"}), json!({"code": ""})]);
        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors, json!([{}, {"code": [NOT_BLANK]}]))
            }
            other => panic!("unexpected {other:?}"),
        }

        let valid = validate_many(&[json!({"code": "a"}), json!({"code": "b"})]).unwrap();
        assert_eq!(valid.len(), 2);
    }

    #[test]
    fn apply_keeps_fields_that_were_not_sent() {
        let mut snippet = Snippet {
            id: 1,
            created: chrono::Utc::now(),
            title: "keep".into(),
            code: "old".into(),
            linenos: true,
            language: Language::Ruby,
            style: Style::Monokai,
            highlighted: String::new(),
            owner_id: 1,
            owner: "owner".into(),
        };

        validate(&json!({"code": "new"}), Mode::Patch)
            .unwrap()
            .apply(&mut snippet);

        assert_eq!(snippet.code, "new");
        assert_eq!(snippet.title, "keep");
        assert!(snippet.linenos);
        assert_eq!(snippet.language, Language::Ruby);
    }
}
