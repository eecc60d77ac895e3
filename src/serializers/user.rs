use serde::Serialize;
use serde_json::Value;

use super::{expect_object, field, string, INVALID_STRING};
use crate::{
    error::{ValidationErrors, NOT_BLANK, REQUIRED},
    models::User,
    utils::{links::Links, test_password},
};

const USERNAME_MAX_LENGTH: usize = 150;

/// A user as the API presents it, with links to the snippets they own.
#[derive(Debug, Serialize)]
pub struct UserRepresentation {
    pub url: String,
    pub id: i64,
    pub username: String,
    pub snippets: Vec<String>,
}

impl UserRepresentation {
    pub fn new(user: &User, snippet_ids: &[i64], links: &Links) -> Self {
        Self {
            url: links.user_detail(user.id),
            id: user.id,
            username: user.username.clone(),
            snippets: snippet_ids
                .iter()
                .map(|id| links.snippet_detail(*id))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub fn validate_registration(data: &Value) -> Result<Registration, ValidationErrors> {
    let object = expect_object(data)?;
    let mut errors = ValidationErrors::default();

    let username = field(object, "username", &mut errors, username);
    let password = field(object, "password", &mut errors, |value| {
        let password = password(value)?;
        match test_password(&password) {
            Some(reason) => Err(reason.to_owned()),
            None => Ok(password),
        }
    });

    match (username, password) {
        (Some(username), Some(password)) if errors.is_empty() => {
            Ok(Registration { username, password })
        }
        (username, password) => {
            require(object, "username", username.is_none(), &mut errors);
            require(object, "password", password.is_none(), &mut errors);
            Err(errors)
        }
    }
}

pub fn validate_credentials(data: &Value) -> Result<Credentials, ValidationErrors> {
    let object = expect_object(data)?;
    let mut errors = ValidationErrors::default();

    let username = field(object, "username", &mut errors, |value| {
        let username = string(value)?;
        if username.is_empty() {
            return Err(NOT_BLANK.to_owned());
        }
        Ok(username)
    });
    let password = field(object, "password", &mut errors, password);

    match (username, password) {
        (Some(username), Some(password)) if errors.is_empty() => {
            Ok(Credentials { username, password })
        }
        (username, password) => {
            require(object, "username", username.is_none(), &mut errors);
            require(object, "password", password.is_none(), &mut errors);
            Err(errors)
        }
    }
}

fn require(
    object: &serde_json::Map<String, Value>,
    name: &str,
    missing: bool,
    errors: &mut ValidationErrors,
) {
    if missing && !object.contains_key(name) {
        errors.add(name, REQUIRED);
    }
}

fn username(value: &Value) -> Result<String, String> {
    let username = string(value)?;
    if username.is_empty() {
        return Err(NOT_BLANK.to_owned());
    }
    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {USERNAME_MAX_LENGTH} characters."
        ));
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '@' | '.' | '+' | '-');
    if !username.chars().all(allowed) {
        return Err("Enter a valid username. This value may contain only letters, \
                    numbers, and @/./+/-/_ characters."
            .to_owned());
    }
    Ok(username)
}

/// Passwords are taken verbatim, surrounding whitespace included.
fn password(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) if s.is_empty() => Err(NOT_BLANK.to_owned()),
        Value::String(s) => Ok(s.clone()),
        _ => Err(INVALID_STRING.to_owned()),
    }
}
