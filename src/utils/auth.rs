use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    config::Settings,
    models::{Claims, User, UserData},
};

pub fn test_password(password: &str) -> Option<&'static str> {
    if password.chars().count() < 8 {
        Some("Password must be at least 8 characters long")
    } else if !password.chars().any(|c| c.is_uppercase()) {
        Some("Password must include at least one uppercase letter")
    } else if !password.chars().any(|c| c.is_lowercase()) {
        Some("Password must include at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_numeric()) {
        Some("Password must include at least one number")
    } else {
        None
    }
}

/// A signed access token and its lifetime in seconds.
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
}

pub fn issue_token(
    settings: &Settings,
    user: &User,
) -> Result<AccessToken, jsonwebtoken::errors::Error> {
    let ttl = ChronoDuration::minutes(settings.token_ttl_minutes);
    let exp = Utc::now() + ttl;
    let claims = Claims {
        exp: exp.timestamp() as usize,
        user: UserData {
            id: user.id,
            username: user.username.clone(),
        },
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )?;
    Ok(AccessToken {
        token,
        expires_in: ttl.num_seconds(),
    })
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}
