use actix_web::http::Method;

use crate::{
    error::AppError,
    models::{Snippet, UserData},
};

/// Methods that never modify state.
pub fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Anyone may read, only authenticated users may write.
pub fn authenticated_or_read_only(
    method: &Method,
    user: Option<&UserData>,
) -> Result<(), AppError> {
    if is_safe(method) || user.is_some() {
        Ok(())
    } else {
        Err(AppError::NotAuthenticated)
    }
}

/// Anyone may read a snippet, only its owner may change it.
pub fn owner_or_read_only(
    method: &Method,
    user: Option<&UserData>,
    snippet: &Snippet,
) -> Result<(), AppError> {
    if is_safe(method) {
        return Ok(());
    }
    match user {
        None => Err(AppError::NotAuthenticated),
        Some(user) if user.id == snippet.owner_id => Ok(()),
        Some(_) => Err(AppError::PermissionDenied),
    }
}
