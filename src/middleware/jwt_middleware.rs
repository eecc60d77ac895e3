use std::future::{ready, Ready};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, ResponseError,
};
use futures_util::future::LocalBoxFuture;

use crate::{error::AppError, utils::auth::verify_token, AppState};

/// Authenticates requests that carry a bearer token.
///
/// A valid token puts its `UserData` into the request extensions. Requests
/// without credentials pass through anonymously, a bad token is rejected
/// before reaching any handler.
#[derive(Clone)]
pub struct Authenticate {
    app_data: web::Data<AppState>,
}

impl Authenticate {
    pub fn new(app_data: web::Data<AppState>) -> Self {
        Self { app_data }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service,
            app_data: self.app_data.clone(),
        }))
    }
}

pub struct AuthenticateMiddleware<S> {
    service: S,
    app_data: web::Data<AppState>,
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|token| token.trim().to_owned());

        if let Some(token) = bearer {
            match verify_token(&self.app_data.settings.jwt_secret, &token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims.user);
                }
                Err(err) => {
                    log::debug!("rejected bearer token: {err}");
                    let response =
                        AppError::AuthenticationFailed("Invalid or expired token.".into())
                            .error_response();
                    let response = req.into_response(response).map_into_right_body();
                    return Box::pin(async move { Ok(response) });
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
