pub mod auth_routes;
pub mod snippet_routes;
pub mod user_routes;

use actix_web::{guard, http::Method, web, HttpRequest, HttpResponse, Resource, Route};

use crate::{
    error::AppError,
    handlers::{self, root_handler, View, API_ROOT},
};

const FORMAT: &str = "{format:[a-z0-9]+}";

pub fn config(config: &mut web::ServiceConfig) {
    config
        .service(
            endpoint(vec!["/".into(), format!("/.{FORMAT}"), format!("/.{FORMAT}/")], &API_ROOT)
                .route(read().to(root_handler::api_root)),
        )
        .configure(snippet_routes::config)
        .configure(user_routes::config)
        .configure(auth_routes::config);
}

/// `base` with an optional trailing slash and an optional format suffix.
pub(crate) fn suffixed(base: &str) -> Vec<String> {
    vec![
        base.to_owned(),
        format!("{base}/"),
        format!("{base}.{FORMAT}"),
        format!("{base}.{FORMAT}/"),
    ]
}

/// A resource that answers `OPTIONS` from `view` and rejects methods it
/// has no route for with a 405.
pub(crate) fn endpoint(patterns: Vec<String>, view: &'static View) -> Resource {
    web::resource(patterns)
        .route(
            web::route()
                .method(Method::OPTIONS)
                .to(move |req: HttpRequest| async move { handlers::describe(&req, view) }),
        )
        .default_service(web::to(move |req: HttpRequest| async move {
            Err::<HttpResponse, AppError>(handlers::method_not_allowed(&req, view))
        }))
}

/// `GET`, and `HEAD` through the same handler.
pub(crate) fn read() -> Route {
    web::route().guard(guard::Any(guard::Get()).or(guard::Head()))
}
