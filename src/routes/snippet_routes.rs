use actix_web::web;

use super::{endpoint, read, suffixed};
use crate::handlers::{snippet_handler, SNIPPET_HIGHLIGHT, SNIPPET_INSTANCE, SNIPPET_LIST};

pub fn config(config: &mut web::ServiceConfig) {
    config
        .service(
            endpoint(suffixed("/snippets"), &SNIPPET_LIST)
                .route(read().to(snippet_handler::list))
                .route(web::post().to(snippet_handler::create)),
        )
        .service(
            endpoint(suffixed("/snippets/{pk:[^/.]+}"), &SNIPPET_INSTANCE)
                .route(read().to(snippet_handler::retrieve))
                .route(web::put().to(snippet_handler::update))
                .route(web::patch().to(snippet_handler::update))
                .route(web::delete().to(snippet_handler::destroy)),
        )
        .service(
            endpoint(suffixed("/snippets/{pk:[^/.]+}/highlight"), &SNIPPET_HIGHLIGHT)
                .route(read().to(snippet_handler::highlight)),
        );
}
