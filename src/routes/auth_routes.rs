use actix_web::web;

use super::{endpoint, suffixed};
use crate::handlers::{auth_handler, LOGIN, REGISTER};

pub fn config(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/auth")
            .service(
                endpoint(suffixed("/register"), &REGISTER)
                    .route(web::post().to(auth_handler::register)),
            )
            .service(
                endpoint(suffixed("/login"), &LOGIN).route(web::post().to(auth_handler::login)),
            ),
    );
}
