use actix_web::web;

use super::{endpoint, read, suffixed};
use crate::handlers::{user_handler, USER_INSTANCE, USER_LIST};

pub fn config(config: &mut web::ServiceConfig) {
    config
        .service(endpoint(suffixed("/users"), &USER_LIST).route(read().to(user_handler::list)))
        .service(
            endpoint(suffixed("/users/{pk:[^/.]+}"), &USER_INSTANCE)
                .route(read().to(user_handler::retrieve)),
        );
}
