//! Code snippet sharing API: owners write, everyone reads, and every saved
//! snippet carries a pre-rendered syntax-highlighted page.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod highlight;
pub mod middleware;
pub mod models;
pub mod parsers;
pub mod permissions;
pub mod renderers;
pub mod routes;
pub mod serializers;
pub mod utils;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use sqlx::SqlitePool;

use crate::{config::Settings, highlight::Highlighter, middleware::Authenticate};

pub struct AppState {
    pub db: SqlitePool,
    pub highlighter: Highlighter,
    pub settings: Settings,
}

impl AppState {
    /// Connects to the configured database and loads the highlighting assets.
    pub async fn new(settings: Settings) -> Result<Self, sqlx::Error> {
        let db = db::connect(&settings.database_url).await?;
        Ok(Self {
            db,
            highlighter: Highlighter::new(),
            settings,
        })
    }
}

/// The application with its routes and authentication, minus the
/// process-level middleware (`Logger`, CORS) that `main` adds.
pub fn app(
    app_data: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_data.clone())
        .wrap(Authenticate::new(app_data))
        .configure(routes::config)
        .default_service(web::to(handlers::not_found))
}
