use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web::Data, HttpServer};
use env_logger::Env;

use snippets_api::{app, config::Settings, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::from_filename(".env")
        .or_else(|_| dotenv::dotenv())
        .ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::new().map_err(io::Error::other)?;
    let (host, port) = (settings.host.clone(), settings.port);

    let app_data = Data::new(AppState::new(settings).await.map_err(io::Error::other)?);
    log::info!("serving snippets on http://{host}:{port}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        app(app_data.clone())
            .wrap(Logger::default())
            .wrap(cors)
    })
    .bind((host, port))?
    .run()
    .await
}
