use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::header, App, HttpServer};

use taskboard::auth::{JwtTokenService, TokenService};
use taskboard::config::Config;
use taskboard::store::PgStore;
use taskboard::AppServices;

fn cors_for(frontend_url: Option<&str>) -> Cors {
    match frontend_url {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600),
        None => Cors::default(),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    };
    if config.frontend_url.is_none() {
        log::warn!("FRONTEND_URL is not set; cross-origin browser requests will be refused");
    }

    let store = PgStore::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_config(&config));
    let services = AppServices::new(Arc::new(store), tokens, config.bcrypt_cost)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting TaskBoard server at {}", config.server_url());
    let frontend_url = config.frontend_url.clone();
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(cors_for(frontend_url.as_deref()))
            .wrap(Logger::default())
            .configure(move |cfg| services.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
