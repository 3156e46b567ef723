mod cors;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use api_auth::verifier::{CredentialVerifier, PassThrough};
use common::env_config::Config;
use db::store::PgStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();
    let cookie_secure = !origin.contains("localhost");
    let logger_enabled = config.console_logging_enabled;

    // init logger
    if logger_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // identity credential hook: pass-through by default, swap in a
    // verifying implementation for deployments with signed tokens
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(PassThrough);

    HttpServer::new(move || {
        let secret = config_data.session_secret.as_bytes();
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(PgStore::new(pool.clone())))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::from(verifier.clone()))
            .wrap(logger::middleware(logger_enabled)) // 3rd
            .wrap(cors::middleware(&origin)) // 2nd
            .wrap(api_auth::session_middleware(cookie_secure, secret)) // 1st
            .service(api_auth::mount_auth())
            .service(api_plans::mount_plans())
            .service(api_plans::mount_permissions())
            .service(api_subs::mount_subs())
            .service(access::mount_access())
            .service(limiter::mount_usage())
            .service(gateway::mount_services())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
