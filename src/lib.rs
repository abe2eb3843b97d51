pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::Config;
pub use db::{create_pool, DbPool};
pub use state::{AppState, Repositories};

use errors::AppError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type MigrationError = Box<dyn std::error::Error + Send + Sync>;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), MigrationError> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Registers the JSON API, its error handling and the Swagger UI.
///
/// Shared by [`build_server`] and the `actix_web::test` suites so both run
/// the exact same routing table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {err}")).into()
    }))
    .service(
        web::scope("/api")
            .route("/auth/register/", web::post().to(handlers::auth::register))
            .route("/auth/login/", web::post().to(handlers::auth::login))
            .route("/products/", web::get().to(handlers::products::list_products))
            .route("/products/{id}/", web::get().to(handlers::products::get_product))
            .route(
                "/products/{id}/reviews/",
                web::get().to(handlers::products::list_reviews),
            )
            .route("/carriers/", web::get().to(handlers::carriers::list_carriers))
            .service(
                web::resource("/orders/")
                    .route(web::get().to(handlers::orders::list_orders))
                    .route(web::post().to(handlers::orders::create_order)),
            )
            .route("/orders/{id}/", web::get().to(handlers::orders::get_order)),
    )
    .service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
            .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((host.to_string(), port))?
    .run())
}
